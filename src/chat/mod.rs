// Chat session for the analytics assistant
// Author: Gabriel Demetrios Lafis

mod client;

pub use client::*;

use log::{debug, info, warn};
use serde::Serialize;

use crate::data::AnalyticsResult;
use crate::mapping::{map_analytics, AnalyticsView};

/// Assistant text when a result carries no summary
pub const DEFAULT_REPLY: &str = "Done.";

/// Assistant text when the backend call failed
pub const FAILURE_REPLY: &str = "Could not get a response from AI analytics.";

/// Who wrote a chat item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a conversation
#[derive(Debug, Clone)]
pub struct ChatItem {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub analytics: Option<AnalyticsResult>,
    pub view: Option<AnalyticsView>,
    pub error: Option<String>,
}

/// A query admitted by [`Conversation::begin`] and not yet completed
#[derive(Debug)]
pub struct PendingQuery {
    text: String,
}

impl PendingQuery {
    /// The trimmed query text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered history of one chat session.
///
/// Only one query may be outstanding at a time: `begin` refuses new input
/// until the pending query is completed.
#[derive(Debug, Default)]
pub struct Conversation {
    items: Vec<ChatItem>,
    pending: bool,
    sequence: u64,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        Conversation::default()
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!(
            "{}-{}-{}",
            prefix,
            chrono::Utc::now().timestamp_millis(),
            self.sequence
        )
    }

    /// Admit a query, recording the user's message
    ///
    /// Returns `None` for blank input or while another query is pending.
    pub fn begin(&mut self, text: &str) -> Option<PendingQuery> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring blank query");
            return None;
        }
        if self.pending {
            debug!("Ignoring query while another one is pending");
            return None;
        }

        let id = self.next_id("u");
        self.items.push(ChatItem {
            id,
            role: Role::User,
            text: trimmed.to_string(),
            analytics: None,
            view: None,
            error: None,
        });
        self.pending = true;

        Some(PendingQuery {
            text: trimmed.to_string(),
        })
    }

    /// Record the outcome of a pending query
    pub fn complete(
        &mut self,
        pending: PendingQuery,
        outcome: Result<AnalyticsResult, ClientError>,
    ) -> &ChatItem {
        let item = match outcome {
            Ok(result) => {
                info!("Query '{}' answered (request {})", pending.text, result.request_id);
                let text = if result.summary.is_empty() {
                    DEFAULT_REPLY.to_string()
                } else {
                    result.summary.clone()
                };
                let view = map_analytics(&result);

                ChatItem {
                    id: self.next_id("a"),
                    role: Role::Assistant,
                    text,
                    analytics: Some(result),
                    view: Some(view),
                    error: None,
                }
            }
            Err(err) => {
                warn!("Query '{}' failed: {}", pending.text, err);
                let message = err.to_string();
                let error = if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                };

                ChatItem {
                    id: self.next_id("e"),
                    role: Role::Assistant,
                    text: FAILURE_REPLY.to_string(),
                    analytics: None,
                    view: None,
                    error: Some(error),
                }
            }
        };

        self.pending = false;
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Submit a query to a backend and record both sides of the exchange
    pub async fn submit<B>(&mut self, backend: &B, text: &str) -> Option<&ChatItem>
    where
        B: AnalyticsBackend + ?Sized,
    {
        let pending = self.begin(text)?;
        let outcome = backend.query(pending.text()).await;
        Some(self.complete(pending, outcome))
    }

    /// All items in order
    pub fn items(&self) -> &[ChatItem] {
        &self.items
    }

    /// Whether a query is outstanding
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
