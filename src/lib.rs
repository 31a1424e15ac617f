// Ticket Analytics Mapper
// Author: Gabriel Demetrios Lafis

//! # Ticket Analytics Mapper
//!
//! Turns the answers of a support-ticket analytics backend into chart and
//! table view-models.
//!
//! ## Features
//!
//! - Lenient reading of analytics payloads (query hints, chart spec, rows)
//! - Chart type, axis field and label inference from overlapping hints
//! - Table previews of the raw result rows
//! - Chat sessions that query the backend one request at a time
//! - REST API and CLI around the mapper
//!
//! ## Example
//!
//! ```rust
//! use ticket_analytics_mapper::{data::AnalyticsResult, mapping::{map_analytics, ChartKind}};
//!
//! let payload = r#"{
//!     "request_id": "r-1",
//!     "dsl": {"dimensions": ["city"], "metrics": [{"field": "*", "as": "tickets"}]},
//!     "sql": "SELECT city, count(*) AS tickets FROM tickets GROUP BY city",
//!     "data": [{"city": "Almaty", "tickets": 12}, {"city": "Astana", "tickets": "7"}],
//!     "chart_spec": {"mark": "bar", "encoding": {"x": {"field": "city"}}},
//!     "summary": "Tickets by city"
//! }"#;
//!
//! let result: AnalyticsResult = payload.parse().unwrap();
//! let view = map_analytics(&result);
//!
//! assert_eq!(view.chart.chart_type, ChartKind::Bar);
//! assert_eq!(view.chart.points[1].value, 7.0);
//! assert_eq!(view.table.unwrap().columns, vec!["city", "tickets"]);
//! ```

pub mod data;
pub mod mapping;
pub mod chat;
pub mod api;
pub mod utils;

// Re-export main types
pub use data::{AnalyticsResult, Row, Value};
pub use mapping::{map_analytics, AnalyticsView, ChartModel, TableModel};
pub use chat::{AnalyticsClient, Conversation};
pub use api::Server;
pub use utils::Config;
