// Conversation and backend client tests
// Author: Gabriel Demetrios Lafis

use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::function;
use serde_json::{json, Value as JsonValue};

use ticket_analytics_mapper::{
    chat::{error_from_payload, AnalyticsBackend, AnalyticsClient, ClientError, Conversation, Role},
    data::AnalyticsResult,
};

mock! {
    pub Backend {}

    #[async_trait]
    impl AnalyticsBackend for Backend {
        async fn query(&self, text: &str) -> Result<AnalyticsResult, ClientError>;
    }
}

fn city_result() -> AnalyticsResult {
    AnalyticsResult::from_json(&json!({
        "request_id": "req-42",
        "dsl": {"dimensions": ["city"], "metrics": [{"field": "*", "as": "tickets"}]},
        "sql": "SELECT city, count(*) AS tickets FROM tickets GROUP BY city",
        "data": [{"city": "Almaty", "tickets": 12}, {"city": "Astana", "tickets": 7}],
        "chart_spec": {"mark": "bar"},
        "summary": "Almaty leads with 12 tickets"
    }))
}

#[tokio::test]
async fn test_successful_exchange() {
    let mut backend = MockBackend::new();
    backend
        .expect_query()
        .with(function(|text: &str| text == "Top cities by tickets"))
        .times(1)
        .returning(|_| Ok(city_result()));

    let mut conversation = Conversation::new();
    let item = conversation
        .submit(&backend, "  Top cities by tickets  ")
        .await
        .unwrap();

    assert_eq!(item.role, Role::Assistant);
    assert_eq!(item.text, "Almaty leads with 12 tickets");
    assert!(item.id.starts_with("a-"));
    assert!(item.error.is_none());

    let view = item.view.as_ref().unwrap();
    assert!(view.has_chart());
    assert_eq!(view.chart.points.len(), 2);
    assert_eq!(view.table.as_ref().unwrap().columns, vec!["city", "tickets"]);

    let items = conversation.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].role, Role::User);
    assert_eq!(items[0].text, "Top cities by tickets");
    assert!(items[0].id.starts_with("u-"));
    assert!(!conversation.is_pending());
}

#[tokio::test]
async fn test_empty_summary_uses_default_reply() {
    let mut backend = MockBackend::new();
    backend
        .expect_query()
        .returning(|_| Ok(AnalyticsResult::from_json(&json!({"data": []}))));

    let mut conversation = Conversation::new();
    let item = conversation.submit(&backend, "anything").await.unwrap();

    assert_eq!(item.text, "Done.");
    assert!(!item.view.as_ref().unwrap().has_chart());
    assert!(item.view.as_ref().unwrap().table.is_none());
}

#[tokio::test]
async fn test_failed_exchange_records_error() {
    let mut backend = MockBackend::new();
    backend
        .expect_query()
        .returning(|_| Err(ClientError::Backend("Ollama is not reachable".to_string())));

    let mut conversation = Conversation::new();
    let item = conversation.submit(&backend, "Trend by day").await.unwrap();

    assert_eq!(item.role, Role::Assistant);
    assert_eq!(item.text, "Could not get a response from AI analytics.");
    assert_eq!(item.error.as_deref(), Some("Ollama is not reachable"));
    assert!(item.id.starts_with("e-"));
    assert!(item.analytics.is_none());
    assert!(item.view.is_none());
    assert!(!conversation.is_pending());
}

#[tokio::test]
async fn test_blank_query_is_ignored() {
    let mut backend = MockBackend::new();
    backend.expect_query().times(0);

    let mut conversation = Conversation::new();

    assert!(conversation.submit(&backend, "   ").await.is_none());
    assert!(conversation.is_empty());
}

#[test]
fn test_one_query_at_a_time() {
    let mut conversation = Conversation::new();

    let pending = conversation.begin("first").unwrap();
    assert!(conversation.is_pending());
    assert!(conversation.begin("second").is_none());
    assert_eq!(conversation.len(), 1);

    conversation.complete(pending, Ok(city_result()));
    assert!(!conversation.is_pending());

    let pending = conversation.begin("second").unwrap();
    assert_eq!(pending.text(), "second");
    conversation.complete(pending, Err(ClientError::Status(500)));

    let texts: Vec<&str> = conversation.items().iter().map(|item| item.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "first",
            "Almaty leads with 12 tickets",
            "second",
            "Could not get a response from AI analytics.",
        ]
    );
    assert_eq!(conversation.items()[3].error.as_deref(), Some("HTTP 500"));
}

#[test]
fn test_empty_error_message_is_reported_as_unknown() {
    let mut conversation = Conversation::new();
    let pending = conversation.begin("Trend by day").unwrap();

    let item = conversation.complete(pending, Err(ClientError::Backend(String::new())));

    assert_eq!(item.error.as_deref(), Some("Unknown error"));
    assert_eq!(item.text, "Could not get a response from AI analytics.");
}

#[test]
fn test_item_ids_are_unique() {
    let mut conversation = Conversation::new();
    for _ in 0..3 {
        let pending = conversation.begin("again").unwrap();
        conversation.complete(pending, Ok(city_result()));
    }

    let mut ids: Vec<&str> = conversation.items().iter().map(|item| item.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_error_detail_extraction() {
    let detail = error_from_payload(422, &json!({"detail": "Unsupported metric"}));
    assert_eq!(detail.to_string(), "Unsupported metric");

    let structured = error_from_payload(422, &json!({"detail": [{"loc": ["body", "query"]}]}));
    assert_eq!(structured.to_string(), r#"[{"loc":["body","query"]}]"#);

    let missing = error_from_payload(503, &json!({"message": "down"}));
    assert_eq!(missing.to_string(), "HTTP 503");

    let empty = error_from_payload(500, &json!({"detail": ""}));
    assert_eq!(empty.to_string(), "HTTP 500");
}

#[test]
fn test_client_endpoint() {
    let client = AnalyticsClient::new("http://localhost:8001/", Duration::from_secs(5)).unwrap();

    assert_eq!(client.base_url(), "http://localhost:8001");
    assert_eq!(client.endpoint(), "http://localhost:8001/api/v1/analytics/query");
}

/// Routes standing in for the analytics backend, one behaviour per base path
fn backend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/html/api/v1/analytics/query",
        web::post().to(|| async {
            HttpResponse::Ok()
                .content_type("text/html")
                .body("<html><body>Gateway page</body></html>")
        }),
    )
    .route(
        "/rejected/api/v1/analytics/query",
        web::post().to(|| async {
            HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY)
                .json(json!({"detail": "Unsupported metric"}))
        }),
    )
    .route(
        "/ok/api/v1/analytics/query",
        web::post().to(|body: web::Json<JsonValue>| async move {
            let question = body["query"].as_str().unwrap_or_default().to_string();
            HttpResponse::Ok().json(json!({
                "request_id": "req-7",
                "dsl": {"dimensions": ["segment"], "chart": {"type": "line"}},
                "data": [{"segment": "VIP", "tickets": "4"}, "not a row"],
                "chart_spec": null,
                "summary": format!("Answer to: {}", question)
            }))
        }),
    );
}

async fn start_backend() -> (String, ServerHandle) {
    let server = HttpServer::new(|| App::new().configure(backend_routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{}", addr), handle)
}

#[actix_web::test]
async fn test_client_against_live_backend() {
    let (base_url, handle) = start_backend().await;
    let timeout = Duration::from_secs(5);

    let client = AnalyticsClient::new(&format!("{}/html", base_url), timeout).unwrap();
    match client.query("Tickets by segment").await {
        Err(ClientError::InvalidResponse(_)) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let client = AnalyticsClient::new(&format!("{}/rejected", base_url), timeout).unwrap();
    let err = client.query("Tickets by segment").await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(_)));
    assert_eq!(err.to_string(), "Unsupported metric");

    let client = AnalyticsClient::new(&format!("{}/ok/", base_url), timeout).unwrap();
    let result = client.query("Tickets by segment").await.unwrap();
    assert_eq!(result.request_id, "req-7");
    assert_eq!(result.summary, "Answer to: Tickets by segment");
    assert_eq!(result.rows.len(), 2);
    assert!(result.rows[1].is_empty());

    let mut conversation = Conversation::new();
    let item = conversation.submit(&client, "Tickets by segment").await.unwrap();
    let chart = &item.view.as_ref().unwrap().chart;
    assert_eq!(chart.chart_type.as_str(), "line");
    assert_eq!(chart.points[0].label, "VIP");
    assert_eq!(chart.points[0].value, 4.0);

    handle.stop(true).await;
}
