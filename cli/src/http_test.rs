use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chat::{ChatWidget, RETRY_FALLBACK, Role, WidgetConfig};
use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn service_for(addr: SocketAddr) -> ReqwestChatService {
    ReqwestChatService::new(&format!("http://{addr}/api/chat"), Duration::from_secs(5)).expect("service")
}

fn widget_for(service: &ReqwestChatService) -> ChatWidget {
    ChatWidget::new(WidgetConfig::with_endpoint(service.endpoint().as_str()).greeting(None))
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    let message = body["message"].as_str().unwrap_or_default();
    Json(json!({ "success": true, "response": format!("echo: {message}") }))
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_rejects_non_http_urls() {
    let timeout = Duration::from_secs(1);
    assert!(matches!(ReqwestChatService::new("not a url", timeout), Err(CliError::InvalidApiUrl(_))));
    assert!(matches!(ReqwestChatService::new("ftp://host/api/chat", timeout), Err(CliError::InvalidApiUrl(_))));
}

#[test]
fn health_url_replaces_path_and_query() {
    let service =
        ReqwestChatService::new("https://chat.example.test/api/chat?v=2", Duration::from_secs(1)).expect("service");
    assert_eq!(service.health_url().as_str(), "https://chat.example.test/health");
}

// =============================================================
// ChatService over HTTP
// =============================================================

#[tokio::test]
async fn send_posts_json_message_body() {
    let addr = serve(Router::new().route("/api/chat", post(echo))).await;
    let reply = service_for(addr).send("hi").await.expect("reply");
    assert_eq!(reply.text(), Some("echo: hi"));
}

#[tokio::test]
async fn send_maps_non_2xx_to_status_error() {
    let app = Router::new().route("/api/chat", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let addr = serve(app).await;
    let err = service_for(addr).send("hi").await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Status { status: 500 }));
}

#[tokio::test]
async fn send_maps_non_json_body_to_decode_error() {
    let app = Router::new().route("/api/chat", post(|| async { "<html>oops</html>" }));
    let addr = serve(app).await;
    let err = service_for(addr).send("hi").await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[tokio::test]
async fn send_to_closed_port_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let err = service_for(addr).send("hi").await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Transport(_)));
}

// =============================================================
// Widget scenarios end to end
// =============================================================

#[tokio::test]
async fn widget_shows_success_reply() {
    let app = Router::new().route("/api/chat", post(|| async { Json(json!({ "success": true, "response": "Hello!" })) }));
    let service = service_for(serve(app).await);
    let mut widget = widget_for(&service);

    widget.set_draft("hi");
    widget.submit(&service).await;

    let turns: Vec<_> = widget.turns().iter().map(|t| (t.role(), t.text().to_owned())).collect();
    assert_eq!(turns, vec![(Role::User, "hi".to_owned()), (Role::Bot, "Hello!".to_owned())]);
}

#[tokio::test]
async fn widget_shows_retry_fallback_on_logical_failure() {
    let app = Router::new().route("/api/chat", post(|| async { Json(json!({ "success": false })) }));
    let service = service_for(serve(app).await);
    let mut widget = widget_for(&service);

    widget.set_draft("???");
    let turn = widget.submit(&service).await.cloned().expect("bot turn");
    assert_eq!(turn.text(), RETRY_FALLBACK);
}

#[tokio::test]
async fn widget_ignores_non_string_response_on_failure() {
    let app = Router::new().route("/api/chat", post(|| async { Json(json!({ "success": false, "response": 123 })) }));
    let service = service_for(serve(app).await);
    let mut widget = widget_for(&service);

    widget.set_draft("???");
    let turn = widget.submit(&service).await.cloned().expect("bot turn");
    assert_eq!(turn.text(), RETRY_FALLBACK);
}

#[tokio::test]
async fn widget_shows_unreachable_fallback_when_service_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let service = service_for(addr);
    let mut widget = widget_for(&service);
    widget.set_draft("test");
    let turn = widget.submit(&service).await.cloned().expect("bot turn");

    assert_eq!(widget.turns()[0].text(), "test");
    assert_eq!(turn.text(), widget.config().unreachable_fallback());
    assert!(!widget.controls_disabled());
}

// =============================================================
// Health
// =============================================================

#[tokio::test]
async fn health_returns_json_body() {
    let app = Router::new().route("/health", get(|| async { Json(json!({ "status": "healthy" })) }));
    let addr = serve(app).await;
    let body = service_for(addr).health().await.expect("health");
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn health_non_2xx_is_unhealthy() {
    let app = Router::new().route("/health", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let addr = serve(app).await;
    let err = service_for(addr).health().await.expect_err("should fail");
    assert!(matches!(err, CliError::Unhealthy { status: 503 }));
}
