//! HTTP-level tests driving the router in process

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use outreach_rs::api::ApiServer;
use outreach_rs::delivery::NoopTransport;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn setup_server() -> ApiServer {
    ApiServer::new(Arc::new(NoopTransport), "127.0.0.1:0".to_string())
}

/// Send one request and return status plus decoded JSON body
async fn call(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn seed_nonprofits(server: &ApiServer) {
    let (status, _) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!([
            {"name": "Helping Hands", "address": "123 Charity St", "email": "helping@nonprofit.org"},
            {"name": "Food For All", "address": "456 Kindness Ave", "email": "food@nonprofit.org"}
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health() {
    let server = setup_server();
    let (status, body) = call(server.router(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "outreach-rs");
}

#[tokio::test]
async fn test_add_nonprofits() {
    let server = setup_server();

    let (status, body) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!([
            {"name": "Helping Hands", "address": "123 Charity St", "email": "helping@nonprofit.org"},
            {"name": "Food For All", "address": "456 Kindness Ave", "email": "food@nonprofit.org"}
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "2 nonprofit(s) created");

    let org = server.state().registry.lookup("helping@nonprofit.org").await.unwrap();
    assert_eq!(org.name, "Helping Hands");
}

#[tokio::test]
async fn test_add_nonprofits_twice_counts_zero() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!([
            {"name": "Helping Hands Again", "address": "999 Other St", "email": "helping@nonprofit.org"}
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "0 nonprofit(s) created");
}

#[tokio::test]
async fn test_post_then_get_nonprofits() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(server.router(), "GET", "/nonprofits", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(
        list[0],
        json!({"name": "Helping Hands", "address": "123 Charity St", "email": "helping@nonprofit.org"})
    );
    assert_eq!(list[1]["email"], "food@nonprofit.org");
}

#[tokio::test]
async fn test_nonprofits_payload_must_be_list() {
    let server = setup_server();

    let (status, body) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!({"name": "Solo", "address": "1 St", "email": "solo@n.org"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Expected a list of nonprofits");

    let (status, body) = call(server.router(), "POST", "/nonprofits", Some(json!(["not an object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Expected a list of nonprofits");
    assert!(server.state().registry.is_empty().await);
}

#[tokio::test]
async fn test_nonprofit_wrong_field_type() {
    let server = setup_server();

    let (status, body) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!([
            {"name": "Fine", "address": "1 Full St", "email": "fine@n.org"},
            {"name": 5, "address": "2 Half St", "email": "five@n.org"}
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Entry 1 has an invalid field"));
    assert!(error.contains("invalid type"));

    // Decoding fails before any entry is inserted
    assert!(server.state().registry.is_empty().await);
}

#[tokio::test]
async fn test_nonprofit_missing_field() {
    let server = setup_server();

    let (status, body) = call(
        server.router(),
        "POST",
        "/nonprofits",
        Some(json!([
            {"name": "Complete", "address": "1 Full St", "email": "complete@n.org"},
            {"name": "No Email", "address": "2 Half St"}
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));

    // Entries before the malformed one stay registered
    assert!(server.state().registry.lookup("complete@n.org").await.is_some());
    assert_eq!(server.state().registry.len().await, 1);
}

#[tokio::test]
async fn test_send_emails_and_list() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(
        server.router(),
        "POST",
        "/send_emails",
        Some(json!({
            "template": "Hello {name}, we will visit {address}.",
            "recipients": ["helping@nonprofit.org", "unknown@nonprofit.org"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sent"], json!(["helping@nonprofit.org"]));
    assert_eq!(body["skipped"], json!(["unknown@nonprofit.org"]));

    let (status, emails) = call(server.router(), "GET", "/emails", None).await;
    assert_eq!(status, StatusCode::OK);
    let emails = emails.as_array().unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0]["to"], "helping@nonprofit.org");
    assert_eq!(emails[0]["body"], "Hello Helping Hands, we will visit 123 Charity St.");
    assert_eq!(emails[0]["cc"], json!([]));
    assert!(emails[0]["sent_at"].is_string());
}

#[tokio::test]
async fn test_send_emails_missing_template_field() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(
        server.router(),
        "POST",
        "/send_emails",
        Some(json!({
            "template": "Hello {name}, ref {ticket}",
            "recipients": ["helping@nonprofit.org", "food@nonprofit.org"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("ticket"));
    assert!(server.state().audit.is_empty().await);
}

#[tokio::test]
async fn test_send_emails_malformed_template() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(
        server.router(),
        "POST",
        "/send_emails",
        Some(json!({
            "template": "Hi {name",
            "recipients": ["helping@nonprofit.org"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(server.state().audit.is_empty().await);
}

#[tokio::test]
async fn test_send_emails_invalid_request() {
    let server = setup_server();

    let (status, _) = call(
        server.router(),
        "POST",
        "/send_emails",
        Some(json!({"recipients": ["helping@nonprofit.org"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        server.router(),
        "POST",
        "/send_emails",
        Some(json!({"template": "Hi {name", "recipients": []})),
    )
    .await;
    // Nobody resolves, so the template is never rendered
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_emails_for_address() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    for template in ["One {name}", "Two {name}"] {
        let (status, _) = call(
            server.router(),
            "POST",
            "/send_emails",
            Some(json!({
                "template": template,
                "recipients": ["food@nonprofit.org", "helping@nonprofit.org"],
                "cc": ["board@nonprofit.org"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = call(server.router(), "GET", "/emails/FOOD@nonprofit.org", None).await;

    assert_eq!(status, StatusCode::OK);
    let emails = body.as_array().unwrap();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0]["body"], "One Food For All");
    assert_eq!(emails[1]["body"], "Two Food For All");
    assert_eq!(emails[1]["cc"], json!(["board@nonprofit.org"]));
}

#[tokio::test]
async fn test_draft_lifecycle() {
    let server = setup_server();
    seed_nonprofits(&server).await;

    let (status, body) = call(
        server.router(),
        "POST",
        "/drafts",
        Some(json!({"template": "Hi {name}", "recipients": ["helping@nonprofit.org"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["draft_id"].as_str().unwrap().to_string();

    let (status, draft) = call(server.router(), "GET", &format!("/drafts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["template"], "Hi {name}");
    assert_eq!(draft["cc"], json!([]));
    assert_eq!(draft["status"], "open");

    let (status, updated) = call(
        server.router(),
        "PUT",
        &format!("/drafts/{}", id),
        Some(json!({"recipients": ["food@nonprofit.org", "nobody@nonprofit.org"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["template"], "Hi {name}");
    assert_eq!(updated["recipients"], json!(["food@nonprofit.org", "nobody@nonprofit.org"]));

    let (status, report) = call(server.router(), "POST", &format!("/drafts/{}/send", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["sent"], json!(["food@nonprofit.org"]));
    assert_eq!(report["skipped"], json!(["nobody@nonprofit.org"]));

    let (status, _) = call(server.router(), "GET", &format!("/drafts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(server.router(), "POST", &format!("/drafts/{}/send", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));

    let (_, emails) = call(server.router(), "GET", "/emails", None).await;
    assert_eq!(emails.as_array().unwrap().len(), 1);
    assert_eq!(emails[0]["body"], "Hi Food For All");
}

#[tokio::test]
async fn test_update_unknown_draft() {
    let server = setup_server();

    let (status, _) = call(
        server.router(),
        "PUT",
        "/drafts/does-not-exist",
        Some(json!({"template": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(server.router(), "PUT", "/drafts/does-not-exist", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_draft_requires_recipients() {
    let server = setup_server();

    let (status, _) = call(server.router(), "POST", "/drafts", Some(json!({"template": "Hi"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(server.state().drafts.is_empty().await);
}
