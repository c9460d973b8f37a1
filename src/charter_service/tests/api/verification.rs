use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, TestApp, extract_token};

#[tokio::test]
async fn verification_link_is_single_use() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let sent = app.email_client.last_sent().await.unwrap();
    let token = extract_token(&sent.content);

    let first = app
        .post("/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .post("/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(second.status().as_u16(), 400);
}

#[tokio::test]
async fn unknown_or_missing_token_is_rejected() {
    let app = TestApp::spawn().await;

    let unknown = app
        .post("/auth/verify-email", &json!({ "token": "not-a-real-token" }))
        .await;
    assert_eq!(unknown.status().as_u16(), 400);

    let missing = app.post("/auth/verify-email", &json!({ "token": "  " })).await;
    assert_eq!(missing.status().as_u16(), 400);
}

#[tokio::test]
async fn resend_verification_answers_uniformly() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let known = app
        .post(
            "/auth/resend-verification",
            &json!({ "email": "jane@example.com" }),
        )
        .await;
    assert_eq!(known.status().as_u16(), 200);
    let known_body: Value = known.json().await.unwrap();

    let unknown = app
        .post(
            "/auth/resend-verification",
            &json!({ "email": "nobody@example.com" }),
        )
        .await;
    assert_eq!(unknown.status().as_u16(), 200);
    let unknown_body: Value = unknown.json().await.unwrap();

    assert_eq!(known_body, unknown_body);

    // Only the known address actually received a second email.
    assert_eq!(app.email_client.sent().await.len(), 2);
}

#[tokio::test]
async fn resent_link_verifies_the_account() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    app.post(
        "/auth/resend-verification",
        &json!({ "email": "jane@example.com" }),
    )
    .await;

    let sent = app.email_client.last_sent().await.unwrap();
    let token = extract_token(&sent.content);

    let response = app
        .post("/auth/verify-email", &json!({ "token": token }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Verified but still pending approval.
    let login = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(login.status().as_u16(), 403);
    let body: Value = login.json().await.unwrap();
    assert_eq!(body["email"], Value::Null);
}

#[tokio::test]
async fn already_verified_accounts_are_not_emailed_again() {
    let app = TestApp::spawn().await;
    app.register_verified("jane@example.com", "Jane").await;
    let baseline = app.email_client.sent().await.len();

    let response = app
        .post(
            "/auth/resend-verification",
            &json!({ "email": "jane@example.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.email_client.sent().await.len(), baseline);
}
