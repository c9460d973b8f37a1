use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, TestApp, extract_token};

#[tokio::test]
async fn register_creates_an_inactive_unverified_owner() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/auth/register",
            &json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": TEST_PASSWORD,
                "company": "Acme Signs",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["email"], json!("jane@example.com"));
    assert_eq!(body["data"]["role"], json!("owner"));
    assert_eq!(body["data"]["isActive"], json!(false));
    assert_eq!(body["data"]["emailVerified"], json!(false));
    assert_eq!(body["data"]["company"], json!("Acme Signs"));
}

#[tokio::test]
async fn register_without_company_is_accepted() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/auth/register",
            &json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": TEST_PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["company"], Value::Null);
}

#[tokio::test]
async fn register_sends_a_verification_email() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let sent = app.email_client.last_sent().await.unwrap();
    assert_eq!(sent.recipient, "jane@example.com");
    assert!(sent.content.contains("verify-email?token="));
    assert!(!extract_token(&sent.content).is_empty());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let response = app
        .post(
            "/auth/register",
            &json!({
                "firstName": "Janet",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": TEST_PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = TestApp::spawn().await;

    for (case, payload) in [
        (
            "bad email",
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "not-an-email",
                "password": TEST_PASSWORD,
            }),
        ),
        (
            "short password",
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": "short",
            }),
        ),
        (
            "blank name",
            json!({
                "firstName": "   ",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": TEST_PASSWORD,
            }),
        ),
        (
            "blank company",
            json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "password": TEST_PASSWORD,
                "company": "   ",
            }),
        ),
    ] {
        let response = app.post("/auth/register", &payload).await;
        assert_eq!(response.status().as_u16(), 400, "case: {case}");
    }
}
