use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register_active("jane@example.com", "Jane").await;

    let unknown = app.login("nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(unknown.status().as_u16(), 401);
    let unknown_body: Value = unknown.json().await.unwrap();

    let wrong = app.login("jane@example.com", "wrongwrong").await;
    assert_eq!(wrong.status().as_u16(), 401);
    let wrong_body: Value = wrong.json().await.unwrap();

    assert_eq!(unknown_body["error"], wrong_body["error"]);
}

#[tokio::test]
async fn unverified_email_is_reported_with_the_address() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let response = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 403);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    // The client offers "resend verification" without asking the user to
    // retype the address.
    assert_eq!(body["email"], json!("jane@example.com"));
}

#[tokio::test]
async fn wrong_password_wins_over_unverified_email() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com", "Jane").await;

    let response = app.login("jane@example.com", "wrongwrong").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn verified_but_unapproved_account_is_pending() {
    let app = TestApp::spawn().await;
    app.register_verified("jane@example.com", "Jane").await;

    let response = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 403);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], Value::Null);
}

#[tokio::test]
async fn approved_user_receives_a_session() {
    let app = TestApp::spawn().await;
    let identity = app.register_active("jane@example.com", "Jane").await;

    let response = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["user"]["id"], json!(identity.id));
    assert_eq!(body["data"]["user"]["isActive"], json!(true));
    assert_eq!(
        body["data"]["token"].as_str().unwrap().split('.').count(),
        3
    );
}
