use serde_json::{Value, json};

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn listing_requires_an_admin_session() {
    let app = TestApp::spawn().await;
    app.register_active("owner@example.com", "Olive").await;
    let owner_token = app.login_token("owner@example.com").await;

    let anonymous = app.get("/users?isActive=false", None).await;
    assert_eq!(anonymous.status().as_u16(), 401);

    let as_owner = app.get("/users?isActive=false", Some(&owner_token)).await;
    assert_eq!(as_owner.status().as_u16(), 403);
}

#[tokio::test]
async fn empty_listing_reports_zero_total() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.get("/users?isActive=false", Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], json!(0));
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn listing_shows_pending_users_only() {
    let app = TestApp::spawn().await;
    app.register("ada@example.com", "Ada").await;
    app.register("bea@example.com", "Bea").await;
    app.register_active("cal@example.com", "Cal").await;
    let token = app.admin_token().await;

    let response = app.get("/users?isActive=false", Some(&token)).await;
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["total"], json!(2));
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["email"].as_str().unwrap())
        .collect();
    assert!(emails.contains(&"ada@example.com"));
    assert!(emails.contains(&"bea@example.com"));
    assert!(!emails.contains(&"cal@example.com"));
}

#[tokio::test]
async fn listing_supports_search_and_name_sort() {
    let app = TestApp::spawn().await;
    app.register("cal@example.com", "Cal").await;
    app.register("ada@example.com", "Ada").await;
    app.register("bea@example.com", "Bea").await;
    let token = app.admin_token().await;

    let sorted = app
        .get("/users?isActive=false&sort=name", Some(&token))
        .await;
    let body: Value = sorted.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ada", "Bea", "Cal"]);

    let searched = app
        .get("/users?isActive=false&search=BEA", Some(&token))
        .await;
    let body: Value = searched.json().await.unwrap();
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["data"][0]["email"], json!("bea@example.com"));
}

#[tokio::test]
async fn total_is_stable_across_pages() {
    let app = TestApp::spawn().await;
    for i in 0..5 {
        app.register(&format!("user{i}@example.com"), "User").await;
    }
    let token = app.admin_token().await;

    let page_one = app
        .get("/users?isActive=false&page=1&limit=2", Some(&token))
        .await;
    let body_one: Value = page_one.json().await.unwrap();
    assert_eq!(body_one["total"], json!(5));
    assert_eq!(body_one["data"].as_array().unwrap().len(), 2);

    let page_three = app
        .get("/users?isActive=false&page=3&limit=2", Some(&token))
        .await;
    let body_three: Value = page_three.json().await.unwrap();
    assert_eq!(body_three["total"], json!(5));
    assert_eq!(body_three["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_sort_key_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .get("/users?isActive=false&sort=email", Some(&token))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn approval_lets_the_user_sign_in() {
    let app = TestApp::spawn().await;
    let identity = app.register_verified("jane@example.com", "Jane").await;
    let token = app.admin_token().await;

    let response = app
        .put(
            &format!("/users/{}", identity.id),
            &json!({ "isActive": true }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isActive"], json!(true));
    assert_eq!(body["data"]["alreadyActive"], json!(false));

    let login = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(login.status().as_u16(), 200);

    // Approved users drop out of the pending listing.
    let listing = app.get("/users?isActive=false", Some(&token)).await;
    let listing_body: Value = listing.json().await.unwrap();
    assert_eq!(listing_body["total"], json!(0));
}

#[tokio::test]
async fn double_approval_is_a_no_op() {
    let app = TestApp::spawn().await;
    let identity = app.register_verified("jane@example.com", "Jane").await;
    let token = app.admin_token().await;

    let path = format!("/users/{}", identity.id);
    app.put(&path, &json!({ "isActive": true }), Some(&token))
        .await;

    let second = app
        .put(&path, &json!({ "isActive": true }), Some(&token))
        .await;
    assert_eq!(second.status().as_u16(), 200);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["data"]["alreadyActive"], json!(true));
}

#[tokio::test]
async fn deactivation_is_not_supported() {
    let app = TestApp::spawn().await;
    let identity = app.register_verified("jane@example.com", "Jane").await;
    let token = app.admin_token().await;

    let response = app
        .put(
            &format!("/users/{}", identity.id),
            &json!({ "isActive": false }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn rejection_removes_the_account_permanently() {
    let app = TestApp::spawn().await;
    let identity = app.register_verified("jane@example.com", "Jane").await;
    let token = app.admin_token().await;

    let path = format!("/users/{}", identity.id);
    let response = app.delete(&path, Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);

    // The rejected user cannot sign in and gets the generic error.
    let login = app.login("jane@example.com", TEST_PASSWORD).await;
    assert_eq!(login.status().as_u16(), 401);

    // A stale approval for the removed user is a 404, not a resurrection.
    let approve = app
        .put(&path, &json!({ "isActive": true }), Some(&token))
        .await;
    assert_eq!(approve.status().as_u16(), 404);

    let second_delete = app.delete(&path, Some(&token)).await;
    assert_eq!(second_delete.status().as_u16(), 404);
}

#[tokio::test]
async fn approval_requires_an_admin_session() {
    let app = TestApp::spawn().await;
    let identity = app.register_verified("jane@example.com", "Jane").await;
    app.register_active("owner@example.com", "Olive").await;
    let owner_token = app.login_token("owner@example.com").await;

    let response = app
        .put(
            &format!("/users/{}", identity.id),
            &json!({ "isActive": true }),
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status().as_u16(), 403);
}
