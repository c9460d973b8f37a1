use secrecy::Secret;
use serde_json::{Value, json};

use charter_adapters::config::constants::test::APP_ADDRESS;
use charter_adapters::email::MockEmailClient;
use charter_adapters::persistence::{
    HashMapUserStore, HashMapVerificationTokenStore, HashSetBannedTokenStore,
};
use charter_core::{Email, Identity, Password, PersonName, Role, User, UserStore};
use charter_service::PortalService;

pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub http: reqwest::Client,
    pub email_client: MockEmailClient,
    pub user_store: HashMapUserStore,
}

impl TestApp {
    /// Spawn the service on an ephemeral port with in-memory stores.
    pub async fn spawn() -> Self {
        let user_store = HashMapUserStore::new();
        let banned_token_store = HashSetBannedTokenStore::new();
        let verification_token_store = HashMapVerificationTokenStore::new();
        let email_client = MockEmailClient::new();

        let service = PortalService::new(
            user_store.clone(),
            banned_token_store,
            verification_token_store,
            email_client.clone(),
        );

        let listener = tokio::net::TcpListener::bind(APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http: reqwest::Client::new(),
            email_client,
            user_store,
        }
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.http
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http.get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Request failed")
    }

    pub async fn put(&self, path: &str, body: &Value, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http.put(format!("{}{}", self.address, path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Request failed")
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http.delete(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Request failed")
    }

    /// Register a user through the API and return the created identity.
    pub async fn register(&self, email: &str, first_name: &str) -> Identity {
        let response = self
            .post(
                "/auth/register",
                &json!({
                    "firstName": first_name,
                    "lastName": "Tester",
                    "email": email,
                    "password": TEST_PASSWORD,
                    "company": "Acme Signs",
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = response.json().await.expect("Invalid response body");
        serde_json::from_value(body["data"].clone()).expect("Invalid identity payload")
    }

    /// Register and consume the emailed verification link.
    pub async fn register_verified(&self, email: &str, first_name: &str) -> Identity {
        let identity = self.register(email, first_name).await;

        let sent = self.email_client.last_sent().await.expect("No email sent");
        let token = extract_token(&sent.content);

        let response = self
            .post("/auth/verify-email", &json!({ "token": token }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        identity
    }

    /// Register, verify and approve, leaving the user able to sign in.
    pub async fn register_active(&self, email: &str, first_name: &str) -> Identity {
        let identity = self.register_verified(email, first_name).await;
        self.user_store
            .activate_user(identity.id)
            .await
            .expect("Failed to activate user");
        identity
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post(
            "/auth/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Sign in and return only the session token.
    pub async fn login_token(&self, email: &str) -> String {
        let response = self.login(email, TEST_PASSWORD).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.expect("Invalid response body");
        body["data"]["token"]
            .as_str()
            .expect("Missing session token")
            .to_string()
    }

    /// Seed an administrator directly in the store and sign in through the
    /// API.
    pub async fn admin_token(&self) -> String {
        let user = User::new(
            PersonName::parse("Avery", "Admin").unwrap(),
            Email::try_from(Secret::from("admin@example.com".to_string())).unwrap(),
            Password::try_from(Secret::from(TEST_PASSWORD.to_string())).unwrap(),
            Role::Admin,
            None,
        )
        .unwrap();

        let identity = self.user_store.add_user(user).await.unwrap();
        self.user_store
            .mark_email_verified(&identity.email)
            .await
            .unwrap();
        self.user_store.activate_user(identity.id).await.unwrap();

        self.login_token("admin@example.com").await
    }
}

/// Pull the verification token out of an emailed link.
pub fn extract_token(content: &str) -> String {
    content
        .split("token=")
        .nth(1)
        .expect("Email does not contain a token link")
        .split_whitespace()
        .next()
        .expect("Malformed token link")
        .to_string()
}
