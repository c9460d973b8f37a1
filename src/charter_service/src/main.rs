use std::sync::Arc;

use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::Secret;
use tokio::sync::RwLock;

use charter_adapters::{
    config::PortalSetting,
    email::PostmarkEmailClient,
    persistence::{PostgresUserStore, RedisBannedTokenStore, RedisVerificationTokenStore},
};
use charter_core::Email;
use charter_service::{PortalService, configure_postgresql, configure_redis};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().expect("Failed to install color_eyre");
    charter_service::tracing::init_tracing().expect("Failed to initialize tracing");

    let config = PortalSetting::load();

    let pg_pool = configure_postgresql().await;
    let redis_conn = Arc::new(RwLock::new(configure_redis()));

    let user_store = PostgresUserStore::new(pg_pool);
    let banned_token_store = RedisBannedTokenStore::new(
        redis_conn.clone(),
        config.auth.jwt.token_ttl_in_seconds as u64,
    );
    let verification_token_store = RedisVerificationTokenStore::new(redis_conn);

    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        Email::try_from(Secret::from(config.email_client.sender.clone()))?,
        config.email_client.auth_token.clone(),
        http_client,
    );

    let service = PortalService::new(
        user_store,
        banned_token_store,
        verification_token_store,
        email_client,
    );

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;

    service
        .run_standalone(listener, Some(config.app.allowed_origins.clone()))
        .await?;

    Ok(())
}
