use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

use charter_adapters::config::PortalSetting;

/// Connection pool for the configured PostgreSQL database, with all
/// pending migrations applied.
///
/// # Panics
/// Panics if the pool cannot be created or a migration fails.
pub async fn configure_postgresql() -> PgPool {
    let config = PortalSetting::load();
    let db_url = config.postgres.url.expose_secret();

    let pg_pool = get_postgres_pool(db_url)
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Connection to the configured Redis instance.
///
/// # Panics
/// Panics if the connection cannot be established.
pub fn configure_redis() -> redis::Connection {
    let redis_host_name = &PortalSetting::load().redis.host_name;

    get_redis_client(redis_host_name)
        .expect("Failed to get Redis client")
        .get_connection()
        .expect("Failed to get Redis connection")
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
