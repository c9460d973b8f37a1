pub mod hashmap_user_store;
pub mod hashmap_verification_token_store;
pub mod hashset_banned_token_store;
pub mod postgres_user_store;
pub mod redis_banned_token_store;
pub mod redis_verification_token_store;

pub use hashmap_user_store::HashMapUserStore;
pub use hashmap_verification_token_store::HashMapVerificationTokenStore;
pub use hashset_banned_token_store::HashSetBannedTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_banned_token_store::RedisBannedTokenStore;
pub use redis_verification_token_store::RedisVerificationTokenStore;
