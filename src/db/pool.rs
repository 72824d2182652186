use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 10;

pub async fn create_pool(database_url: &str) -> PgPool {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .expect("Failed to create database pool")
}
