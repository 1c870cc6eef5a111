use diesel_async::pooled_connection::deadpool::{self, PoolError};
use diesel_async::pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager};
use diesel_async::AsyncPgConnection;
use redis::aio::MultiplexedConnection;
use std::sync::Arc;
use tokio::sync::Mutex;

const DEFAULT_POOL_SIZE: usize = 20;

/// Shared handle to PostgreSQL and Redis, cloned into every handler
#[derive(Clone)]
pub struct DbClient {
    pub db_pool: Pool<AsyncPgConnection>,
    async_redis_conn: Arc<Mutex<Option<MultiplexedConnection>>>,
    redis_url: String,
}

impl DbClient {
    pub fn new(db_url: &str, redis_url: &str) -> Self {
        Self::with_pool_size(db_url, redis_url, DEFAULT_POOL_SIZE)
    }

    pub fn with_pool_size(db_url: &str, redis_url: &str, pool_size: usize) -> Self {
        let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(db_url);
        let postgres_pool = Pool::builder(config)
            .max_size(pool_size)
            .build()
            .expect("Failed to create DB Pool");

        Self {
            db_pool: postgres_pool,
            async_redis_conn: Arc::new(Mutex::new(None)),
            redis_url: redis_url.to_string(),
        }
    }

    /// Get a connection from the Postgres pool
    pub async fn get_db_conn(&self) -> Result<deadpool::Object<AsyncPgConnection>, PoolError> {
        self.db_pool.get().await
    }

    /// Get async Redis connection (creates one lazily on first use)
    pub async fn get_async_redis_conn(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        let mut conn_guard = self.async_redis_conn.lock().await;

        if conn_guard.is_none() {
            let client = redis::Client::open(self.redis_url.as_str())?;
            let multiplexed_conn = client.get_multiplexed_async_connection().await?;
            *conn_guard = Some(multiplexed_conn);
        }

        // The multiplexed connection is designed to be cloned
        Ok(conn_guard.as_ref().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_db_conn_healthcheck() {
        dotenv::dotenv().ok();
        let (Ok(db_url), Ok(redis_url)) = (
            std::env::var("TEST_DATABASE_URL"),
            std::env::var("TEST_REDIS_URL"),
        ) else {
            return;
        };
        let client = DbClient::new(&db_url, &redis_url);

        let postgres_conn = client.get_db_conn().await;
        let redis_conn = client.get_async_redis_conn().await;

        assert!(postgres_conn.is_ok());
        assert!(redis_conn.is_ok());
    }
}
