use super::DbClient;
use crate::errors::ApiError;
use crate::{Result, CONFIG};
use redis::AsyncCommands;

/// Cache key for a user's workout summary
pub fn summary_cache_key(user_id: &str) -> String {
    format!("workout_summary:{user_id}")
}

impl DbClient {
    /// Store a value with the configured summary TTL
    pub async fn set_cache(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.get_async_redis_conn().await.map_err(|err| {
            tracing::error!("Redis connection error: {}", err);
            ApiError::from(err)
        })?;

        let _: () = conn
            .set_ex(key, value, CONFIG.summary_cache_ttl_seconds)
            .await
            .map_err(|err| {
                tracing::error!("Redis SET failed: {}", err);
                ApiError::from(err)
            })?;
        tracing::info!("Cache set for key: {}", key);
        Ok(())
    }

    /// Fetch a cached value, treating a missing key as NotFound
    pub async fn get_cache(&self, key: &str) -> Result<String> {
        let mut conn = self.get_async_redis_conn().await.map_err(|err| {
            tracing::error!("Redis connection error: {}", err);
            ApiError::from(err)
        })?;

        let value: Option<String> = conn.get(key).await.map_err(|err| {
            tracing::error!("Redis GET failed: {}", err);
            ApiError::from(err)
        })?;

        value.ok_or_else(|| ApiError::NotFound(key.to_string()))
    }

    /// Drop a cached value, typically after the underlying data changed
    pub async fn invalidate_cache(&self, key: &str) -> Result<()> {
        let mut conn = self.get_async_redis_conn().await.map_err(|err| {
            tracing::error!("Redis connection error: {}", err);
            ApiError::from(err)
        })?;

        let _: () = conn.del(key).await.map_err(|err| {
            tracing::error!("Redis DEL failed: {}", err);
            ApiError::from(err)
        })?;
        tracing::info!("Cache invalidated for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_cache_key_shape() {
        assert_eq!(summary_cache_key("abc-123"), "workout_summary:abc-123");
    }
}
