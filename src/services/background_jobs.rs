use crate::api::handlers::workout_summary::compute_and_cache_summary;
use crate::{db::DbClient, Result, CONFIG};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

/// Upper bound on concurrent summary recomputations per refresh cycle
const MAX_CONCURRENT_REFRESHES: usize = 10;

const LAST_EXECUTION_CACHE_KEY: &str = "background_job:last_execution";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Background job manager for periodic tasks
pub struct BackgroundJobManager {
    db_client: DbClient,
}

impl BackgroundJobManager {
    /// Create a new background job manager
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Get background job health status
    pub async fn get_health_status(&self) -> BackgroundJobHealth {
        match self.get_last_job_execution_time().await {
            Ok(last_refresh) => {
                let now = chrono::Utc::now().naive_utc();
                let time_since_refresh = now - last_refresh;
                let expected_interval =
                    chrono::Duration::seconds(CONFIG.summary_refresh_interval_seconds as i64);

                if time_since_refresh > expected_interval * 2 {
                    BackgroundJobHealth {
                        status: "Inactive".to_string(),
                        last_summary_refresh: Some(last_refresh),
                        message: format!(
                            "Last summary refresh was {} seconds ago, expected interval is {} seconds",
                            time_since_refresh.num_seconds(),
                            CONFIG.summary_refresh_interval_seconds
                        ),
                    }
                } else {
                    BackgroundJobHealth {
                        status: "Active".to_string(),
                        last_summary_refresh: Some(last_refresh),
                        message: "Background jobs are running normally".to_string(),
                    }
                }
            }
            Err(_) => BackgroundJobHealth {
                status: "unknown".to_string(),
                last_summary_refresh: None,
                message: "Unable to determine when summaries were last refreshed".to_string(),
            },
        }
    }

    /// Store the timestamp when the background job last executed
    async fn store_job_execution_time(&self, execution_time: chrono::NaiveDateTime) -> Result<()> {
        let timestamp_str = execution_time.format(TIMESTAMP_FORMAT).to_string();
        self.db_client
            .set_cache(LAST_EXECUTION_CACHE_KEY, &timestamp_str)
            .await?;
        Ok(())
    }

    /// Get the timestamp when the background job last executed
    async fn get_last_job_execution_time(&self) -> Result<chrono::NaiveDateTime> {
        let timestamp_str = self.db_client.get_cache(LAST_EXECUTION_CACHE_KEY).await?;

        chrono::NaiveDateTime::parse_from_str(&timestamp_str, TIMESTAMP_FORMAT)
            .map_err(|e| crate::errors::ApiError::Custom(format!("Failed to parse timestamp: {e}")))
    }

    /// Runs one refresh cycle. The execution timestamp is recorded only when
    /// the cycle succeeds, so health reporting cannot show Active while every
    /// cycle is failing.
    async fn run_refresh_cycle(&self) -> Result<usize> {
        let refreshed_count = refresh_active_user_summaries(&self.db_client).await?;

        if let Err(e) = self
            .store_job_execution_time(chrono::Utc::now().naive_utc())
            .await
        {
            warn!("Failed to store job execution time: {:?}", e);
        }

        Ok(refreshed_count)
    }

    /// Start all background jobs
    pub async fn start_all_jobs(&self) {
        info!("Starting background job manager");

        // Start summary refresh job
        let db_client = self.db_client.clone();
        tokio::spawn(async move {
            summary_refresh_job(db_client).await;
        });

        // Start health monitoring job
        let db_client_health = self.db_client.clone();
        tokio::spawn(async move {
            health_monitoring_job(db_client_health).await;
        });

        info!("All background jobs started successfully");
    }
}

/// Health monitoring job that periodically logs background job status
async fn health_monitoring_job(db_client: DbClient) {
    // Run health checks every 30 minutes
    let mut interval = time::interval(Duration::from_secs(1800));
    let bg_manager = BackgroundJobManager::new(db_client);

    info!("Health monitoring job started with 30-minute intervals");

    loop {
        interval.tick().await;

        let health_status = bg_manager.get_health_status().await;
        match health_status.status.as_str() {
            "Active" => info!("Background jobs health check: {}", health_status.message),
            "Inactive" => warn!(
                "Background jobs health check INACTIVE: {}",
                health_status.message
            ),
            _ => warn!(
                "Background jobs health check UNKNOWN: {}",
                health_status.message
            ),
        }
    }
}

/// Background job that periodically re-warms summary caches for users with
/// recent workouts, so their first summary request after the TTL expires does
/// not pay the aggregation cost
async fn summary_refresh_job(db_client: DbClient) {
    let mut interval = time::interval(Duration::from_secs(
        CONFIG.summary_refresh_interval_seconds,
    ));
    let mut consecutive_errors = 0u32;
    const MAX_CONSECUTIVE_ERRORS: u32 = 5;

    info!(
        "Summary refresh job started with interval: {} seconds",
        CONFIG.summary_refresh_interval_seconds
    );

    let bg_manager = BackgroundJobManager::new(db_client);

    loop {
        interval.tick().await;

        info!("Starting summary refresh cycle");
        let start_time = std::time::Instant::now();

        match bg_manager.run_refresh_cycle().await {
            Ok(refreshed_count) => {
                let duration = start_time.elapsed();
                info!(
                    "Summary refresh completed: {} users refreshed in {:?}",
                    refreshed_count, duration
                );
                consecutive_errors = 0;
            }
            Err(e) => {
                consecutive_errors += 1;
                error!(
                    "Summary refresh failed (attempt {}/{}): {:?}",
                    consecutive_errors, MAX_CONSECUTIVE_ERRORS, e
                );

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    error!(
                        "Too many consecutive failures ({}), backing off before the next attempt",
                        consecutive_errors
                    );
                    tokio::time::sleep(Duration::from_secs(300)).await;
                    consecutive_errors = 0;
                }
            }
        }
    }
}

/// Recompute and cache summaries for all recently active users
async fn refresh_active_user_summaries(db_client: &DbClient) -> Result<usize> {
    let user_ids = db_client.get_recently_active_user_ids().await?;

    if user_ids.is_empty() {
        return Ok(0);
    }

    info!("Refreshing summaries for {} users", user_ids.len());

    let refreshed: Vec<()> = stream::iter(user_ids)
        .map(|user_id| {
            let db = db_client.clone();
            async move {
                match compute_and_cache_summary(&db, &user_id).await {
                    Ok(_) => Some(()),
                    Err(e) => {
                        warn!("Failed to refresh summary for user {}: {:?}", user_id, e);
                        None
                    }
                }
            }
        })
        .buffer_unordered(MAX_CONCURRENT_REFRESHES)
        .filter_map(|result| async move { result })
        .collect()
        .await;

    Ok(refreshed.len())
}

/// Background job health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct BackgroundJobHealth {
    pub status: String,
    pub last_summary_refresh: Option<chrono::NaiveDateTime>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_refresh_cycle_does_not_mark_jobs_active() {
        dotenv::dotenv().ok();
        let Ok(redis_url) = std::env::var("TEST_REDIS_URL") else {
            return;
        };
        // Unreachable database: every refresh cycle fails, redis stays up
        let client = DbClient::new("postgres://127.0.0.1:1/unreachable", &redis_url);
        let manager = BackgroundJobManager::new(client.clone());

        let _ = client.invalidate_cache(LAST_EXECUTION_CACHE_KEY).await;

        assert!(manager.run_refresh_cycle().await.is_err());

        // No execution timestamp was recorded, so health must not report Active
        let health = manager.get_health_status().await;
        assert_ne!(health.status, "Active");
        assert!(health.last_summary_refresh.is_none());
    }
}
