use crate::auth::AuthenticatedUser;
use crate::db::cache::summary_cache_key;
use crate::db::models::{ApiResponse, ErrorResponse, Status, WorkoutSummaryResponse};
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use crate::Result;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, warn};

// Route handler for GET /workouts/summary which returns per-type aggregates
// for the authenticated user, served from cache when fresh
pub(crate) async fn get_workout_summary(
    State(db): State<DbClient>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> (StatusCode, Json<ApiResponse>) {
    let cache_key = summary_cache_key(&user.id);

    if let Ok(cached) = db.get_cache(&cache_key).await {
        match serde_json::from_str::<WorkoutSummaryResponse>(&cached) {
            Ok(summary) => {
                info!("Summary cache hit for user: {}", user.username);
                return (StatusCode::OK, Json(summary.into()));
            }
            Err(e) => {
                // Stale shape from an older release; recompute below
                warn!("Discarding undecodable cached summary: {}", e);
            }
        }
    }

    match compute_and_cache_summary(&db, &user.id).await {
        Ok(summary) => (StatusCode::OK, Json(summary.into())),
        Err(e) => {
            error!("Error computing workout summary: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorResponse {
                        status: Status::Error,
                        error: ErrorMessages::DB.to_string(),
                    }
                    .into(),
                ),
            )
        }
    }
}

/// Computes a user's summary from the database and writes it to the cache.
/// Also used by the background refresh job.
pub(crate) async fn compute_and_cache_summary(
    db: &DbClient,
    user_id: &str,
) -> Result<WorkoutSummaryResponse> {
    let by_type = db.get_workout_type_summaries(user_id).await?;
    let summary = WorkoutSummaryResponse::from_type_summaries(by_type);

    match serde_json::to_string(&summary) {
        Ok(encoded) => {
            if let Err(e) = db.set_cache(&summary_cache_key(user_id), &encoded).await {
                warn!("Failed to cache workout summary: {:?}", e);
            }
        }
        Err(e) => warn!("Failed to encode workout summary for cache: {}", e),
    }

    Ok(summary)
}
