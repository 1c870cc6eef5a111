use crate::auth::AuthenticatedUser;
use crate::db::cache::summary_cache_key;
use crate::db::models::{
    ApiResponse, ErrorResponse, Status, Workout, WorkoutParams, WorkoutResponse,
};
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use crate::validation::validate_workout;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, warn};

// Route handler for POST /workouts which logs a workout for the
// authenticated user
pub(crate) async fn create_workout(
    State(db): State<DbClient>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<WorkoutParams>,
) -> (StatusCode, Json<ApiResponse>) {
    if let Err(message) = validate_workout(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse {
                    status: Status::Error,
                    error: message,
                }
                .into(),
            ),
        );
    }

    let workout = Workout::new(&user.id, &payload);
    if let Err(e) = db.insert_workout(&workout).await {
        error!("Error inserting workout into database: {:?}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(
                ErrorResponse {
                    status: Status::Error,
                    error: ErrorMessages::DB.to_string(),
                }
                .into(),
            ),
        );
    }

    // The cached summary is stale now; drop it rather than recompute inline
    if let Err(e) = db.invalidate_cache(&summary_cache_key(&user.id)).await {
        warn!("Failed to invalidate summary cache: {:?}", e);
    }

    info!(
        "Logged {} workout for user: {}",
        workout.workout_type, user.username
    );
    (
        StatusCode::CREATED,
        Json(WorkoutResponse::from(workout).into()),
    )
}
