use crate::auth::AuthenticatedUser;
use crate::db::models::{
    ApiResponse, ErrorResponse, PaginationMeta, Status, WorkoutListQuery, WorkoutListResponse,
    WorkoutResponse,
};
use crate::db::workouts::PER_PAGE;
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use axum::extract::{Query, State};
use axum::{http::StatusCode, Json};
use tracing::{error, info};

// Route handler for GET /workouts which returns a page of the authenticated
// user's workout history, newest first
pub(crate) async fn list_workouts(
    State(db): State<DbClient>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<WorkoutListQuery>,
) -> (StatusCode, Json<ApiResponse>) {
    let page = query.page.unwrap_or(1).max(1);
    info!(
        "Fetching workouts page {} for user: {}",
        page, user.username
    );

    match db.get_workouts_page(&user.id, page).await {
        Ok((workouts, total)) => {
            let response = WorkoutListResponse {
                meta: PaginationMeta::new(total, page, PER_PAGE),
                workouts: workouts.into_iter().map(WorkoutResponse::from).collect(),
            };
            (StatusCode::OK, Json(response.into()))
        }
        Err(e) => {
            error!("Error fetching workouts from database: {:?}", e);
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
