use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{User, Workout};

/// General API response status
/// Used to indicate success or failure of operations
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Operation completed successfully
    Success,
    /// Operation encountered an error
    Error,
}

/// Standard error response structure
/// Used when an operation fails
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status will always be Error for this type
    pub status: Status,
    /// Detailed error message explaining what went wrong
    pub error: String,
}

/// Public view of a user account. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response for POST /token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Public view of a logged workout
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: String,
    pub workout_type: String,
    pub duration_minutes: f64,
    pub calories_burned: f64,
    pub performed_at: NaiveDateTime,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        WorkoutResponse {
            id: workout.id,
            workout_type: workout.workout_type,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            performed_at: workout.performed_at,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Computes metadata for a page. Pages are 1-based; anything below 1 is
    /// clamped the same way the query layer clamps it.
    pub fn new(total: i64, page: i64, items_per_page: i64) -> Self {
        let page = page.max(1);
        let total_pages = if total == 0 {
            0
        } else {
            (total + items_per_page - 1) / items_per_page
        };
        PaginationMeta {
            total,
            page,
            total_pages,
            items_per_page,
            has_next_page: page < total_pages,
            has_prev_page: page > 1 && total_pages > 0,
        }
    }
}

/// Response for GET /workouts
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutListResponse {
    pub meta: PaginationMeta,
    pub workouts: Vec<WorkoutResponse>,
}

/// Per-type aggregate used inside the workout summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTypeSummary {
    pub workout_type: String,
    pub workouts: i64,
    pub duration_minutes: f64,
    pub calories_burned: f64,
}

/// Response for GET /workouts/summary
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutSummaryResponse {
    pub total_workouts: i64,
    pub total_duration_minutes: f64,
    pub total_calories_burned: f64,
    pub by_type: Vec<WorkoutTypeSummary>,
}

impl WorkoutSummaryResponse {
    /// Rolls up per-type aggregates into overall totals
    pub fn from_type_summaries(by_type: Vec<WorkoutTypeSummary>) -> Self {
        let total_workouts = by_type.iter().map(|t| t.workouts).sum();
        let total_duration_minutes = by_type.iter().map(|t| t.duration_minutes).sum();
        let total_calories_burned = by_type.iter().map(|t| t.calories_burned).sum();
        WorkoutSummaryResponse {
            total_workouts,
            total_duration_minutes,
            total_calories_burned,
            by_type,
        }
    }
}

/// Wrapper for successful responses
/// Allows for different types of success responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuccessResponse {
    /// Response for user registration
    User(UserResponse),
    /// Response for login
    Token(TokenResponse),
    /// Response for a single logged workout
    Workout(WorkoutResponse),
    /// Response for a page of workouts
    WorkoutList(WorkoutListResponse),
    /// Response for the workout summary
    Summary(WorkoutSummaryResponse),
}

/// Main API response enum
/// Encompasses all possible API response types
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

/// Conversion implementations for ApiResponse
impl From<UserResponse> for ApiResponse {
    fn from(value: UserResponse) -> Self {
        Self::Success(SuccessResponse::User(value))
    }
}

/// Conversion implementations for ApiResponse
impl From<TokenResponse> for ApiResponse {
    fn from(value: TokenResponse) -> Self {
        Self::Success(SuccessResponse::Token(value))
    }
}

/// Conversion implementations for ApiResponse
impl From<WorkoutResponse> for ApiResponse {
    fn from(value: WorkoutResponse) -> Self {
        Self::Success(SuccessResponse::Workout(value))
    }
}

/// Conversion implementations for ApiResponse
impl From<WorkoutListResponse> for ApiResponse {
    fn from(value: WorkoutListResponse) -> Self {
        Self::Success(SuccessResponse::WorkoutList(value))
    }
}

/// Conversion implementations for ApiResponse
impl From<WorkoutSummaryResponse> for ApiResponse {
    fn from(value: WorkoutSummaryResponse) -> Self {
        Self::Success(SuccessResponse::Summary(value))
    }
}

/// Conversion implementations for ApiResponse
impl From<ErrorResponse> for ApiResponse {
    fn from(value: ErrorResponse) -> Self {
        Self::Error(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_middle_page() {
        let meta = PaginationMeta::new(45, 2, 20);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(0, 1, 20);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_pagination_meta_clamps_page() {
        let meta = PaginationMeta::new(10, -3, 20);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_summary_rollup() {
        let summary = WorkoutSummaryResponse::from_type_summaries(vec![
            WorkoutTypeSummary {
                workout_type: "cycling".to_string(),
                workouts: 2,
                duration_minutes: 90.0,
                calories_burned: 800.0,
            },
            WorkoutTypeSummary {
                workout_type: "running".to_string(),
                workouts: 3,
                duration_minutes: 85.0,
                calories_burned: 700.0,
            },
        ]);

        assert_eq!(summary.total_workouts, 5);
        assert_eq!(summary.total_duration_minutes, 175.0);
        assert_eq!(summary.total_calories_burned, 1500.0);
    }

    #[test]
    fn test_error_envelope_shape() {
        let response: ApiResponse = ErrorResponse {
            status: Status::Error,
            error: "boom".to_string(),
        }
        .into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_success_envelope_is_untagged() {
        let response: ApiResponse = TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 1800,
        }
        .into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["access_token"], "abc");
        assert!(value.get("status").is_none());
    }
}
