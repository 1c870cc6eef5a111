use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parameters for POST /users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Parameters for POST /token. Form-encoded, mirroring the OAuth2 password
/// flow field names so existing clients keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

/// Parameters for POST /workouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutParams {
    pub workout_type: String,
    pub duration_minutes: f64,
    pub calories_burned: f64,
    /// Defaults to the insertion time when omitted
    pub performed_at: Option<NaiveDateTime>,
}

/// Query parameters for GET /workouts
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutListQuery {
    pub page: Option<i64>,
}
