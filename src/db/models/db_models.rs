use crate::schema::{users, workouts};
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{RegisterUserParams, WorkoutParams};

#[derive(
    Clone, Debug, Serialize, Deserialize, Insertable, Identifiable, Queryable, AsChangeset,
)]
#[diesel(table_name = users, primary_key(id))]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Builds a new user row from registration params and an already-hashed password
    pub fn new(params: &RegisterUserParams, hashed_password: String) -> Self {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            username: params.username.trim().to_string(),
            email: params.email.trim().to_string(),
            hashed_password,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Clone, Debug, Serialize, Deserialize, Insertable, Identifiable, Queryable, AsChangeset,
)]
#[diesel(table_name = workouts, primary_key(id))]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub workout_type: String,
    pub duration_minutes: f64,
    pub calories_burned: f64,
    pub performed_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Workout {
    /// Builds a new workout row for the given user. A missing `performed_at`
    /// defaults to the insertion time, matching the behavior users expect when
    /// logging a workout right after finishing it.
    pub fn new(user_id: &str, params: &WorkoutParams) -> Self {
        let now = Utc::now().naive_utc();
        Workout {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            workout_type: params.workout_type.trim().to_string(),
            duration_minutes: params.duration_minutes,
            calories_burned: params.calories_burned,
            performed_at: params.performed_at.unwrap_or(now),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_defaults_performed_at_to_now() {
        let params = WorkoutParams {
            workout_type: "  running ".to_string(),
            duration_minutes: 30.0,
            calories_burned: 250.0,
            performed_at: None,
        };
        let workout = Workout::new("user-1", &params);

        assert_eq!(workout.user_id, "user-1");
        assert_eq!(workout.workout_type, "running");
        assert_eq!(workout.performed_at, workout.created_at);
    }

    #[test]
    fn test_workout_keeps_explicit_performed_at() {
        let performed_at = Utc::now().naive_utc() - chrono::Duration::hours(3);
        let params = WorkoutParams {
            workout_type: "cycling".to_string(),
            duration_minutes: 60.0,
            calories_burned: 500.0,
            performed_at: Some(performed_at),
        };
        let workout = Workout::new("user-1", &params);

        assert_eq!(workout.performed_at, performed_at);
        assert_ne!(workout.performed_at, workout.created_at);
    }

    #[test]
    fn test_user_ids_are_unique() {
        let params = RegisterUserParams {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
        };
        let first = User::new(&params, "hash".to_string());
        let second = User::new(&params, "hash".to_string());
        assert_ne!(first.id, second.id);
    }
}
