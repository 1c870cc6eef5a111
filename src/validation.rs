use crate::db::models::WorkoutParams;
use chrono::{Duration, Utc};

/// Validates a username: 3 to 32 characters, alphanumeric or underscore
pub fn validate_username(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if value.len() < 3 || value.len() > 32 {
        return Err("Username must be between 3 and 32 characters".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, digits and underscores".to_string());
    }
    Ok(())
}

/// Validates an email address shape without fetching anything
pub fn validate_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("Email must contain exactly one @ separating non-empty parts".to_string());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Email domain must contain a dot".to_string());
    }
    Ok(())
}

/// Validates password length bounds: at least 8 characters, and no longer
/// than the 72 bytes bcrypt actually reads
pub fn validate_password(value: &str) -> Result<(), String> {
    if value.chars().count() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }
    if value.len() > 72 {
        return Err("Password must be at most 72 bytes long".to_string());
    }
    Ok(())
}

/// Validates workout parameters before they reach the database
pub fn validate_workout(params: &WorkoutParams) -> Result<(), String> {
    let workout_type = params.workout_type.trim();
    if workout_type.is_empty() {
        return Err("Workout type cannot be empty".to_string());
    }
    if workout_type.len() > 64 {
        return Err("Workout type must be at most 64 characters".to_string());
    }
    if !params.duration_minutes.is_finite() || params.duration_minutes <= 0.0 {
        return Err("Workout duration must be a positive number of minutes".to_string());
    }
    if !params.calories_burned.is_finite() || params.calories_burned < 0.0 {
        return Err("Calories burned must be a non-negative number".to_string());
    }
    if let Some(performed_at) = params.performed_at {
        // Allow a small clock skew between client and server
        let latest_allowed = Utc::now().naive_utc() + Duration::minutes(5);
        if performed_at > latest_allowed {
            return Err("Workout timestamp cannot be in the future".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(workout_type: &str, duration: f64, calories: f64) -> WorkoutParams {
        WorkoutParams {
            workout_type: workout_type.to_string(),
            duration_minutes: duration,
            calories_burned: calories,
            performed_at: None,
        }
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username("jane_doe42"), Ok(()));
        assert_eq!(
            validate_username(""),
            Err("Username cannot be empty".to_string())
        );
        assert_eq!(
            validate_username("ab"),
            Err("Username must be between 3 and 32 characters".to_string())
        );
        assert_eq!(
            validate_username("jane doe"),
            Err("Username may only contain letters, digits and underscores".to_string())
        );
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("jane@example.com"), Ok(()));
        assert_eq!(
            validate_email(""),
            Err("Email cannot be empty".to_string())
        );
        assert_eq!(
            validate_email("jane.example.com"),
            Err("Email must contain exactly one @ separating non-empty parts".to_string())
        );
        assert_eq!(
            validate_email("jane@localhost"),
            Err("Email domain must contain a dot".to_string())
        );
    }

    #[test]
    fn test_validate_password() {
        assert_eq!(validate_password("longenough"), Ok(()));
        assert_eq!(
            validate_password("short"),
            Err("Password must be at least 8 characters long".to_string())
        );
        assert_eq!(
            validate_password(&"x".repeat(73)),
            Err("Password must be at most 72 bytes long".to_string())
        );
    }

    #[test]
    fn test_validate_password_counts_characters_not_bytes() {
        // 7 characters but more than 8 bytes; still too short
        assert_eq!(
            validate_password("pässwör"),
            Err("Password must be at least 8 characters long".to_string())
        );
        // 8 multibyte characters within the byte cap
        assert_eq!(validate_password("pässwörd"), Ok(()));
        // 36 characters but over bcrypt's 72-byte input limit
        assert_eq!(
            validate_password(&("ö".repeat(36) + "1")),
            Err("Password must be at most 72 bytes long".to_string())
        );
    }

    #[test]
    fn test_validate_workout() {
        assert_eq!(validate_workout(&workout("running", 30.0, 250.0)), Ok(()));
        assert_eq!(
            validate_workout(&workout("", 30.0, 250.0)),
            Err("Workout type cannot be empty".to_string())
        );
        assert_eq!(
            validate_workout(&workout("running", 0.0, 250.0)),
            Err("Workout duration must be a positive number of minutes".to_string())
        );
        assert_eq!(
            validate_workout(&workout("running", f64::NAN, 250.0)),
            Err("Workout duration must be a positive number of minutes".to_string())
        );
        assert_eq!(
            validate_workout(&workout("running", 30.0, -1.0)),
            Err("Calories burned must be a non-negative number".to_string())
        );
    }

    #[test]
    fn test_validate_workout_rejects_future_timestamp() {
        let mut params = workout("cycling", 45.0, 400.0);
        params.performed_at = Some(Utc::now().naive_utc() + Duration::hours(1));
        assert_eq!(
            validate_workout(&params),
            Err("Workout timestamp cannot be in the future".to_string())
        );

        params.performed_at = Some(Utc::now().naive_utc() - Duration::hours(1));
        assert_eq!(validate_workout(&params), Ok(()));
    }
}
