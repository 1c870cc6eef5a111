use axum::Json;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// Static JSON response for the index endpoint
static INDEX_JSON: OnceLock<Value> = OnceLock::new();

/// Handler for the index endpoint that provides API documentation
///
/// # Endpoint: GET /
///
/// # Returns
/// * `Json<Value>` - JSON response containing API endpoint documentation
pub fn index() -> Json<Value> {
    let value = INDEX_JSON.get_or_init(|| {
        json!({
            "endpoints": [
                {
                    "path": "/",
                    "method": "GET",
                    "description": "API endpoint documentation",
                    "params": {}
                },
                {
                    "path": "/users",
                    "method": "POST",
                    "description": "Register a new account",
                    "params": {
                        "username": {
                            "type": "string",
                            "required": true,
                            "description": "Unique username, 3-32 characters, letters/digits/underscores"
                        },
                        "email": {
                            "type": "string",
                            "required": true,
                            "description": "Unique email address"
                        },
                        "password": {
                            "type": "string",
                            "required": true,
                            "description": "Password, 8-128 characters"
                        }
                    }
                },
                {
                    "path": "/token",
                    "method": "POST",
                    "description": "Exchange credentials for a bearer access token (form-encoded body)",
                    "params": {
                        "username": {
                            "type": "string",
                            "required": true,
                            "description": "Registered username"
                        },
                        "password": {
                            "type": "string",
                            "required": true,
                            "description": "Account password"
                        }
                    }
                },
                {
                    "path": "/workouts",
                    "method": "POST",
                    "description": "Log a workout for the authenticated user",
                    "params": {
                        "workout_type": {
                            "type": "string",
                            "required": true,
                            "description": "Kind of workout, e.g. running or cycling"
                        },
                        "duration_minutes": {
                            "type": "number",
                            "required": true,
                            "description": "Workout duration in minutes, must be positive"
                        },
                        "calories_burned": {
                            "type": "number",
                            "required": true,
                            "description": "Estimated calories burned, must be non-negative"
                        },
                        "performed_at": {
                            "type": "string",
                            "required": false,
                            "description": "Workout timestamp (naive UTC). Defaults to now"
                        }
                    }
                },
                {
                    "path": "/workouts",
                    "method": "GET",
                    "description": "Paginated workout history for the authenticated user, newest first",
                    "params": {
                        "page": {
                            "type": "integer",
                            "required": false,
                            "description": "Page number (starting from 1)"
                        }
                    }
                },
                {
                    "path": "/workouts/summary",
                    "method": "GET",
                    "description": "Per-type workout aggregates for the authenticated user",
                    "params": {}
                },
                {
                    "path": "/health",
                    "method": "GET",
                    "description": "Service health including database, cache and background jobs",
                    "params": {}
                },
            ]
        })
    });

    Json(value.clone())
}
