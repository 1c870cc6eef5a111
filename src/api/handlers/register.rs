use crate::auth::password::hash_password;
use crate::db::models::{
    ApiResponse, ErrorResponse, RegisterUserParams, Status, User, UserResponse,
};
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use crate::validation::{validate_email, validate_password, validate_username};
use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info};

// Route handler for POST /users which registers a new account
pub(crate) async fn register_user(
    State(db): State<DbClient>,
    Json(payload): Json<RegisterUserParams>,
) -> (StatusCode, Json<ApiResponse>) {
    if let Err(message) = validate_username(&payload.username)
        .and_then(|_| validate_email(&payload.email))
        .and_then(|_| validate_password(&payload.password))
    {
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    let username = payload.username.trim();
    let email = payload.email.trim();

    match db.find_registration_conflict(username, email).await {
        Ok(Some(existing)) => {
            info!("Registration conflict for username: {}", username);
            let message = if existing.username == username {
                ErrorMessages::UsernameTaken
            } else {
                ErrorMessages::EmailTaken
            };
            return error_response(StatusCode::BAD_REQUEST, message.to_string());
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking registration conflict: {:?}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorMessages::DB.to_string(),
            );
        }
    }

    let hashed_password = match hash_password(&payload.password) {
        Ok(hashed) => hashed,
        Err(e) => {
            error!("Error hashing password: {:?}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorMessages::Unexpected.to_string(),
            );
        }
    };

    let user = User::new(&payload, hashed_password);
    if let Err(e) = db.insert_user(&user).await {
        error!("Error inserting user into database: {:?}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorMessages::DB.to_string(),
        );
    }

    info!("Registered new user: {}", user.username);
    (StatusCode::CREATED, Json(UserResponse::from(user).into()))
}

fn error_response(code: StatusCode, message: String) -> (StatusCode, Json<ApiResponse>) {
    (
        code,
        Json(
            ErrorResponse {
                status: Status::Error,
                error: message,
            }
            .into(),
        ),
    )
}
