use crate::auth::password::verify_password;
use crate::auth::token::issue_access_token;
use crate::db::models::{ApiResponse, ErrorResponse, LoginParams, Status, TokenResponse};
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use crate::CONFIG;
use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::{error, info, warn};

// Hash of an unguessable throwaway value. Verified against on the
// unknown-username path so that path pays the same bcrypt cost as a real
// verification and response timing does not enumerate usernames.
const DUMMY_HASH: &str = "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

// Route handler for POST /token which exchanges credentials for an access
// token. Form-encoded body with username/password fields (OAuth2 password
// flow shape).
pub(crate) async fn login(
    State(db): State<DbClient>,
    Form(payload): Form<LoginParams>,
) -> (StatusCode, Json<ApiResponse>) {
    // Unknown user and wrong password answer identically
    let user = match db.get_user_by_username(payload.username.trim()).await {
        Ok(user) => user,
        Err(_) => {
            let _ = verify_password(&payload.password, DUMMY_HASH);
            warn!("Login attempt for unknown username");
            return invalid_credentials();
        }
    };

    match verify_password(&payload.password, &user.hashed_password) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Failed login for user: {}", user.username);
            return invalid_credentials();
        }
        Err(e) => {
            error!("Error verifying password: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorResponse {
                        status: Status::Error,
                        error: ErrorMessages::Unexpected.to_string(),
                    }
                    .into(),
                ),
            );
        }
    }

    match issue_access_token(&user.username) {
        Ok(access_token) => {
            info!("Issued access token for user: {}", user.username);
            (
                StatusCode::OK,
                Json(
                    TokenResponse {
                        access_token,
                        token_type: "bearer".to_string(),
                        expires_in: CONFIG.access_token_expiry_minutes * 60,
                    }
                    .into(),
                ),
            )
        }
        Err(e) => {
            error!("Error issuing access token: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorResponse {
                        status: Status::Error,
                        error: ErrorMessages::Unexpected.to_string(),
                    }
                    .into(),
                ),
            )
        }
    }
}

fn invalid_credentials() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(
            ErrorResponse {
                status: Status::Error,
                error: ErrorMessages::InvalidCredentials.to_string(),
            }
            .into(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_a_parseable_bcrypt_hash() {
        // A malformed constant would error out instead of burning the bcrypt
        // cost, silently reopening the unknown-username timing shortcut
        assert!(verify_password("any password", DUMMY_HASH).is_ok());
    }
}
