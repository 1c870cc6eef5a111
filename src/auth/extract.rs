use crate::auth::token::decode_access_token;
use crate::db::models::{ApiResponse, ErrorResponse, Status, User};
use crate::db::DbClient;
use crate::errors::ErrorMessages;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use tracing::warn;

/// Extractor that authenticates the request from its bearer token.
///
/// Resolves the token subject against the users table so that tokens for
/// deleted accounts stop working immediately.
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<DbClient> for AuthenticatedUser {
    type Rejection = (StatusCode, Json<ApiResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        db: &DbClient,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        let claims = decode_access_token(token).map_err(|err| {
            warn!("Rejected access token: {}", err);
            unauthorized()
        })?;

        let user = db.get_user_by_username(&claims.sub).await.map_err(|err| {
            warn!("Token subject {} not resolvable: {}", claims.sub, err);
            unauthorized()
        })?;

        Ok(Self(user))
    }
}

fn unauthorized() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(
            ErrorResponse {
                status: Status::Error,
                error: ErrorMessages::InvalidToken.to_string(),
            }
            .into(),
        ),
    )
}
