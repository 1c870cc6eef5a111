use crate::{Result, CONFIG};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token. `sub` is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues an HS256 access token for the given username
pub fn issue_access_token(username: &str) -> Result<String> {
    issue_with_secret(
        username,
        CONFIG.jwt_secret.as_bytes(),
        CONFIG.access_token_expiry_minutes,
    )
}

/// Decodes and validates an access token, returning its claims
pub fn decode_access_token(token: &str) -> Result<Claims> {
    decode_with_secret(token, CONFIG.jwt_secret.as_bytes())
}

fn issue_with_secret(username: &str, secret: &[u8], expiry_minutes: i64) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(expiry_minutes)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).map_err(Into::into)
}

fn decode_with_secret(token: &str, secret: &[u8]) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let token = issue_with_secret("jane", SECRET, 30).unwrap();
        let claims = decode_with_secret(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "jane");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = issue_with_secret("jane", SECRET, 30).unwrap();
        assert!(decode_with_secret(&token, b"another-secret").is_err());
    }

    #[test]
    fn test_decode_rejects_expired_token() {
        // Expired well past jsonwebtoken's default leeway
        let token = issue_with_secret("jane", SECRET, -10).unwrap();
        assert!(decode_with_secret(&token, SECRET).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_with_secret("not.a.jwt", SECRET).is_err());
    }
}
