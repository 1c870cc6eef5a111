use serde::Deserialize;

/// Configuration for the API server
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// PostgreSQL database URL
    pub database_url: String,
    /// Redis URL
    pub redis_url: String,
    /// Secret used to sign access tokens (HS256)
    pub jwt_secret: String,
    /// Lifetime of issued access tokens in minutes
    #[serde(default = "default_token_expiry_minutes")]
    pub access_token_expiry_minutes: i64,
    /// bcrypt work factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// TTL for cached workout summaries in seconds
    #[serde(default = "default_summary_cache_ttl")]
    pub summary_cache_ttl_seconds: u64,
    /// Interval between summary cache refresh runs in seconds
    #[serde(default = "default_summary_refresh_interval")]
    pub summary_refresh_interval_seconds: u64,
    /// Port to run the server on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_token_expiry_minutes() -> i64 {
    30
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_summary_cache_ttl() -> u64 {
    300
}

fn default_summary_refresh_interval() -> u64 {
    900
}

fn default_port() -> u16 {
    8001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "database_url": "postgres://localhost/fitness",
            "redis_url": "redis://localhost:6379",
            "jwt_secret": "secret",
        }))
        .unwrap();

        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.summary_cache_ttl_seconds, 300);
        assert_eq!(config.summary_refresh_interval_seconds, 900);
        assert_eq!(config.port, 8001);
    }
}
