use crate::errors::ConfigError;
use std::env;

/// Settings read once at cold start
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the profile documents
    pub table_name: String,
    /// Cognito user pool accounts are deleted from
    pub user_pool_id: String,
    /// Trust an `X-User-Id` header as the caller (local development only)
    pub allow_user_id_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: "users".to_string(),
            user_pool_id: String::new(),
            allow_user_id_header: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup("TABLE_NAME").unwrap_or_else(|| "users".to_string());
        let user_pool_id = lookup("COGNITO_USER_POOL_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("COGNITO_USER_POOL_ID"))?;
        let allow_user_id_header = lookup("ALLOW_USER_ID_HEADER")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Ok(Self {
            table_name,
            user_pool_id,
            allow_user_id_header,
        })
    }
}
