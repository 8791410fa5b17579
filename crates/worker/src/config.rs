/// Environment variable holding the target table name.
pub const ENV_TABLE_NAME: &str = "DYNAMODB_TABLE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Worker configuration, read once at startup.
///
/// | Env Var          | Required | Description                    |
/// |------------------|----------|--------------------------------|
/// | `DYNAMODB_TABLE` | yes      | Table receiving telemetry items |
///
/// Region and credentials come from the standard AWS environment.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub table_name: String,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. A blank value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(ENV_TABLE_NAME)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENV_TABLE_NAME))?;

        Ok(Self { table_name })
    }
}
