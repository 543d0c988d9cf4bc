use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Environment {
    /// Log filter used when `NUTMEG_LOG_LEVEL` is unset. Deployed runs only
    /// surface degraded loads and failures.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "info",
            Environment::Test | Environment::Production => "warn",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base that resource paths resolve against: an `http(s)://` URL or a
    /// local directory.
    pub data_root: String,
    pub towns_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_ms: u64,
    pub geo_timeout_secs: u64,
    pub geo_max_age_secs: u64,
    /// Near-Me radius cap. `None` lists every placeable restaurant.
    pub near_me_radius_miles: Option<f64>,
    /// Join featured entries to listings on trimmed, case-folded names.
    pub normalize_names: bool,
}
