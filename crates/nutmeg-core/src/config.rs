use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let parse_radius = |var: &str| -> Result<Option<f64>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let miles = raw.parse::<f64>().map_err(|e| invalid(var, e.to_string()))?;
        if !miles.is_finite() || miles <= 0.0 {
            return Err(invalid(var, "radius must be a positive number of miles".into()));
        }
        Ok(Some(miles))
    };

    let env = parse_environment(&or_default("NUTMEG_ENV", "development"));
    let log_level = or_default("NUTMEG_LOG_LEVEL", env.default_log_level());
    let data_root = or_default("NUTMEG_DATA_ROOT", "./data");
    let towns_path = PathBuf::from(or_default("NUTMEG_TOWNS_PATH", "./config/towns.yaml"));

    let request_timeout_secs = parse_u64("NUTMEG_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("NUTMEG_USER_AGENT", "nutmeg/0.1 (shoreline-dining-guide)");
    let fetch_max_retries = parse_u32("NUTMEG_FETCH_MAX_RETRIES", "1")?;
    let fetch_retry_backoff_ms = parse_u64("NUTMEG_FETCH_RETRY_BACKOFF_MS", "250")?;

    let geo_timeout_secs = parse_u64("NUTMEG_GEO_TIMEOUT_SECS", "10")?;
    let geo_max_age_secs = parse_u64("NUTMEG_GEO_MAX_AGE_SECS", "300")?;
    let near_me_radius_miles = parse_radius("NUTMEG_NEAR_ME_RADIUS_MILES")?;
    let normalize_names = parse_bool("NUTMEG_NORMALIZE_NAMES", "false")?;

    Ok(AppConfig {
        env,
        log_level,
        data_root,
        towns_path,
        request_timeout_secs,
        user_agent,
        fetch_max_retries,
        fetch_retry_backoff_ms,
        geo_timeout_secs,
        geo_max_age_secs,
        near_me_radius_miles,
        normalize_names,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.data_root, "./data");
        assert_eq!(cfg.towns_path.to_str(), Some("./config/towns.yaml"));
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.user_agent, "nutmeg/0.1 (shoreline-dining-guide)");
        assert_eq!(cfg.fetch_max_retries, 1);
        assert_eq!(cfg.fetch_retry_backoff_ms, 250);
        assert_eq!(cfg.geo_timeout_secs, 10);
        assert_eq!(cfg.geo_max_age_secs, 300);
        assert!(cfg.near_me_radius_miles.is_none());
        assert!(!cfg.normalize_names);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_ENV", "production");
        map.insert("NUTMEG_DATA_ROOT", "https://abiteofnutmeg.com");
        map.insert("NUTMEG_FETCH_MAX_RETRIES", "3");
        map.insert("NUTMEG_NEAR_ME_RADIUS_MILES", "5");
        map.insert("NUTMEG_NORMALIZE_NAMES", "true");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.data_root, "https://abiteofnutmeg.com");
        assert_eq!(cfg.fetch_max_retries, 3);
        assert_eq!(cfg.near_me_radius_miles, Some(5.0));
        assert!(cfg.normalize_names);
    }

    #[test]
    fn build_app_config_log_level_follows_environment() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_ENV", "production");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "warn");

        map.insert("NUTMEG_LOG_LEVEL", "debug");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug", "explicit level wins over environment");
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NUTMEG_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NUTMEG_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_negative_radius() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_NEAR_ME_RADIUS_MILES", "-2");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NUTMEG_NEAR_ME_RADIUS_MILES"),
            "expected InvalidEnvVar(NUTMEG_NEAR_ME_RADIUS_MILES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_blank_radius_is_unbounded() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_NEAR_ME_RADIUS_MILES", "  ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.near_me_radius_miles.is_none());
    }

    #[test]
    fn build_app_config_rejects_invalid_bool() {
        let mut map = HashMap::new();
        map.insert("NUTMEG_NORMALIZE_NAMES", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NUTMEG_NORMALIZE_NAMES"),
            "expected InvalidEnvVar(NUTMEG_NORMALIZE_NAMES), got: {result:?}"
        );
    }
}
