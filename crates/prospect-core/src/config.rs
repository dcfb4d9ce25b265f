use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Credentials are optional here: whether a missing credential is fatal depends
/// on the command being run, so that decision belongs to the runner.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a non-negative finite number, got {value}"),
            });
        }
        Ok(value)
    };

    let instagram_access_token = lookup("INSTAGRAM_ACCESS_TOKEN").ok();
    let instagram_user_id = lookup("INSTAGRAM_USER_ID").ok();
    let openai_api_key = lookup("OPENAI_API_KEY").ok();

    let openai_model = or_default("PROSPECT_OPENAI_MODEL", "gpt-4.1-mini");
    let data_dir = PathBuf::from(or_default("PROSPECT_DATA_DIR", "./data"));
    let seeds_path = PathBuf::from(or_default("PROSPECT_SEEDS_PATH", "./config/seeds.yaml"));
    let log_level = or_default("PROSPECT_LOG_LEVEL", "info");

    let min_followers = parse_u64("PROSPECT_MIN_FOLLOWERS", "10000")?;
    let min_engagement_rate = parse_f64("PROSPECT_MIN_ENGAGEMENT_RATE", "2.5")?;

    let request_timeout_secs = parse_u64("PROSPECT_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("PROSPECT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("PROSPECT_RETRY_BACKOFF_BASE_MS", "1000")?;
    let inter_request_delay_ms = parse_u64("PROSPECT_INTER_REQUEST_DELAY_MS", "300")?;
    let max_pages_per_hashtag = parse_usize("PROSPECT_MAX_PAGES_PER_HASHTAG", "5")?;
    let max_profiles_per_hashtag = parse_usize("PROSPECT_MAX_PROFILES_PER_HASHTAG", "20")?;

    Ok(AppConfig {
        instagram_access_token,
        instagram_user_id,
        openai_api_key,
        openai_model,
        data_dir,
        seeds_path,
        log_level,
        min_followers,
        min_engagement_rate,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        inter_request_delay_ms,
        max_pages_per_hashtag,
        max_profiles_per_hashtag,
    })
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
    fn empty_env_builds_with_defaults_and_no_credentials() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.instagram_configured());
        assert!(cfg.openai_api_key.is_none());
        assert_eq!(cfg.min_followers, 10_000);
        assert!((cfg.min_engagement_rate - 2.5).abs() < f64::EPSILON);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 1_000);
        assert_eq!(cfg.inter_request_delay_ms, 300);
        assert_eq!(cfg.max_pages_per_hashtag, 5);
        assert_eq!(cfg.max_profiles_per_hashtag, 20);
        assert_eq!(cfg.openai_model, "gpt-4.1-mini");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn instagram_configured_requires_both_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("INSTAGRAM_ACCESS_TOKEN", "token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(!cfg.instagram_configured());

        map.insert("INSTAGRAM_USER_ID", "17841400000000000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.instagram_configured());
    }

    #[test]
    fn threshold_overrides_are_applied() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PROSPECT_MIN_FOLLOWERS", "5000");
        map.insert("PROSPECT_MIN_ENGAGEMENT_RATE", "1.8");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.min_followers, 5_000);
        assert!((cfg.min_engagement_rate - 1.8).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_min_followers_is_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PROSPECT_MIN_FOLLOWERS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PROSPECT_MIN_FOLLOWERS"),
            "expected InvalidEnvVar(PROSPECT_MIN_FOLLOWERS), got: {result:?}"
        );
    }

    #[test]
    fn negative_engagement_threshold_is_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PROSPECT_MIN_ENGAGEMENT_RATE", "-1.0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PROSPECT_MIN_ENGAGEMENT_RATE"),
            "expected InvalidEnvVar(PROSPECT_MIN_ENGAGEMENT_RATE), got: {result:?}"
        );
    }

    #[test]
    fn debug_redacts_credentials() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("INSTAGRAM_ACCESS_TOKEN", "super-secret-token");
        map.insert("OPENAI_API_KEY", "sk-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
