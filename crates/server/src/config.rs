use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Default request body cap. Five base64-encoded images fit comfortably.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Default sign-in/registration attempts allowed per client per minute.
const DEFAULT_AUTH_RATE_LIMIT: u32 = 10;

/// Parse the `[features]` table out of a config file body.
pub fn parse_feature_flags(contents: &str) -> Result<FeatureFlags, toml::de::Error> {
    toml::from_str::<AppConfig>(contents).map(|c| c.features)
}

/// Read `config.toml`, parse feature flags, and store them in the global
/// `OnceLock`. Safe to call multiple times; only the first call has effect.
///
/// If the file is missing or unparseable, all flags default to `false`.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let flags = parse_feature_flags(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, all features off");
                FeatureFlags::default()
            });
            tracing::info!(?flags, "Feature flags loaded");
            flags
        }
        Err(e) => {
            tracing::warn!(path = CONFIG_PATH, error = %e, "Config not found, all features off");
            FeatureFlags::default()
        }
    });
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_feature_flags()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        storage: false,
        telemetry: false,
        rate_limit: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Request body cap applied to the whole router (`MAX_UPLOAD_BYTES`).
pub fn max_upload_bytes() -> usize {
    env_parse("MAX_UPLOAD_BYTES").unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
}

/// Sign-in attempts per client per minute (`AUTH_RATE_LIMIT_PER_MINUTE`).
pub fn auth_rate_limit_per_minute() -> u32 {
    env_parse("AUTH_RATE_LIMIT_PER_MINUTE")
        .filter(|n: &u32| *n > 0)
        .unwrap_or(DEFAULT_AUTH_RATE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_from_config_body() {
        let flags = parse_feature_flags("[features]\nstorage = true\nrate_limit = true\n").unwrap();
        assert!(flags.storage);
        assert!(flags.rate_limit);
        assert!(!flags.telemetry);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_feature_flags("[features\nstorage = ").is_err());
    }

    #[test]
    fn unloaded_flags_default_off() {
        let flags = feature_flags();
        if FLAGS.get().is_none() {
            assert_eq!(*flags, FeatureFlags::default());
        }
    }
}
