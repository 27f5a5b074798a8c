use serde::{Deserialize, Serialize};

/// Feature flags controlling which optional integrations are active.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Issue image uploads to the S3-compatible blob store.
    #[serde(default)]
    pub storage: bool,
    /// OTLP trace and log export.
    #[serde(default)]
    pub telemetry: bool,
    /// Sliding-window limiter on the sign-in and registration endpoints.
    #[serde(default)]
    pub rate_limit: bool,
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
