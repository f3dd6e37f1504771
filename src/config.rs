//! Startup configuration for the rendering service.
//!
//! Configuration is read and validated once at process start; problems come
//! back as structured [`ConfigError`] values instead of console warnings, so
//! a misconfigured deployment fails loudly before the first render.

use std::env;

use thiserror::Error;

/// Environment variable overriding the watermark caption.
pub const WATERMARK_TEXT_VAR: &str = "PROTOLAB_WATERMARK_TEXT";
/// Environment variable enabling the premium template catalog.
pub const PREMIUM_TEMPLATES_VAR: &str = "PROTOLAB_PREMIUM_TEMPLATES";

/// Caption drawn over free-tier exports when no override is configured.
pub const DEFAULT_WATERMARK_TEXT: &str = "ProtoLab Free Preview";

/// A configuration value failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable was set to an empty or whitespace-only value.
    #[error("{var} must not be empty")]
    EmptyValue {
        /// Name of the offending variable.
        var: &'static str,
    },
    /// The variable did not parse as a boolean.
    #[error("{var} must be `true` or `false`, got `{value}`")]
    InvalidBool {
        /// Name of the offending variable.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Validated render-service configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Caption drawn as the diagonal watermark on free-tier exports.
    pub watermark_text: String,
    /// Whether template lookup may consult the premium catalog.
    pub include_premium_templates: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            watermark_text: DEFAULT_WATERMARK_TEXT.to_string(),
            include_premium_templates: false,
        }
    }
}

impl RenderConfig {
    /// Reads and validates the configuration from the environment.
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are
    /// rejected so deployment mistakes surface at startup rather than as
    /// silently odd documents.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var(WATERMARK_TEXT_VAR) {
            config.watermark_text = validate_watermark_text(&value)?;
        }
        if let Ok(value) = env::var(PREMIUM_TEMPLATES_VAR) {
            config.include_premium_templates = parse_bool(PREMIUM_TEMPLATES_VAR, &value)?;
        }

        Ok(config)
    }
}

fn validate_watermark_text(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyValue {
            var: WATERMARK_TEXT_VAR,
        });
    }
    Ok(trimmed.to_string())
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
