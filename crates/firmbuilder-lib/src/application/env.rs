//! Colour and CI variables read straight from the environment
//!
//! These follow cross-tool conventions rather than the `FIRMBUILDER_*`
//! namespace, so they are loaded separately from the clap-backed config.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR environment variable (any value = disable color)
    pub no_color: Option<String>,
    /// FORCE_COLOR environment variable (0/false = disable, 1/2/3/true = enable)
    pub force_color: Option<String>,
    /// CLICOLOR environment variable (0 = disable color)
    pub clicolor: Option<String>,
    /// CI environment variable (any value = CI mode)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Load environment configuration from current environment
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env()?)
    }

    /// Load from explicit `(NAME, value)` pairs
    pub fn from_vars(vars: Vec<(String, String)>) -> Result<Self, ConfigError> {
        Ok(envy::from_iter(vars)?)
    }

    /// Colour intent after the standard colour variables are applied
    ///
    /// CI disables colour outright. Otherwise FORCE_COLOR beats NO_COLOR,
    /// which beats CLICOLOR=0.
    pub fn apply_color_config(&self, requested: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            return ColorIntent::Never;
        }

        let forced = self.force_color.as_deref().and_then(|value| match value {
            "0" | "false" => Some(ColorIntent::Never),
            "1" | "2" | "3" | "true" => Some(ColorIntent::Always),
            _ => None,
        });
        let disabled = self.no_color.as_deref().is_some_and(|value| !value.is_empty())
            || self.clicolor.as_deref() == Some("0");

        match (forced, disabled) {
            (Some(intent), _) => intent,
            (None, true) => ColorIntent::Never,
            (None, false) => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
