//! Harness configuration.
//!
//! ```toml
//! profile = "strict"
//!
//! [tolerance]
//! rtol = 1e-12
//! atol = 0.0
//! ```
//!
//! Every key is optional. A missing `[tolerance]` table, or a missing key in
//! it, falls back to [`Tolerance::default`].

use crate::compare::Tolerance;
use crate::error::ConformanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROFILE: &str = "default";

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConformanceConfig {
    /// Label recorded in every report.
    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default)]
    pub tolerance: Tolerance,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            tolerance: Tolerance::default(),
        }
    }
}

impl ConformanceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConformanceError> {
        parse_config(text, "<inline>")
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConformanceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConformanceError::ReadFile {
            path: display_path(path),
            source,
        })?;
        parse_config(&text, &display_path(path))
    }

    pub fn validate(&self) -> Result<(), ConformanceError> {
        if self.tolerance.is_valid() {
            Ok(())
        } else {
            Err(ConformanceError::InvalidTolerance(format!(
                "{} (both must be finite and non-negative)",
                self.tolerance
            )))
        }
    }
}

fn parse_config(text: &str, path: &str) -> Result<ConformanceConfig, ConformanceError> {
    let config: ConformanceConfig =
        toml::from_str(text).map_err(|source| ConformanceError::ParseToml {
            path: path.to_string(),
            source,
        })?;
    config.validate()?;
    tracing::debug!(
        path,
        profile = %config.profile,
        tolerance = %config.tolerance,
        "loaded conformance config"
    );
    Ok(config)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
