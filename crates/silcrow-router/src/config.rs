// File: src/config.rs
// Purpose: Router configuration parsing from silcrow.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::path::normalize_base_path;

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base path the application is mounted under (e.g., "/app")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Directory route files are declared relative to (default: "routes")
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,
}

/// Which build-time analyses run, and whether their warnings fail the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Flag routes that share a shape but name their params differently
    #[serde(default = "default_true")]
    pub equivalent_shapes: bool,

    /// Flag optional/catch-all routes that can accept the same path
    #[serde(default = "default_true")]
    pub overlaps: bool,

    /// Treat any warning as fatal
    #[serde(default = "default_false")]
    pub deny_warnings: bool,
}

fn default_routes_dir() -> String {
    "routes".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            equivalent_shapes: true,
            overlaps: true,
            deny_warnings: false,
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No router config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./silcrow.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("silcrow.toml")
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(content).context("Invalid router configuration")
    }

    /// Normalized base path; empty when the app is mounted at `/`
    pub fn base_path(&self) -> String {
        normalize_base_path(self.routing.base_path.as_deref().unwrap_or(""))
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.routing.base_path = Some(base_path.into());
        self
    }

    pub fn with_deny_warnings(mut self, deny: bool) -> Self {
        self.diagnostics.deny_warnings = deny;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            routes_dir: default_routes_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.routing.base_path, None);
        assert_eq!(config.routing.routes_dir, "routes");
        assert!(config.diagnostics.equivalent_shapes);
        assert!(config.diagnostics.overlaps);
        assert!(!config.diagnostics.deny_warnings);
        assert_eq!(config.base_path(), "");
    }

    #[test]
    fn test_empty_config() {
        let config = RouterConfig::from_toml_str("   \n").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml = r#"
            [routing]
            base_path = "app/"

            [diagnostics]
            deny_warnings = true
        "#;
        let config = RouterConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.base_path(), "/app");
        assert_eq!(config.routing.routes_dir, "routes");
        assert!(config.diagnostics.deny_warnings);
        assert!(config.diagnostics.overlaps);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = RouterConfig::from_toml_str("[diagnostics]\noverlaps = \"yes\"").unwrap_err();
        assert!(err.to_string().contains("Invalid router configuration"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = RouterConfig::load("definitely/not/here/silcrow.toml").unwrap();
        assert_eq!(config, RouterConfig::default());
    }
}
