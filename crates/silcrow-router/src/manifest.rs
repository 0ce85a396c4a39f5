// File: src/manifest.rs
// Purpose: Declarative route lists loaded from TOML or JSON

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::RouterConfig;
use crate::table::RouteDeclaration;

/// A list of routes, typically checked in next to `silcrow.toml`
///
/// ```toml
/// [[routes]]
/// file = "routes/users/[id].purs"
/// handler = "users_show"
///
/// [[routes]]
/// id = "docs"
/// segments = ["docs", "[...rest]"]
/// handler = "docs"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "H: Deserialize<'de>"))]
pub struct RouteManifest<H> {
    #[serde(default)]
    pub routes: Vec<ManifestRoute<H>>,
}

/// One `[[routes]]` entry
///
/// `segments` wins over `file` when both are given; neither means the root route.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRoute<H> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<String>>,
    #[serde(default)]
    pub file: Option<String>,
    pub handler: H,
    #[serde(default)]
    pub source: Option<String>,
}

impl<H: DeserializeOwned> RouteManifest<H> {
    /// Load a manifest, choosing JSON for `.json` files and TOML otherwise
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest: {:?}", path))?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let manifest = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };

        manifest.with_context(|| format!("Failed to parse route manifest: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML route manifest")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid JSON route manifest")
    }
}

impl<H> RouteManifest<H> {
    /// Converts entries into declarations; `file` entries are resolved against
    /// `config.routing.routes_dir`
    pub fn into_declarations(self, config: &RouterConfig) -> Vec<RouteDeclaration<H>> {
        let routes_dir = config.routing.routes_dir.as_str();

        self.routes
            .into_iter()
            .enumerate()
            .map(|(idx, route)| {
                let mut decl = match (route.segments, route.file) {
                    (Some(segments), file) => {
                        let source = file.unwrap_or_else(|| format!("manifest route #{}", idx));
                        RouteDeclaration::new(segments, route.handler, source)
                    }
                    (None, Some(file)) => {
                        RouteDeclaration::from_file_path(&file, routes_dir, route.handler)
                    }
                    (None, None) => RouteDeclaration::new(
                        Vec::<String>::new(),
                        route.handler,
                        format!("manifest route #{}", idx),
                    ),
                };
                if let Some(source) = route.source {
                    decl.source = source;
                }
                decl.id = route.id;
                decl
            })
            .collect()
    }
}
