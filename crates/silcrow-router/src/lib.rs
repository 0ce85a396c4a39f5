//! # Silcrow Router
//!
//! A file-system-style route pattern language with:
//! - Static segments (`about`)
//! - Dynamic parameters (`[id]`)
//! - Optional parameters (`[[lang]]`)
//! - Catch-all segments (`[...rest]`)
//!
//! ## What it does
//!
//! - **Matching**: request path → route entry plus bound parameters
//! - **Generation**: route + parameter values → link, never failing
//! - **Analysis**: before serving anything, flag routes that differ only in parameter
//!   names and optional/catch-all routes that can accept the same path
//!
//! ## Canonical forms
//!
//! | Token            | Route id     | Signature       |
//! |------------------|--------------|-----------------|
//! | `users`          | `/users`     | `static:users`  |
//! | `[id]`           | `/:id`       | `param`         |
//! | `[[lang]]`       | `/:lang?`    | `optional`      |
//! | `[...rest]`      | `/*rest`     | `catchAll`      |
//!
//! ## Example
//!
//! ```
//! use silcrow_router::{RouteDeclaration, RouteTable};
//!
//! let table = RouteTable::build(vec![
//!     RouteDeclaration::from_file_path("routes/index.purs", "routes", "home"),
//!     RouteDeclaration::from_file_path("routes/users/[id].purs", "routes", "user"),
//!     RouteDeclaration::from_file_path("routes/docs/[...rest].purs", "routes", "docs"),
//! ])
//! .unwrap();
//!
//! let route_match = table.match_path("/users/123").unwrap();
//! assert_eq!(route_match.params.get("id"), Some(&"123".to_string()));
//!
//! let route_match = table.match_path("/docs/guide/intro").unwrap();
//! assert_eq!(route_match.pieces("rest").unwrap(), ["guide", "intro"]);
//!
//! assert_eq!(table.url_for("/users/:id", &[("id", "7")]).unwrap(), "/users/7");
//! assert!(table.diagnostics().is_empty());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod analyze;
mod config;
mod diagnostic;
mod error;
mod generate;
mod manifest;
mod matcher;
pub mod path;
mod reload;
pub mod route;
mod table;

// ============================================================================
// Public API
// ============================================================================

pub use analyze::{analyze, patterns_overlap};
pub use config::{DiagnosticsConfig, RouterConfig, RoutingConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::RouteError;
pub use generate::{generate, ParamLookup};
pub use manifest::{ManifestRoute, RouteManifest};
pub use matcher::{match_pattern, Bindings};
pub use path::{is_valid_path, normalize_path};
pub use reload::SharedRouteTable;
pub use route::{parse_segment, Pattern, Segment};
pub use table::{RouteDeclaration, RouteEntry, RouteMatch, RouteTable};
