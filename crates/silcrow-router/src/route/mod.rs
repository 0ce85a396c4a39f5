//! Route module for file-based routing
//!
//! Contains pure functional components for segment parsing and pattern construction:
//! - Pure functions (same input → same output)
//! - Immutable data structures
//! - Pattern matching for control flow

pub mod pattern;
pub mod segment;

// Re-export commonly used types
pub use pattern::Pattern;
pub use segment::{parse_segment, Segment};
