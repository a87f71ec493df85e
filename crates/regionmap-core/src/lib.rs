#![forbid(unsafe_code)]

//! Headless marker pipeline for a world-map view.
//!
//! Turns loosely specified marker groups (region codes, raw coordinates, explicit styles,
//! preset names, nothing at all) into fully resolved [`MarkerGroup`]s, and tracks which of them
//! a legend has toggled on.
//!
//! All entry points take an explicit [`MapConfig`]; there is no global configuration. The work
//! is synchronous, CPU-bound and free of I/O.
//!
//! ```
//! use regionmap_core::{MapConfig, RawGroup, normalize_groups};
//!
//! let config = MapConfig::default();
//! let groups = vec![
//!     RawGroup::regions(["sjc", "fra"]).label("Prod"),
//!     RawGroup::regions(["zzz"]),
//! ];
//! let out = normalize_groups(&groups, &config);
//! assert_eq!(out.groups[0].nodes.len(), 2);
//! assert!(out.groups[1].nodes.is_empty());
//! assert_eq!(out.failures.len(), 1);
//! ```

pub mod colour;
pub mod config;
pub mod discovery;
pub mod error;
pub mod geom;
pub mod group;
pub mod node;
pub mod regions;
pub mod session;
pub mod style;
pub mod theme;
pub mod visibility;

pub use config::{AnimationConfig, CustomRegion, Layout, MapConfig};
pub use discovery::{groups_from_apps, groups_from_machines};
pub use error::{Error, NodeError, Result};
pub use geom::{BoundingBox, Coordinates};
pub use group::{
    MarkerGroup, NodeFailure, NormalizeOptions, NormalizedGroups, ParsedGroups, RawGroup,
    normalize_groups, normalize_groups_with, normalize_value, parse_groups, sanitize_group_label,
};
pub use node::{Node, NodeSpec, normalize_node};
pub use regions::{BUILTIN_REGIONS, Region, RegionCatalog};
pub use session::{MapProps, MapSession, ToggleEvent, ToggleNotification};
pub use style::{
    Animation, BuiltinPreset, Style, StyleAttributes, StyleResolver, StyleSource, StyleSpec,
    cycle, named_colours,
};
pub use theme::{Theme, ThemeSpec, resolve_theme};
pub use visibility::{InitiallyVisible, VisibilitySelection};

/// Resolves one style input against `config`. Never fails.
pub fn normalize_style(spec: &StyleSpec, config: &MapConfig) -> Style {
    StyleResolver::new(config).normalize_style(spec)
}

#[cfg(test)]
mod tests;
