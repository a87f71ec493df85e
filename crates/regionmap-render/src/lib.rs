#![forbid(unsafe_code)]

//! Projection, composition and SVG output for resolved regionmap marker groups.

pub mod compose;
pub mod land;
pub mod model;
pub mod projection;
pub mod svg;
pub mod text;

pub use compose::{ComposeOptions, GradientRegistry, compose_map, compose_marker};
pub use land::{LandPaths, LandPolygons, NoLand, RawLandPaths};
pub use model::MapLayout;
pub use projection::{OFFSCREEN, Point, project, project_or_offscreen};
pub use svg::{SvgRenderOptions, render_map_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid map layout: {message}")]
    InvalidLayout { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Serializes a composed layout, mainly for snapshotting and debugging.
pub fn layout_to_json(layout: &MapLayout, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(layout)?
    } else {
        serde_json::to_string(layout)?
    })
}
