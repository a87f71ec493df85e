//! Equirectangular projection onto a plotting box.
//!
//! Longitude maps linearly to x and latitude to y, with y growing downwards. There is no
//! clipping or wrap-around: anything outside ±90/±180 lands outside the box, which is how
//! invalid positions are pushed off-screen.

use regionmap_core::{BoundingBox, Coordinates};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Latitude/longitude guaranteed to project outside any box.
pub const OFFSCREEN: Coordinates = Coordinates::new(-1000.0, -1000.0);

pub fn project(coordinates: Coordinates, bbox: &BoundingBox) -> Point {
    let x_percent = (coordinates.lon - (-180.0)) / 360.0;
    let y_percent = 1.0 - (coordinates.lat - (-90.0)) / 180.0;
    Point {
        x: x_percent * bbox.width + bbox.min_x,
        y: y_percent * bbox.height + bbox.min_y,
    }
}

/// Like [`project`], but non-finite input goes to [`OFFSCREEN`] instead of producing NaN.
pub fn project_or_offscreen(coordinates: Coordinates, bbox: &BoundingBox) -> Point {
    if coordinates.is_finite() {
        project(coordinates, bbox)
    } else {
        project(OFFSCREEN, bbox)
    }
}
