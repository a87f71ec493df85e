//! Land outlines drawn underneath the markers.

use crate::projection::project;
use regionmap_core::{BoundingBox, Coordinates};
use std::fmt::Write as _;

/// Supplies SVG path data (`d` attribute values) for the land masses, already fitted to `bbox`.
pub trait LandPaths {
    fn paths(&self, bbox: &BoundingBox) -> Vec<String>;
}

/// Ocean only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLand;

impl LandPaths for NoLand {
    fn paths(&self, _bbox: &BoundingBox) -> Vec<String> {
        Vec::new()
    }
}

/// Closed outlines given as latitude/longitude rings, projected on demand.
#[derive(Debug, Clone, Default)]
pub struct LandPolygons {
    pub rings: Vec<Vec<Coordinates>>,
}

impl LandPolygons {
    pub fn new(rings: Vec<Vec<Coordinates>>) -> Self {
        Self { rings }
    }

    /// Very rough continent outlines; enough to orient the reader.
    pub fn coarse_world() -> Self {
        let ring = |pts: &[(f64, f64)]| {
            pts.iter()
                .map(|&(lat, lon)| Coordinates::new(lat, lon))
                .collect::<Vec<_>>()
        };
        Self::new(vec![
            // North America
            ring(&[
                (70.0, -165.0),
                (72.0, -100.0),
                (60.0, -65.0),
                (45.0, -60.0),
                (25.0, -80.0),
                (15.0, -90.0),
                (8.0, -80.0),
                (20.0, -105.0),
                (35.0, -120.0),
                (55.0, -135.0),
                (60.0, -165.0),
            ]),
            // South America
            ring(&[
                (12.0, -72.0),
                (5.0, -50.0),
                (-8.0, -35.0),
                (-25.0, -45.0),
                (-55.0, -68.0),
                (-40.0, -73.0),
                (-15.0, -76.0),
                (0.0, -80.0),
            ]),
            // Europe and Asia
            ring(&[
                (36.0, -10.0),
                (44.0, -9.0),
                (58.0, 5.0),
                (71.0, 25.0),
                (75.0, 100.0),
                (66.0, 180.0),
                (60.0, 160.0),
                (40.0, 140.0),
                (22.0, 120.0),
                (8.0, 105.0),
                (20.0, 90.0),
                (8.0, 77.0),
                (25.0, 57.0),
                (12.0, 44.0),
                (30.0, 33.0),
                (37.0, 25.0),
                (38.0, 12.0),
            ]),
            // Africa
            ring(&[
                (35.0, -6.0),
                (37.0, 10.0),
                (31.0, 32.0),
                (12.0, 44.0),
                (10.0, 51.0),
                (-25.0, 35.0),
                (-34.0, 20.0),
                (-17.0, 11.0),
                (5.0, 8.0),
                (5.0, -8.0),
                (15.0, -17.0),
            ]),
            // Australia
            ring(&[
                (-11.0, 131.0),
                (-11.0, 142.0),
                (-28.0, 153.0),
                (-38.0, 147.0),
                (-35.0, 117.0),
                (-22.0, 114.0),
            ]),
        ])
    }
}

impl LandPaths for LandPolygons {
    fn paths(&self, bbox: &BoundingBox) -> Vec<String> {
        self.rings
            .iter()
            .filter(|ring| ring.len() >= 3)
            .map(|ring| {
                let mut d = String::new();
                for (i, c) in ring.iter().enumerate() {
                    let p = project(*c, bbox);
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(&mut d, "{cmd}{},{}", crate::svg::fmt(p.x), crate::svg::fmt(p.y));
                }
                d.push('Z');
                d
            })
            .collect()
    }
}

/// Pre-projected path data used as-is.
#[derive(Debug, Clone, Default)]
pub struct RawLandPaths(pub Vec<String>);

impl LandPaths for RawLandPaths {
    fn paths(&self, _bbox: &BoundingBox) -> Vec<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_project_into_the_box() {
        let land = LandPolygons::new(vec![vec![
            Coordinates::new(90.0, -180.0),
            Coordinates::new(0.0, 0.0),
            Coordinates::new(-90.0, 180.0),
        ]]);
        let paths = land.paths(&BoundingBox::default());
        assert_eq!(paths, vec!["M0,0L400,195.5L800,391Z".to_string()]);
    }

    #[test]
    fn degenerate_rings_are_skipped() {
        let land = LandPolygons::new(vec![vec![Coordinates::new(0.0, 0.0)]]);
        assert!(land.paths(&BoundingBox::default()).is_empty());
        assert!(NoLand.paths(&BoundingBox::default()).is_empty());
    }

    #[test]
    fn coarse_world_has_one_path_per_continent() {
        assert_eq!(LandPolygons::coarse_world().paths(&BoundingBox::default()).len(), 5);
    }
}
