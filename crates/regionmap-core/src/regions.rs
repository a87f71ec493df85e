//! Region catalog: compiled region table overlaid with deployment-configured regions.
//!
//! Lookup order is custom regions first, then the compiled table. Deployments can therefore
//! re-point or extend any code without touching compiled data.

use crate::config::MapConfig;
use crate::error::NodeError;
use crate::geom::Coordinates;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinRegion {
    pub code: &'static str,
    pub name: &'static str,
    pub coordinates: Coordinates,
}

const fn region(code: &'static str, name: &'static str, lat: f64, lon: f64) -> BuiltinRegion {
    BuiltinRegion {
        code,
        name,
        coordinates: Coordinates::new(lat, lon),
    }
}

/// Compiled region table. Coordinates are rounded to whole degrees; that is plenty for a
/// world-scale map.
pub const BUILTIN_REGIONS: &[BuiltinRegion] = &[
    region("ams", "Amsterdam, Netherlands", 52.0, 5.0),
    region("arn", "Stockholm, Sweden", 59.0, 18.0),
    region("atl", "Atlanta, Georgia (US)", 34.0, -84.0),
    region("bog", "Bogotá, Colombia", 5.0, -74.0),
    region("bom", "Mumbai, India", 19.0, 73.0),
    region("bos", "Boston, Massachusetts (US)", 42.0, -71.0),
    region("cdg", "Paris, France", 49.0, 3.0),
    region("den", "Denver, Colorado (US)", 40.0, -105.0),
    region("dfw", "Dallas, Texas (US)", 33.0, -97.0),
    region("ewr", "Secaucus, NJ (US)", 41.0, -74.0),
    region("eze", "Ezeiza, Argentina", -35.0, -58.0),
    region("fra", "Frankfurt, Germany", 50.0, 9.0),
    region("gdl", "Guadalajara, Mexico", 21.0, -103.0),
    region("gig", "Rio de Janeiro, Brazil", -23.0, -43.0),
    region("gru", "Sao Paulo, Brazil", -24.0, -46.0),
    region("hkg", "Hong Kong, Hong Kong", 22.0, 114.0),
    region("iad", "Ashburn, Virginia (US)", 39.0, -77.0),
    region("jnb", "Johannesburg, South Africa", -26.0, 28.0),
    region("lax", "Los Angeles, California (US)", 34.0, -118.0),
    region("lhr", "London, United Kingdom", 51.0, 0.0),
    region("mad", "Madrid, Spain", 40.0, -4.0),
    region("mia", "Miami, Florida (US)", 26.0, -80.0),
    region("nrt", "Tokyo, Japan", 36.0, 140.0),
    region("ord", "Chicago, Illinois (US)", 42.0, -88.0),
    region("otp", "Bucharest, Romania", 44.0, 26.0),
    region("phx", "Phoenix, Arizona (US)", 33.0, -112.0),
    region("qro", "Querétaro, Mexico", 21.0, -100.0),
    region("scl", "Santiago, Chile", -33.0, -71.0),
    region("sea", "Seattle, Washington (US)", 47.0, -122.0),
    region("sin", "Singapore, Singapore", 1.0, 104.0),
    region("sjc", "San Jose, California (US)", 37.0, -122.0),
    region("syd", "Sydney, Australia", -34.0, 151.0),
    region("waw", "Warsaw, Poland", 52.0, 21.0),
    region("yul", "Montreal, Canada", 46.0, -74.0),
    region("yyz", "Toronto, Canada", 44.0, -80.0),
];

fn builtin(code: &str) -> Option<&'static BuiltinRegion> {
    BUILTIN_REGIONS
        .iter()
        .find(|r| r.code.eq_ignore_ascii_case(code))
}

/// A fully resolved catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub coordinates: Coordinates,
}

/// Read-only view over the compiled table and a config's custom regions.
#[derive(Debug, Clone, Copy)]
pub struct RegionCatalog<'a> {
    config: &'a MapConfig,
}

impl<'a> RegionCatalog<'a> {
    pub fn new(config: &'a MapConfig) -> Self {
        Self { config }
    }

    pub fn lookup(&self, code: &str) -> Result<Coordinates, NodeError> {
        let code = code.trim();
        if let Some(custom) = self.config.custom_region(code) {
            return Ok(custom.coordinates);
        }
        builtin(code)
            .map(|r| r.coordinates)
            .ok_or_else(|| unknown(code))
    }

    /// Display name for `code`.
    ///
    /// A custom region without a name of its own borrows the compiled name when the code also
    /// exists there.
    pub fn name(&self, code: &str) -> Result<String, NodeError> {
        let code = code.trim();
        if let Some(name) = self
            .config
            .custom_region(code)
            .and_then(|r| r.name.as_deref())
            .filter(|n| !n.trim().is_empty())
        {
            return Ok(name.to_string());
        }
        builtin(code)
            .map(|r| r.name.to_string())
            .ok_or_else(|| unknown(code))
    }

    pub fn region(&self, code: &str) -> Result<Region, NodeError> {
        let coordinates = self.lookup(code)?;
        let name = self
            .name(code)
            .unwrap_or_else(|_| code.trim().to_string());
        Ok(Region {
            code: code.trim().to_ascii_lowercase(),
            name,
            coordinates,
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_ok()
    }

    /// Every known region code (lower-cased) mapped to its coordinates.
    ///
    /// Compiled regions come first in table order, followed by custom-only codes in
    /// configuration order.
    pub fn all(&self) -> IndexMap<String, Coordinates> {
        let mut out: IndexMap<String, Coordinates> = BUILTIN_REGIONS
            .iter()
            .map(|r| (r.code.to_string(), r.coordinates))
            .collect();
        for (code, custom) in &self.config.custom_regions {
            out.insert(code.trim().to_ascii_lowercase(), custom.coordinates);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unknown(code: &str) -> NodeError {
    NodeError::UnknownRegion {
        code: code.to_string(),
    }
}
