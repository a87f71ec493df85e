use crate::error::NodeError;
use crate::geom::Coordinates;
use crate::regions::RegionCatalog;
use serde::Serialize;
use serde_json::{Map, Value};

/// One position specification as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSpec {
    /// `"sjc"`: label comes from the catalog.
    RegionCode(String),
    /// Raw coordinates; the label is generated from the numbers.
    CoordinatePair(Coordinates),
    /// Explicit label placed at a catalog region. The label is kept as given.
    LabeledRegion { label: String, region: String },
    LabeledCoordinates { label: String, coordinates: Coordinates },
}

impl NodeSpec {
    pub fn region(code: impl Into<String>) -> Self {
        Self::RegionCode(code.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self::CoordinatePair(Coordinates::new(lat, lon))
    }

    pub fn labeled_region(label: impl Into<String>, region: impl Into<String>) -> Self {
        Self::LabeledRegion {
            label: label.into(),
            region: region.into(),
        }
    }

    pub fn labeled_coordinates(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::LabeledCoordinates {
            label: label.into(),
            coordinates: Coordinates::new(lat, lon),
        }
    }

    /// Parses one JSON node.
    ///
    /// Accepted shapes: `"sjc"`, `[lat, lon]`, `{"label", "region"}`, `{"region"}`,
    /// `{"label"?, "coordinates": [lat, lon] | {"lat", "lon"}}` and `{"label"?, "lat", "lon"}`.
    pub fn from_value(value: &Value) -> Result<Self, NodeError> {
        match value {
            Value::String(code) => {
                if code.trim().is_empty() {
                    return Err(invalid_format("empty region code"));
                }
                Ok(Self::RegionCode(code.clone()))
            }
            Value::Array(_) => parse_coordinates(value).map(Self::CoordinatePair),
            Value::Object(map) => parse_object(map),
            other => Err(invalid_format(format!(
                "expected a region code, coordinate pair or object, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl TryFrom<&Value> for NodeSpec {
    type Error = NodeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn parse_object(map: &Map<String, Value>) -> Result<NodeSpec, NodeError> {
    let label = match map.get("label") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(invalid_format(format!(
                "label must be a string, got {}",
                json_kind(other)
            )));
        }
    };

    if let Some(region) = map.get("region") {
        let Some(code) = region.as_str() else {
            return Err(invalid_format("region must be a string"));
        };
        return Ok(match label {
            Some(label) => NodeSpec::LabeledRegion {
                label,
                region: code.to_string(),
            },
            None => NodeSpec::RegionCode(code.to_string()),
        });
    }

    let coordinates = if let Some(coords) = map.get("coordinates") {
        parse_coordinates(coords)?
    } else if map.contains_key("lat") {
        parse_lat_lon(map)?
    } else {
        return Err(invalid_format(
            "object node needs a region, coordinates or lat/lon",
        ));
    };

    Ok(match label {
        Some(label) => NodeSpec::LabeledCoordinates { label, coordinates },
        None => NodeSpec::CoordinatePair(coordinates),
    })
}

fn parse_coordinates(value: &Value) -> Result<Coordinates, NodeError> {
    match value {
        Value::Array(items) => {
            let [lat, lon] = items.as_slice() else {
                return Err(invalid_coordinates(format!(
                    "expected [lat, lon], got {} values",
                    items.len()
                )));
            };
            match (lat.as_f64(), lon.as_f64()) {
                (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
                _ => Err(invalid_coordinates("coordinates must be numbers")),
            }
        }
        Value::Object(map) => parse_lat_lon(map),
        other => Err(invalid_coordinates(format!(
            "expected [lat, lon], got {}",
            json_kind(other)
        ))),
    }
}

fn parse_lat_lon(map: &Map<String, Value>) -> Result<Coordinates, NodeError> {
    let lat = map.get("lat").and_then(Value::as_f64);
    let lon = map
        .get("lon")
        .or_else(|| map.get("lng"))
        .and_then(Value::as_f64);
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
        _ => Err(invalid_coordinates("lat and lon must both be numbers")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn invalid_format(message: impl Into<String>) -> NodeError {
    NodeError::InvalidFormat {
        message: message.into(),
    }
}

fn invalid_coordinates(message: impl Into<String>) -> NodeError {
    NodeError::InvalidCoordinates {
        message: message.into(),
    }
}

/// A resolved marker position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub label: String,
    pub coordinates: Coordinates,
}

/// Resolves one node against the catalog.
///
/// Coordinates are not range-checked here; anything finite passes and off-globe values are
/// left for the projection to place off-screen.
pub fn normalize_node(spec: &NodeSpec, catalog: &RegionCatalog<'_>) -> Result<Node, NodeError> {
    match spec {
        NodeSpec::RegionCode(code) => {
            let coordinates = catalog.lookup(code)?;
            let label = catalog
                .name(code)
                .unwrap_or_else(|_| code.trim().to_string());
            Ok(Node { label, coordinates })
        }
        NodeSpec::CoordinatePair(coordinates) => {
            let coordinates = checked(*coordinates)?;
            Ok(Node {
                label: coordinates.auto_label(),
                coordinates,
            })
        }
        NodeSpec::LabeledRegion { label, region } => Ok(Node {
            label: label.clone(),
            coordinates: catalog.lookup(region)?,
        }),
        NodeSpec::LabeledCoordinates { label, coordinates } => Ok(Node {
            label: label.clone(),
            coordinates: checked(*coordinates)?,
        }),
    }
}

fn checked(coordinates: Coordinates) -> Result<Coordinates, NodeError> {
    if coordinates.is_finite() {
        Ok(coordinates)
    } else {
        Err(invalid_coordinates(format!(
            "non-finite coordinates ({}, {})",
            coordinates.lat, coordinates.lon
        )))
    }
}
