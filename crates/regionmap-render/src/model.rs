use regionmap_core::{BoundingBox, Layout, Theme};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { colour: String },
    /// Reference to a shared radial gradient in [`MapLayout::gradients`].
    Gradient { id: String },
}

impl Fill {
    /// Value for an SVG `fill` attribute.
    pub fn to_attr(&self) -> String {
        match self {
            Fill::Solid { colour } => colour.clone(),
            Fill::Gradient { id } => format!("url(#{id})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientDef {
    pub id: String,
    pub colour: String,
    /// Lighter centre stop.
    pub highlight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationLayout {
    Pulse {
        duration: f64,
        min_radius: f64,
        max_radius: f64,
    },
    Fade {
        duration: f64,
        min_opacity: f64,
        max_opacity: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayout {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Fill,
    /// `None` for static markers.
    pub animation: Option<AnimationLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLayout {
    pub label: String,
    pub group_label: Option<String>,
    pub markers: Vec<MarkerLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionDotLayout {
    pub code: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItemLayout {
    pub label: String,
    /// Toggle key; `None` for entries that cannot be toggled.
    pub group_label: Option<String>,
    pub visible: bool,
    pub detail: String,
    pub glyph: MarkerLayout,
    pub text_x: f64,
    pub text_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub items: Vec<LegendItemLayout>,
}

/// Everything the SVG writer needs; no further resolution happens after this point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub id: String,
    pub class: Option<String>,
    pub layout: Layout,
    pub width: f64,
    pub height: f64,
    /// Area the globe is projected onto.
    pub map_bbox: BoundingBox,
    pub theme: Theme,
    pub marker_opacity: f64,
    pub hover_opacity: f64,
    pub gradients: Vec<GradientDef>,
    pub region_dots: Vec<RegionDotLayout>,
    /// Visible groups only, in input order.
    pub groups: Vec<GroupLayout>,
    pub legend: LegendLayout,
}
