use crate::geom::{BoundingBox, Coordinates};
use crate::style::{BuiltinPreset, StyleAttributes};
use crate::theme::Theme;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A region registered by the deployment rather than compiled into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRegion {
    #[serde(default)]
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

/// How the legend is placed relative to the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Stacked,
    SideBySide,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::SideBySide => "side_by_side",
        }
    }
}

impl std::str::FromStr for Layout {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stacked" => Ok(Self::Stacked),
            "side_by_side" => Ok(Self::SideBySide),
            _ => Err(()),
        }
    }
}

/// Timing constants shared by every animated marker in a render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Pulse cycle length in seconds.
    pub pulse_duration: f64,
    /// Fade cycle length in seconds.
    pub fade_duration: f64,
    /// Peak radius of a pulsing marker, as a multiple of its resting radius.
    pub pulse_radius_scale: f64,
    pub fade_min_opacity: f64,
    pub fade_max_opacity: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            pulse_duration: 2.0,
            fade_duration: 3.0,
            pulse_radius_scale: 1.6,
            fade_min_opacity: 0.3,
            fade_max_opacity: 1.0,
        }
    }
}

/// Deployment configuration.
///
/// Built once at startup and handed by reference to every pipeline entry point. Nothing in the
/// pipeline mutates it, so one value can serve any number of renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub custom_regions: IndexMap<String, CustomRegion>,
    pub custom_themes: IndexMap<String, Theme>,
    pub custom_presets: IndexMap<String, StyleAttributes>,
    /// Per-field overrides layered over the compiled semantic presets.
    pub preset_overrides: IndexMap<String, StyleAttributes>,
    pub default_theme: Option<String>,
    pub default_layout: Layout,
    pub marker_opacity: f64,
    pub hover_opacity: f64,
    pub animation: AnimationConfig,
    pub region_marker_radius: f64,
    pub show_regions: bool,
    pub bbox: BoundingBox,
    /// Preset substituted for unrecognized preset names.
    pub fallback_preset: BuiltinPreset,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            custom_regions: IndexMap::new(),
            custom_themes: IndexMap::new(),
            custom_presets: IndexMap::new(),
            preset_overrides: IndexMap::new(),
            default_theme: None,
            default_layout: Layout::Stacked,
            marker_opacity: 1.0,
            hover_opacity: 0.8,
            animation: AnimationConfig::default(),
            region_marker_radius: 2.0,
            show_regions: true,
            bbox: BoundingBox::default(),
            fallback_preset: BuiltinPreset::Operational,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a (possibly partial) JSON document and layers it over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::default().merged_with(&value)
    }

    /// Parses a (possibly partial) YAML document and layers it over the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::default().merged_with(&value)
    }

    /// Returns a copy of this config with `overrides` deep-merged on top.
    ///
    /// Objects merge key by key; scalars and arrays replace.
    pub fn merged_with(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        Ok(serde_json::from_value(base)?)
    }

    /// Looks up a custom region, ignoring ASCII case. Later entries win over earlier ones.
    pub fn custom_region(&self, code: &str) -> Option<&CustomRegion> {
        self.custom_regions
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(code))
            .map(|(_, v)| v)
    }

    pub fn with_custom_region(
        mut self,
        code: impl Into<String>,
        name: Option<&str>,
        coordinates: Coordinates,
    ) -> Self {
        self.custom_regions.insert(
            code.into(),
            CustomRegion {
                name: name.map(str::to_string),
                coordinates,
            },
        );
        self
    }

    pub fn with_custom_preset(mut self, name: impl Into<String>, attrs: StyleAttributes) -> Self {
        self.custom_presets.insert(name.into(), attrs);
        self
    }

    pub fn with_preset_override(mut self, preset: BuiltinPreset, attrs: StyleAttributes) -> Self {
        self.preset_overrides
            .insert(preset.as_str().to_string(), attrs);
        self
    }

    pub fn with_custom_theme(mut self, name: impl Into<String>, theme: Theme) -> Self {
        self.custom_themes.insert(name.into(), theme);
        self
    }

    pub fn with_default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = Some(name.into());
        self
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
