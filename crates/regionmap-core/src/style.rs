//! Marker style resolution.
//!
//! Every path through this module yields a complete [`Style`]; style input never fails. The
//! layers, from most to least specific:
//!
//! - explicit attributes on the group
//! - a preset name: user preset, then configured override of a built-in, then the compiled
//!   built-in, then the caller's fallback preset
//! - automatic colour cycling for groups with no style at all

use crate::colour::{self, CYCLE_PALETTE, NEUTRAL_GRAY};
use crate::config::MapConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_SIZE: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    None,
    Pulse,
    Fade,
}

impl Animation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pulse => "pulse",
            Self::Fade => "fade",
        }
    }
}

impl std::str::FromStr for Animation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "pulse" => Ok(Self::Pulse),
            "fade" => Ok(Self::Fade),
            _ => Err(()),
        }
    }
}

/// Which resolution path produced a style. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleSource {
    Explicit,
    CustomPreset { name: String },
    BuiltinPreset { preset: BuiltinPreset },
    /// The requested preset was unknown and `preset` stood in for it.
    FallbackPreset { requested: String, preset: BuiltinPreset },
    Cycled { index: usize },
    Named { name: String },
}

/// Fully defaulted visual attributes of a marker group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub colour: String,
    pub size: f64,
    pub animation: Animation,
    pub glow: bool,
    /// Caller-supplied fields this crate does not interpret, kept alongside the resolved ones.
    /// Never holds a key listed in [`Style::RESERVED_KEYS`].
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
    pub resolved_from: StyleSource,
}

impl Style {
    /// Keys `Style` serializes itself; caller extras with these names are dropped.
    pub const RESERVED_KEYS: [&'static str; 5] =
        ["colour", "size", "animation", "glow", "resolved_from"];
}

/// Partially specified style, as found in input documents, presets and overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleAttributes {
    #[serde(default, alias = "color", skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<bool>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl StyleAttributes {
    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn glow(mut self, glow: bool) -> Self {
        self.glow = Some(glow);
        self
    }

    /// Reads attributes from a JSON object without ever failing.
    ///
    /// Known keys with unusable values are ignored (and therefore defaulted later); unknown keys
    /// are carried in `extra`.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut out = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "colour" | "color" => {
                    if out.colour.is_none() || key == "colour" {
                        out.colour = value.as_str().map(str::to_string);
                    }
                }
                "size" => out.size = value.as_f64(),
                "animation" => {
                    out.animation = value.as_str().and_then(|s| s.parse().ok());
                }
                // Older inputs spell "pulse" as a boolean flag.
                "animated" => {
                    if out.animation.is_none() && value.as_bool() == Some(true) {
                        out.animation = Some(Animation::Pulse);
                    }
                }
                "glow" => out.glow = value.as_bool(),
                _ => {
                    out.extra.insert(key.clone(), value.clone());
                }
            }
        }
        out
    }

    /// `self` with every field set in `over` replaced by `over`'s value.
    pub fn layered(&self, over: &StyleAttributes) -> StyleAttributes {
        let mut extra = self.extra.clone();
        for (k, v) in &over.extra {
            extra.insert(k.clone(), v.clone());
        }
        StyleAttributes {
            colour: over.colour.clone().or_else(|| self.colour.clone()),
            size: over.size.or(self.size),
            animation: over.animation.or(self.animation),
            glow: over.glow.or(self.glow),
            extra,
        }
    }

    /// Fills every unset field with its default.
    pub fn resolve(&self, resolved_from: StyleSource) -> Style {
        let colour = match self.colour.as_deref() {
            Some(raw) => colour::resolve_colour(raw).unwrap_or_else(|| {
                tracing::debug!(colour = raw, "unresolvable colour, using neutral gray");
                NEUTRAL_GRAY.to_string()
            }),
            None => NEUTRAL_GRAY.to_string(),
        };
        let size = self
            .size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SIZE);
        Style {
            colour,
            size,
            animation: self.animation.unwrap_or_default(),
            glow: self.glow.unwrap_or(false),
            extra: self
                .extra
                .iter()
                .filter(|(key, _)| !Style::RESERVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            resolved_from,
        }
    }
}

/// Compiled semantic presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinPreset {
    #[default]
    Operational,
    Warning,
    Danger,
    Inactive,
    Primary,
    Secondary,
    Info,
}

impl BuiltinPreset {
    pub const ALL: [BuiltinPreset; 7] = [
        Self::Operational,
        Self::Warning,
        Self::Danger,
        Self::Inactive,
        Self::Primary,
        Self::Secondary,
        Self::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Inactive => "inactive",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Info => "info",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
    }

    pub fn attributes(self) -> StyleAttributes {
        let (colour, size, animation, glow) = match self {
            Self::Operational => ("#10b981", 4.0, Animation::Pulse, true),
            Self::Warning => ("#f59e0b", 4.0, Animation::Pulse, true),
            Self::Danger => ("#ef4444", 5.0, Animation::Pulse, true),
            Self::Inactive => ("#9ca3af", 3.0, Animation::None, false),
            Self::Primary => ("#3b82f6", 4.0, Animation::None, false),
            Self::Secondary => ("#8b5cf6", 4.0, Animation::None, false),
            Self::Info => ("#06b6d4", 4.0, Animation::Fade, false),
        };
        StyleAttributes::default()
            .colour(colour)
            .size(size)
            .animation(animation)
            .glow(glow)
    }
}

/// Style input for one group.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSpec {
    Attributes(StyleAttributes),
    Preset(String),
}

impl StyleSpec {
    pub fn preset(name: impl Into<String>) -> Self {
        Self::Preset(name.into())
    }

    /// Strings name a preset, objects carry attributes. Anything else becomes empty attributes
    /// so it still resolves to a usable default.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::Preset(name.clone()),
            Value::Object(map) => Self::Attributes(StyleAttributes::from_map(map)),
            other => {
                tracing::debug!(?other, "unrecognized style value, using defaults");
                Self::Attributes(StyleAttributes::default())
            }
        }
    }
}

impl From<StyleAttributes> for StyleSpec {
    fn from(value: StyleAttributes) -> Self {
        Self::Attributes(value)
    }
}

impl From<BuiltinPreset> for StyleSpec {
    fn from(value: BuiltinPreset) -> Self {
        Self::Preset(value.as_str().to_string())
    }
}

/// Resolves style input against a configuration.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    config: &'a MapConfig,
}

impl<'a> StyleResolver<'a> {
    pub fn new(config: &'a MapConfig) -> Self {
        Self { config }
    }

    /// Resolves any style input. Unknown preset names fall back to the configured
    /// `fallback_preset`.
    pub fn normalize_style(&self, spec: &StyleSpec) -> Style {
        match spec {
            StyleSpec::Attributes(attrs) => attrs.resolve(StyleSource::Explicit),
            StyleSpec::Preset(name) => self.preset(name, self.config.fallback_preset),
        }
    }

    /// Resolves a preset name, substituting `fallback_preset` when nothing matches.
    pub fn preset(&self, name: &str, fallback_preset: BuiltinPreset) -> Style {
        if let Some(style) = self.lookup_preset(name) {
            return style;
        }
        tracing::warn!(
            preset = name,
            fallback = fallback_preset.as_str(),
            "unknown style preset, substituting fallback"
        );
        let mut style = self.builtin(fallback_preset);
        style.resolved_from = StyleSource::FallbackPreset {
            requested: name.to_string(),
            preset: fallback_preset,
        };
        style
    }

    /// Strict preset lookup: user presets, then built-ins (with configured overrides).
    pub fn lookup_preset(&self, name: &str) -> Option<Style> {
        let key = name.trim();
        if let Some(attrs) = self
            .config
            .custom_presets
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
        {
            return Some(attrs.resolve(StyleSource::CustomPreset {
                name: key.to_string(),
            }));
        }
        BuiltinPreset::from_name(key).map(|preset| self.builtin(preset))
    }

    /// A compiled preset with any configured override layered on top.
    pub fn builtin(&self, preset: BuiltinPreset) -> Style {
        let compiled = preset.attributes();
        let attrs = match self
            .config
            .preset_overrides
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(preset.as_str()))
        {
            Some((_, over)) => {
                tracing::debug!(preset = preset.as_str(), "applying configured preset override");
                compiled.layered(over)
            }
            None => compiled,
        };
        attrs.resolve(StyleSource::BuiltinPreset { preset })
    }
}

/// Automatic colour for the group at `index`: `index mod 12` into [`CYCLE_PALETTE`], with
/// `defaults` supplying size, animation and glow.
pub fn cycle(index: usize, defaults: &StyleAttributes) -> Style {
    let colour = CYCLE_PALETTE[index % CYCLE_PALETTE.len()];
    let mut attrs = defaults.clone();
    attrs.colour = Some(colour.to_string());
    attrs.resolve(StyleSource::Cycled { index })
}

/// Style for a symbolic colour name, with `defaults` supplying everything but the colour.
///
/// Unknown names resolve to neutral gray.
pub fn named_colours(name: &str, defaults: &StyleAttributes) -> Style {
    let colour = colour::named_colour(name).unwrap_or(NEUTRAL_GRAY);
    let mut attrs = defaults.clone();
    attrs.colour = Some(colour.to_string());
    attrs.resolve(StyleSource::Named {
        name: name.trim().to_string(),
    })
}
