use crate::config::MapConfig;
use serde::{Deserialize, Serialize};

/// Colours for everything on the map that is not a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub land: String,
    pub ocean: String,
    pub border: String,
    pub neutral_marker: String,
    pub neutral_text: String,
}

impl Theme {
    fn new(land: &str, ocean: &str, border: &str, neutral_marker: &str, neutral_text: &str) -> Self {
        Self {
            land: land.to_string(),
            ocean: ocean.to_string(),
            border: border.to_string(),
            neutral_marker: neutral_marker.to_string(),
            neutral_text: neutral_text.to_string(),
        }
    }
}

pub const DEFAULT_THEME_NAME: &str = "light";

/// The compiled library default (`light`).
pub fn default_theme() -> Theme {
    Theme::new("#888888", "#aaaaaa", "#0f172a", "#475569", "#1e293b")
}

pub const BUILTIN_THEME_NAMES: [&str; 6] =
    ["light", "dark", "minimal", "cool", "warm", "high_contrast"];

/// Compiled theme by name (ASCII case-insensitive; `-` and `_` are interchangeable).
pub fn builtin_theme(name: &str) -> Option<Theme> {
    let key = name.trim().to_ascii_lowercase().replace('-', "_");
    let theme = match key.as_str() {
        "light" => default_theme(),
        "dark" => Theme::new("#334155", "#0f172a", "#475569", "#64748b", "#e2e8f0"),
        "minimal" => Theme::new("#ffffff", "#f8fafc", "#e2e8f0", "#94a3b8", "#334155"),
        "cool" => Theme::new("#e0f2fe", "#bae6fd", "#0284c7", "#0369a1", "#0c4a6e"),
        "warm" => Theme::new("#fef3c7", "#fde68a", "#d97706", "#b45309", "#78350f"),
        "high_contrast" => Theme::new("#000000", "#ffffff", "#ffffff", "#ffff00", "#000000"),
        _ => return None,
    };
    Some(theme)
}

/// Theme argument of a render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSpec {
    Named(String),
    Inline(Theme),
}

impl From<&str> for ThemeSpec {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<Theme> for ThemeSpec {
    fn from(value: Theme) -> Self {
        Self::Inline(value)
    }
}

fn theme_by_name(config: &MapConfig, name: &str) -> Option<Theme> {
    config
        .custom_themes
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(name.trim()))
        .map(|(_, t)| t.clone())
        .or_else(|| builtin_theme(name))
}

/// Resolves the map theme.
///
/// Precedence: inline theme, then the named theme (custom before compiled), then the
/// configured default theme name, then the compiled `light` theme. Missing names are not
/// errors; resolution just moves down the chain.
pub fn resolve_theme(spec: Option<&ThemeSpec>, config: &MapConfig) -> Theme {
    match spec {
        Some(ThemeSpec::Inline(theme)) => return theme.clone(),
        Some(ThemeSpec::Named(name)) => {
            if let Some(theme) = theme_by_name(config, name) {
                return theme;
            }
            tracing::debug!(theme = name.as_str(), "unknown theme, trying configured default");
        }
        None => {}
    }
    if let Some(theme) = config
        .default_theme
        .as_deref()
        .and_then(|name| theme_by_name(config, name))
    {
        return theme;
    }
    default_theme()
}
