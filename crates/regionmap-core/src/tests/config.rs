use crate::*;
use serde_json::json;

#[test]
fn partial_json_layers_over_defaults() {
    let config = MapConfig::from_json_str(
        r##"{
            "default_theme": "dark",
            "animation": {"pulse_duration": 1.5},
            "custom_regions": {"lab": {"name": "Home Lab", "coordinates": [10, 20]}},
            "preset_overrides": {"warning": {"color": "#abcdef"}}
        }"##,
    )
    .unwrap();

    assert_eq!(config.default_theme.as_deref(), Some("dark"));
    assert_eq!(config.animation.pulse_duration, 1.5);
    assert_eq!(config.animation.fade_duration, 3.0);
    assert_eq!(config.region_marker_radius, 2.0);
    assert_eq!(
        config.custom_region("LAB").map(|r| r.coordinates),
        Some(Coordinates::new(10.0, 20.0))
    );
    assert_eq!(
        config.preset_overrides["warning"].colour.as_deref(),
        Some("#abcdef")
    );
}

#[test]
fn yaml_config_loads() {
    let config = MapConfig::from_yaml_str(
        "default_layout: side_by_side\nshow_regions: false\nfallback_preset: inactive\n",
    )
    .unwrap();
    assert_eq!(config.default_layout, Layout::SideBySide);
    assert!(!config.show_regions);
    assert_eq!(config.fallback_preset, BuiltinPreset::Inactive);
}

#[test]
fn merged_with_deep_merges_objects() {
    let base = MapConfig::default()
        .with_custom_region("a", Some("A"), Coordinates::new(1.0, 1.0));
    let merged = base
        .merged_with(&json!({
            "custom_regions": {"b": {"coordinates": [2, 2]}},
            "bbox": {"width": 400.0}
        }))
        .unwrap();
    assert!(merged.custom_region("a").is_some());
    assert!(merged.custom_region("b").is_some());
    assert_eq!(merged.bbox.width, 400.0);
    assert_eq!(merged.bbox.height, 391.0);
}

#[test]
fn invalid_config_is_an_error() {
    let err = MapConfig::from_json_str(r#"{"show_regions": "maybe"}"#).unwrap_err();
    assert!(matches!(err, Error::ConfigJson(_)));
    assert!(MapConfig::from_json_str("{").is_err());
}

#[test]
fn layout_parses_from_str() {
    assert_eq!("side-by-side".parse::<Layout>(), Ok(Layout::SideBySide));
    assert_eq!("Stacked".parse::<Layout>(), Ok(Layout::Stacked));
    assert!("grid".parse::<Layout>().is_err());
}
