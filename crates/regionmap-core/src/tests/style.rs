use crate::*;
use serde_json::json;

fn attrs(value: serde_json::Value) -> StyleSpec {
    StyleSpec::from_value(&value)
}

#[test]
fn explicit_attributes_are_defaulted() {
    let config = MapConfig::default();
    let style = normalize_style(&attrs(json!({"colour": "#ff0000", "size": 10})), &config);
    assert_eq!(style.colour, "#ff0000");
    assert_eq!(style.size, 10.0);
    assert_eq!(style.animation, Animation::None);
    assert!(!style.glow);
    assert_eq!(style.resolved_from, StyleSource::Explicit);
}

#[test]
fn color_spelling_and_named_colours_resolve() {
    let config = MapConfig::default();
    let style = normalize_style(&attrs(json!({"color": "blue", "glow": true})), &config);
    assert_eq!(style.colour, "#3b82f6");
    assert!(style.glow);
    assert_eq!(style.size, 4.0);
}

#[test]
fn missing_or_unknown_colour_is_neutral_gray() {
    let config = MapConfig::default();
    assert_eq!(normalize_style(&attrs(json!({})), &config).colour, "#6b7280");
    assert_eq!(
        normalize_style(&attrs(json!({"colour": "not-a-colour"})), &config).colour,
        "#6b7280"
    );
    assert_eq!(normalize_style(&attrs(json!(17)), &config).colour, "#6b7280");
}

#[test]
fn extra_fields_never_shadow_resolved_keys() {
    let config = MapConfig::default();
    let style = normalize_style(
        &attrs(json!({"colour": "red", "source": "crm", "resolved_from": "crm"})),
        &config,
    );
    assert_eq!(style.extra.get("source"), Some(&json!("crm")));
    assert_eq!(style.extra.get("resolved_from"), None);

    let text = serde_json::to_string(&style).unwrap();
    assert_eq!(text.matches("\"source\"").count(), 1);
    assert_eq!(text.matches("\"resolved_from\"").count(), 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["source"], json!("crm"));
    assert_eq!(value["resolved_from"], json!({"kind": "explicit"}));
}

#[test]
fn extra_fields_are_preserved() {
    let config = MapConfig::default();
    let style = normalize_style(
        &attrs(json!({"colour": "red", "opacity": 0.5, "stroke": "#000"})),
        &config,
    );
    assert_eq!(style.extra.get("opacity"), Some(&json!(0.5)));
    assert_eq!(style.extra.get("stroke"), Some(&json!("#000")));

    let value = serde_json::to_value(&style).unwrap();
    assert_eq!(value["opacity"], json!(0.5));
    assert_eq!(value["colour"], json!("#ef4444"));
}

#[test]
fn invalid_known_fields_fall_back_to_defaults() {
    let config = MapConfig::default();
    let style = normalize_style(
        &attrs(json!({"size": -3, "animation": "wobble", "glow": "yes"})),
        &config,
    );
    assert_eq!(style.size, 4.0);
    assert_eq!(style.animation, Animation::None);
    assert!(!style.glow);
}

#[test]
fn builtin_presets_resolve() {
    let config = MapConfig::default();
    let style = normalize_style(&StyleSpec::preset("danger"), &config);
    assert_eq!(style.colour, "#ef4444");
    assert_eq!(style.animation, Animation::Pulse);
    assert_eq!(
        style.resolved_from,
        StyleSource::BuiltinPreset {
            preset: BuiltinPreset::Danger
        }
    );
}

#[test]
fn custom_preset_beats_override_beats_builtin() {
    let config = MapConfig::default()
        .with_preset_override(
            BuiltinPreset::Warning,
            StyleAttributes::default().colour("#123456"),
        )
        .with_custom_preset(
            "danger",
            StyleAttributes::default().colour("purple").size(9.0),
        );
    let resolver = StyleResolver::new(&config);

    let warning = resolver.normalize_style(&StyleSpec::preset("warning"));
    assert_eq!(warning.colour, "#123456");
    // Unset override fields keep the compiled values.
    assert_eq!(warning.animation, Animation::Pulse);
    assert!(warning.glow);

    let danger = resolver.normalize_style(&StyleSpec::preset("danger"));
    assert_eq!(danger.colour, "#8b5cf6");
    assert_eq!(danger.size, 9.0);
    assert_eq!(
        danger.resolved_from,
        StyleSource::CustomPreset {
            name: "danger".to_string()
        }
    );
}

#[test]
fn unknown_preset_uses_fallback_argument() {
    let config = MapConfig::default();
    let resolver = StyleResolver::new(&config);

    let style = resolver.normalize_style(&StyleSpec::preset("operatonal"));
    assert_eq!(style.colour, "#10b981");
    assert_eq!(
        style.resolved_from,
        StyleSource::FallbackPreset {
            requested: "operatonal".to_string(),
            preset: BuiltinPreset::Operational,
        }
    );

    let style = resolver.preset("nope", BuiltinPreset::Inactive);
    assert_eq!(style.colour, "#9ca3af");
    assert!(resolver.lookup_preset("nope").is_none());
}

#[test]
fn configured_fallback_preset_is_honored() {
    let config = MapConfig {
        fallback_preset: BuiltinPreset::Danger,
        ..MapConfig::default()
    };
    let style = normalize_style(&StyleSpec::preset("typo"), &config);
    assert_eq!(style.colour, "#ef4444");
}

#[test]
fn cycle_wraps_every_twelve() {
    let defaults = StyleAttributes::default();
    for i in 0..30 {
        assert_eq!(cycle(i, &defaults).colour, cycle(i + 12, &defaults).colour);
    }
    assert_ne!(cycle(0, &defaults).colour, cycle(1, &defaults).colour);
}

#[test]
fn cycle_layers_caller_defaults() {
    let defaults = StyleAttributes::default()
        .size(7.0)
        .animation(Animation::Fade)
        .glow(true);
    let style = cycle(3, &defaults);
    assert_eq!(style.colour, colour::CYCLE_PALETTE[3]);
    assert_eq!(style.size, 7.0);
    assert_eq!(style.animation, Animation::Fade);
    assert!(style.glow);
    assert_eq!(style.resolved_from, StyleSource::Cycled { index: 3 });
}

#[test]
fn named_colours_shortcut() {
    let style = named_colours("green", &StyleAttributes::default().size(6.0));
    assert_eq!(style.colour, "#10b981");
    assert_eq!(style.size, 6.0);
    assert_eq!(
        named_colours("mauve-ish", &StyleAttributes::default()).colour,
        "#6b7280"
    );
}

#[test]
fn legacy_animated_flag_means_pulse() {
    let config = MapConfig::default();
    let style = normalize_style(&attrs(json!({"animated": true})), &config);
    assert_eq!(style.animation, Animation::Pulse);
}
