use crate::*;
use serde_json::json;

fn resolve(spec: &NodeSpec) -> std::result::Result<Node, NodeError> {
    let config = MapConfig::default();
    normalize_node(spec, &RegionCatalog::new(&config))
}

#[test]
fn region_code_uses_catalog_name() {
    let node = resolve(&NodeSpec::region("sjc")).unwrap();
    assert_eq!(node.label, "San Jose, California (US)");
    assert_eq!(node.coordinates, Coordinates::new(37.0, -122.0));
}

#[test]
fn region_code_without_name_falls_back_to_code() {
    let config =
        MapConfig::default().with_custom_region("edge", None, Coordinates::new(5.0, 6.0));
    let node = normalize_node(&NodeSpec::region("edge"), &RegionCatalog::new(&config)).unwrap();
    assert_eq!(node.label, "edge");
}

#[test]
fn coordinate_pair_gets_generated_label() {
    let node = resolve(&NodeSpec::coordinates(37.5, -122.0)).unwrap();
    assert_eq!(node.label, "(37.5, -122)");
}

#[test]
fn labeled_region_keeps_label() {
    let node = resolve(&NodeSpec::labeled_region("Primary DB", "fra")).unwrap();
    assert_eq!(node.label, "Primary DB");
    assert_eq!(node.coordinates, Coordinates::new(50.0, 9.0));

    let err = resolve(&NodeSpec::labeled_region("Nowhere", "zzz")).unwrap_err();
    assert!(matches!(err, NodeError::UnknownRegion { .. }));
}

#[test]
fn coordinates_are_not_range_checked() {
    let node = resolve(&NodeSpec::labeled_coordinates("Far", 500.0, -999.0)).unwrap();
    assert_eq!(node.coordinates, Coordinates::new(500.0, -999.0));
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let err = resolve(&NodeSpec::coordinates(f64::NAN, 0.0)).unwrap_err();
    assert!(matches!(err, NodeError::InvalidCoordinates { .. }));
}

#[test]
fn parses_every_accepted_json_shape() {
    assert_eq!(
        NodeSpec::from_value(&json!("sjc")).unwrap(),
        NodeSpec::region("sjc")
    );
    assert_eq!(
        NodeSpec::from_value(&json!([37, -122])).unwrap(),
        NodeSpec::coordinates(37.0, -122.0)
    );
    assert_eq!(
        NodeSpec::from_value(&json!({"label": "DB", "region": "fra"})).unwrap(),
        NodeSpec::labeled_region("DB", "fra")
    );
    assert_eq!(
        NodeSpec::from_value(&json!({"region": "fra"})).unwrap(),
        NodeSpec::region("fra")
    );
    assert_eq!(
        NodeSpec::from_value(&json!({"label": "Office", "coordinates": [1.5, 2.5]})).unwrap(),
        NodeSpec::labeled_coordinates("Office", 1.5, 2.5)
    );
    assert_eq!(
        NodeSpec::from_value(&json!({"coordinates": {"lat": 1, "lng": 2}})).unwrap(),
        NodeSpec::coordinates(1.0, 2.0)
    );
    assert_eq!(
        NodeSpec::from_value(&json!({"label": "X", "lat": 3, "lon": 4})).unwrap(),
        NodeSpec::labeled_coordinates("X", 3.0, 4.0)
    );
}

#[test]
fn malformed_json_nodes_are_classified() {
    assert!(matches!(
        NodeSpec::from_value(&json!(42)),
        Err(NodeError::InvalidFormat { .. })
    ));
    assert!(matches!(
        NodeSpec::from_value(&json!({"label": "x"})),
        Err(NodeError::InvalidFormat { .. })
    ));
    assert!(matches!(
        NodeSpec::from_value(&json!([1, 2, 3])),
        Err(NodeError::InvalidCoordinates { .. })
    ));
    assert!(matches!(
        NodeSpec::from_value(&json!({"coordinates": ["a", 1]})),
        Err(NodeError::InvalidCoordinates { .. })
    ));
}
