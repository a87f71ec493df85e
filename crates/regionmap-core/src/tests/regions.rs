use crate::*;

#[test]
fn builtin_lookup_is_case_insensitive() {
    let config = MapConfig::default();
    let catalog = RegionCatalog::new(&config);
    assert_eq!(catalog.lookup("sjc").unwrap(), Coordinates::new(37.0, -122.0));
    assert_eq!(catalog.lookup("FRA").unwrap(), Coordinates::new(50.0, 9.0));
    assert_eq!(catalog.name("fra").unwrap(), "Frankfurt, Germany");
}

#[test]
fn unknown_code_is_reported() {
    let config = MapConfig::default();
    let catalog = RegionCatalog::new(&config);
    assert_eq!(
        catalog.lookup("zzz"),
        Err(NodeError::UnknownRegion {
            code: "zzz".to_string()
        })
    );
    assert!(catalog.name("zzz").is_err());
}

#[test]
fn custom_regions_take_precedence_and_extend() {
    let config = MapConfig::default()
        .with_custom_region("sjc", Some("Moved"), Coordinates::new(1.0, 2.0))
        .with_custom_region("lab", Some("Home Lab"), Coordinates::new(10.0, 20.0));
    let catalog = RegionCatalog::new(&config);

    assert_eq!(catalog.lookup("sjc").unwrap(), Coordinates::new(1.0, 2.0));
    assert_eq!(catalog.name("sjc").unwrap(), "Moved");
    assert_eq!(catalog.lookup("LAB").unwrap(), Coordinates::new(10.0, 20.0));

    let all = catalog.all();
    assert_eq!(all.len(), BUILTIN_REGIONS.len() + 1);
    assert_eq!(all["sjc"], Coordinates::new(1.0, 2.0));
    assert_eq!(all.get_index_of("lab"), Some(BUILTIN_REGIONS.len()));
}

#[test]
fn nameless_custom_region_borrows_builtin_name() {
    let config =
        MapConfig::default().with_custom_region("ams", None, Coordinates::new(0.0, 0.0));
    let catalog = RegionCatalog::new(&config);
    assert_eq!(catalog.name("ams").unwrap(), "Amsterdam, Netherlands");

    let config =
        MapConfig::default().with_custom_region("edge", None, Coordinates::new(0.0, 0.0));
    let catalog = RegionCatalog::new(&config);
    assert!(catalog.name("edge").is_err());
    assert_eq!(catalog.region("edge").unwrap().name, "edge");
}

#[test]
fn conflicting_custom_entries_last_write_wins() {
    let config = MapConfig::default()
        .with_custom_region("Edge", Some("first"), Coordinates::new(1.0, 1.0))
        .with_custom_region("edge", Some("second"), Coordinates::new(2.0, 2.0));
    let catalog = RegionCatalog::new(&config);
    assert_eq!(catalog.name("EDGE").unwrap(), "second");
    assert_eq!(catalog.all()["edge"], Coordinates::new(2.0, 2.0));
}
