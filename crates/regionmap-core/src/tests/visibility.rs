use crate::*;

fn groups(config: &MapConfig) -> Vec<MarkerGroup> {
    normalize_groups(
        &[
            RawGroup::regions(["sjc"]).label("prod"),
            RawGroup::regions(["fra"]).label("staging"),
            RawGroup::regions(["ams"])
                .label("%%")
                .style(StyleSpec::preset("%%")),
        ],
        config,
    )
    .groups
}

#[test]
fn initial_selection_directives() {
    let config = MapConfig::default();
    let groups = groups(&config);

    let all = VisibilitySelection::new(&InitiallyVisible::All, &groups);
    assert_eq!(all.labels().collect::<Vec<_>>(), vec!["prod", "staging"]);

    let none = VisibilitySelection::new(&InitiallyVisible::None, &groups);
    assert!(none.is_empty());

    let only = VisibilitySelection::new(
        &InitiallyVisible::Only(vec!["staging".to_string()]),
        &groups,
    );
    assert!(only.contains("staging"));
    assert!(!only.contains("prod"));
}

#[test]
fn toggle_from_none() {
    let mut selection = VisibilitySelection::new(&InitiallyVisible::None, &[]);
    assert!(selection.toggle("prod"));
    assert_eq!(selection, VisibilitySelection::from_labels(["prod"]));
    assert!(!selection.toggle("prod"));
    assert!(selection.is_empty());
}

#[test]
fn toggle_is_self_inverse() {
    let original = VisibilitySelection::from_labels(["a", "b", "c"]);
    for label in ["a", "b", "z"] {
        let mut s = original.clone();
        s.toggle(label);
        s.toggle(label);
        assert_eq!(s, original);
    }
}

#[test]
fn ungrouped_entries_are_always_visible() {
    let config = MapConfig::default();
    let groups = groups(&config);
    let none = VisibilitySelection::new(&InitiallyVisible::None, &groups);
    assert!(!none.is_visible(&groups[0]));
    assert!(none.is_visible(&groups[2]));
}

#[test]
fn directive_parses_from_str() {
    assert_eq!("all".parse::<InitiallyVisible>(), Ok(InitiallyVisible::All));
    assert_eq!("none".parse::<InitiallyVisible>(), Ok(InitiallyVisible::None));
    assert_eq!(
        "prod, staging".parse::<InitiallyVisible>(),
        Ok(InitiallyVisible::Only(vec![
            "prod".to_string(),
            "staging".to_string()
        ]))
    );
}

#[test]
fn directive_keywords_ignore_case() {
    assert_eq!("ALL".parse::<InitiallyVisible>(), Ok(InitiallyVisible::All));
    assert_eq!(" None ".parse::<InitiallyVisible>(), Ok(InitiallyVisible::None));
    assert_eq!("".parse::<InitiallyVisible>(), Ok(InitiallyVisible::None));
}

#[test]
fn only_prefix_selects_keyword_labels() {
    let config = MapConfig::default();
    let groups = normalize_groups(
        &[
            RawGroup::regions(["sjc"]).label("all"),
            RawGroup::regions(["fra"]).label("none"),
            RawGroup::regions(["ams"]).label("prod"),
        ],
        &config,
    )
    .groups;

    let directive: InitiallyVisible = "only:all, none".parse().unwrap();
    assert_eq!(
        directive,
        InitiallyVisible::Only(vec!["all".to_string(), "none".to_string()])
    );
    let selection = VisibilitySelection::new(&directive, &groups);
    assert!(selection.is_visible(&groups[0]));
    assert!(selection.is_visible(&groups[1]));
    assert!(!selection.is_visible(&groups[2]));

    assert_eq!(
        "only:".parse::<InitiallyVisible>(),
        Ok(InitiallyVisible::Only(Vec::new()))
    );
}
