use crate::*;
use futures::executor::block_on;

fn props(initially_visible: InitiallyVisible, on_toggle: bool) -> MapProps {
    MapProps {
        marker_groups: vec![
            RawGroup::regions(["sjc", "fra"]).label("prod"),
            RawGroup::regions(["ams"]).label("staging"),
        ],
        initially_visible,
        on_toggle,
        ..Default::default()
    }
}

#[test]
fn mount_resolves_everything_once() {
    let config = MapConfig::default();
    let session = MapSession::mount(&config, props(InitiallyVisible::All, false));
    assert_eq!(session.groups().len(), 2);
    assert_eq!(session.selection().len(), 2);
    assert_eq!(session.layout(), Layout::Stacked);
    assert!(session.show_regions());
    assert_eq!(session.theme(), &crate::theme::default_theme());
}

#[test]
fn handle_emits_notifications_only_when_asked() {
    let config = MapConfig::default();

    let mut quiet = MapSession::mount(&config, props(InitiallyVisible::None, false));
    assert_eq!(quiet.handle(ToggleEvent::new("prod")), None);
    assert!(quiet.selection().contains("prod"));

    let mut loud = MapSession::mount(&config, props(InitiallyVisible::None, true));
    assert_eq!(
        loud.handle(ToggleEvent::new("prod")),
        Some(ToggleNotification::GroupToggled {
            label: "prod".to_string(),
            now_visible: true
        })
    );
    assert_eq!(
        loud.visible_groups().map(|g| g.label.as_str()).collect::<Vec<_>>(),
        vec!["prod"]
    );
}

#[test]
fn drive_applies_events_in_order() {
    let config = MapConfig::default();
    let mut session = MapSession::mount(&config, props(InitiallyVisible::All, true));
    let events = futures::stream::iter([
        ToggleEvent::new("prod"),
        ToggleEvent::new("staging"),
        ToggleEvent::new("prod"),
    ]);

    let mut seen = Vec::new();
    block_on(session.drive(events, |n| seen.push(n)));

    let visible: Vec<bool> = seen
        .iter()
        .map(|ToggleNotification::GroupToggled { now_visible, .. }| *now_visible)
        .collect();
    assert_eq!(visible, vec![false, false, true]);
    assert!(session.selection().contains("prod"));
    assert!(!session.selection().contains("staging"));
}

#[test]
fn replace_groups_keeps_selection_and_applies_directive_to_new_labels() {
    let config = MapConfig::default();
    let mut session = MapSession::mount(&config, props(InitiallyVisible::All, false));
    session.handle(ToggleEvent::new("staging"));

    session.replace_groups(vec![
        RawGroup::regions(["sjc"]).label("prod"),
        RawGroup::regions(["ams"]).label("staging"),
        RawGroup::regions(["nrt"]).label("canary"),
    ]);

    assert!(session.selection().contains("prod"));
    assert!(!session.selection().contains("staging"));
    assert!(session.selection().contains("canary"));
    assert_eq!(session.groups().len(), 3);
}

#[test]
fn replace_groups_forgets_labels_that_disappear() {
    let config = MapConfig::default();
    let mut session = MapSession::mount(&config, props(InitiallyVisible::All, false));

    for refresh in 0..100 {
        let label = format!("deploy {refresh}");
        session.replace_groups(vec![RawGroup::regions(["sjc"]).label(label)]);
        assert_eq!(session.selection().len(), 1);
    }
    assert_eq!(
        session.selection().labels().collect::<Vec<_>>(),
        vec!["deploy 99"]
    );

    session.replace_groups(vec![
        RawGroup::regions(["sjc"]).label("deploy 99"),
        RawGroup::regions(["ams"]).label("prod"),
    ]);
    assert!(session.selection().contains("prod"));
    assert_eq!(session.selection().len(), 2);
}

#[test]
fn props_override_config_defaults() {
    let config = MapConfig {
        default_layout: Layout::SideBySide,
        show_regions: false,
        ..MapConfig::default()
    };
    let session = MapSession::mount(&config, MapProps::default());
    assert_eq!(session.layout(), Layout::SideBySide);
    assert!(!session.show_regions());

    let session = MapSession::mount(
        &config,
        MapProps {
            layout: Some(Layout::Stacked),
            show_regions: Some(true),
            ..MapProps::default()
        },
    );
    assert_eq!(session.layout(), Layout::Stacked);
    assert!(session.show_regions());
}
