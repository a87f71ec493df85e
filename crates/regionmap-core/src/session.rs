//! One interactive map instance: its props, normalized groups and visibility selection.
//!
//! Toggle events arrive one at a time. [`MapSession::drive`] consumes a stream of them serially,
//! so a session's own events are applied in delivery order and nothing else mutates its
//! selection.

use crate::config::{Layout, MapConfig};
use crate::group::{MarkerGroup, NormalizedGroups, RawGroup, normalize_groups};
use crate::theme::{Theme, ThemeSpec, resolve_theme};
use crate::visibility::{InitiallyVisible, VisibilitySelection};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

/// Arguments of a map render.
#[derive(Debug, Clone, Default)]
pub struct MapProps {
    pub marker_groups: Vec<RawGroup>,
    pub theme: Option<ThemeSpec>,
    /// `None` uses the configured default.
    pub show_regions: Option<bool>,
    /// `None` uses the configured default.
    pub layout: Option<Layout>,
    pub initially_visible: InitiallyVisible,
    pub class: Option<String>,
    pub id: Option<String>,
    /// Forward toggle notifications to the owner.
    pub on_toggle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub label: String,
}

impl ToggleEvent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToggleNotification {
    GroupToggled { label: String, now_visible: bool },
}

#[derive(Debug, Clone)]
pub struct MapSession<'a> {
    config: &'a MapConfig,
    props: MapProps,
    normalized: NormalizedGroups,
    theme: Theme,
    selection: VisibilitySelection,
}

impl<'a> MapSession<'a> {
    /// Normalizes the props' groups, resolves the theme and computes the initial selection.
    pub fn mount(config: &'a MapConfig, props: MapProps) -> Self {
        let normalized = normalize_groups(&props.marker_groups, config);
        let theme = resolve_theme(props.theme.as_ref(), config);
        let selection = VisibilitySelection::new(&props.initially_visible, &normalized.groups);
        Self {
            config,
            props,
            normalized,
            theme,
            selection,
        }
    }

    /// Replaces the marker groups (e.g. after a discovery refresh) and re-normalizes them.
    ///
    /// The current selection is kept for labels that survive the refresh and dropped for the
    /// rest. Labels that did not exist before are selected according to the mount-time
    /// `initially_visible` directive.
    pub fn replace_groups(&mut self, groups: Vec<RawGroup>) {
        let normalized = normalize_groups(&groups, self.config);
        let initial = VisibilitySelection::new(&self.props.initially_visible, &normalized.groups);
        for label in normalized.group_labels() {
            let known = self
                .normalized
                .group_labels()
                .any(|existing| existing == label);
            if !known && initial.contains(label) && !self.selection.contains(label) {
                self.selection.toggle(label);
            }
        }
        self.selection.retain_groups(&normalized.groups);
        self.props.marker_groups = groups;
        self.normalized = normalized;
    }

    /// Applies one toggle. Returns a notification when the owner asked for them.
    pub fn handle(&mut self, event: ToggleEvent) -> Option<ToggleNotification> {
        let now_visible = self.selection.toggle(&event.label);
        tracing::debug!(label = event.label.as_str(), now_visible, "group toggled");
        self.props
            .on_toggle
            .then_some(ToggleNotification::GroupToggled {
                label: event.label,
                now_visible,
            })
    }

    /// Applies events in arrival order until the stream ends.
    pub async fn drive<S, F>(&mut self, events: S, mut notify: F)
    where
        S: Stream<Item = ToggleEvent>,
        F: FnMut(ToggleNotification),
    {
        let mut events = std::pin::pin!(events);
        while let Some(event) = events.next().await {
            if let Some(notification) = self.handle(event) {
                notify(notification);
            }
        }
    }

    pub fn config(&self) -> &'a MapConfig {
        self.config
    }

    pub fn props(&self) -> &MapProps {
        &self.props
    }

    pub fn normalized(&self) -> &NormalizedGroups {
        &self.normalized
    }

    pub fn groups(&self) -> &[MarkerGroup] {
        &self.normalized.groups
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn selection(&self) -> &VisibilitySelection {
        &self.selection
    }

    pub fn layout(&self) -> Layout {
        self.props.layout.unwrap_or(self.config.default_layout)
    }

    pub fn show_regions(&self) -> bool {
        self.props.show_regions.unwrap_or(self.config.show_regions)
    }

    pub fn visible_groups(&self) -> impl Iterator<Item = &MarkerGroup> {
        self.normalized
            .groups
            .iter()
            .filter(|g| self.selection.is_visible(g))
    }
}
