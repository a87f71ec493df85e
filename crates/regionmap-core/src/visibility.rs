use crate::group::MarkerGroup;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Which groups start out visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiallyVisible {
    #[default]
    All,
    None,
    Only(Vec<String>),
}

impl std::str::FromStr for InitiallyVisible {
    type Err = std::convert::Infallible;

    /// `all`, `none` (both case-insensitive, empty means `none`), or a comma-separated list of
    /// group labels. An `only:` prefix forces the list form, so `only:all` selects a group
    /// labelled "all".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(list) = s.strip_prefix("only:") {
            return Ok(Self::Only(split_labels(list)));
        }
        Ok(if s.eq_ignore_ascii_case("all") {
            Self::All
        } else if s.is_empty() || s.eq_ignore_ascii_case("none") {
            Self::None
        } else {
            Self::Only(split_labels(s))
        })
    }
}

fn split_labels(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// The set of group labels currently shown.
///
/// The only transition is [`VisibilitySelection::toggle`]; applying it twice with the same label
/// restores the previous membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilitySelection {
    selected: IndexSet<String>,
}

impl VisibilitySelection {
    pub fn new(initially: &InitiallyVisible, groups: &[MarkerGroup]) -> Self {
        let selected = match initially {
            InitiallyVisible::All => groups
                .iter()
                .filter_map(|g| g.group_label.clone())
                .collect(),
            InitiallyVisible::None => IndexSet::new(),
            InitiallyVisible::Only(labels) => labels.iter().cloned().collect(),
        };
        Self { selected }
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Flips `label` and returns whether it is now visible.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.selected.shift_remove(label) {
            false
        } else {
            self.selected.insert(label.to_string());
            true
        }
    }

    /// Drops every selected label that none of `groups` carries.
    pub fn retain_groups(&mut self, groups: &[MarkerGroup]) {
        self.selected.retain(|label| {
            groups
                .iter()
                .any(|g| g.group_label.as_deref() == Some(label.as_str()))
        });
    }

    pub fn contains(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    /// Groups without a toggle key are always visible.
    pub fn is_visible(&self, group: &MarkerGroup) -> bool {
        match group.group_label.as_deref() {
            Some(label) => self.contains(label),
            None => true,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
