//! Adapter for externally discovered machines.
//!
//! The discovery process itself (DNS lookups, polling timers) lives outside this crate and hands
//! over `(machine_id, region)` pairs. Each refresh simply produces a new list of raw groups that
//! is normalized from scratch.

use crate::group::RawGroup;
use crate::node::NodeSpec;
use crate::style::StyleSpec;
use indexmap::IndexSet;

/// One group for `label`, with a node per distinct region (first-seen order) and the number of
/// machines as `machine_count`. Region codes are lower-cased.
pub fn groups_from_machines<I, M, R>(label: &str, machines: I) -> RawGroup
where
    I: IntoIterator<Item = (M, R)>,
    M: AsRef<str>,
    R: AsRef<str>,
{
    let mut regions: IndexSet<String> = IndexSet::new();
    let mut count = 0u64;
    for (_id, region) in machines {
        count += 1;
        let region = region.as_ref().trim();
        if !region.is_empty() {
            regions.insert(region.to_ascii_lowercase());
        }
    }
    RawGroup::new(regions.into_iter().map(NodeSpec::RegionCode))
        .label(label)
        .machine_count(count)
}

/// Like [`groups_from_machines`] for several apps at once, each with an optional style.
pub fn groups_from_apps<'a, I>(apps: I) -> Vec<RawGroup>
where
    I: IntoIterator<Item = (&'a str, Option<StyleSpec>, Vec<(String, String)>)>,
{
    apps.into_iter()
        .map(|(label, style, machines)| {
            let group = groups_from_machines(label, machines);
            match style {
                Some(style) => group.style(style),
                None => group,
            }
        })
        .collect()
}
