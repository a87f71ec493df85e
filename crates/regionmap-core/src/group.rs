//! Marker group normalization.
//!
//! Pass one resolves styles and nodes group by group and derives a sanitized toggle key. Pass
//! two folds over the assembled list with an occurrence table and suffixes colliding keys
//! (`"x"`, `"x 2"`, `"x 3"`, ...). Node failures are per node: the node is dropped, the failure
//! is logged and collected, and the group is kept even when nothing in it resolved.

use crate::config::MapConfig;
use crate::error::{Error, NodeError, Result};
use crate::node::{Node, NodeSpec, normalize_node};
use crate::regions::RegionCatalog;
use crate::style::{Style, StyleAttributes, StyleResolver, StyleSpec, cycle};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::Value;

/// One marker group as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGroup {
    pub label: Option<String>,
    pub nodes: Vec<NodeSpec>,
    pub style: Option<StyleSpec>,
    pub machine_count: Option<u64>,
}

impl RawGroup {
    pub fn new(nodes: impl IntoIterator<Item = NodeSpec>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Shorthand for a group made of region codes only.
    pub fn regions<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(codes.into_iter().map(NodeSpec::region))
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: impl Into<StyleSpec>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn machine_count(mut self, count: u64) -> Self {
        self.machine_count = Some(count);
        self
    }
}

/// A group ready for projection and rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGroup {
    /// Display label.
    pub label: String,
    /// Unique, sanitized toggle key. Falls back to the sanitized default label when the display
    /// label has no letters or digits. `None` marks an always-visible group.
    pub group_label: Option<String>,
    pub nodes: Vec<Node>,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_count: Option<u64>,
}

/// A node that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFailure {
    pub group_index: usize,
    /// Position of the node within its group's input list.
    pub node_index: usize,
    /// The offending input, rendered for humans.
    pub node: String,
    pub error: NodeError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedGroups {
    pub groups: Vec<MarkerGroup>,
    pub failures: Vec<NodeFailure>,
}

impl NormalizedGroups {
    pub fn group_labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().filter_map(|g| g.group_label.as_deref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Size, animation and glow layered onto automatically cycled colours.
    pub cycle_defaults: StyleAttributes,
}

pub fn normalize_groups(groups: &[RawGroup], config: &MapConfig) -> NormalizedGroups {
    normalize_groups_with(groups, config, &NormalizeOptions::default())
}

pub fn normalize_groups_with(
    groups: &[RawGroup],
    config: &MapConfig,
    options: &NormalizeOptions,
) -> NormalizedGroups {
    let catalog = RegionCatalog::new(config);
    let styles = StyleResolver::new(config);

    let mut failures = Vec::new();
    let assembled: Vec<MarkerGroup> = groups
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            normalize_group(index, raw, &catalog, &styles, options, &mut failures)
        })
        .collect();

    NormalizedGroups {
        groups: dedupe_group_labels(assembled),
        failures,
    }
}

fn normalize_group(
    index: usize,
    raw: &RawGroup,
    catalog: &RegionCatalog<'_>,
    styles: &StyleResolver<'_>,
    options: &NormalizeOptions,
    failures: &mut Vec<NodeFailure>,
) -> MarkerGroup {
    let style = match &raw.style {
        Some(spec) => styles.normalize_style(spec),
        // Index is the group's position in the whole input, not among unstyled groups.
        None => cycle(index, &options.cycle_defaults),
    };

    let mut nodes = Vec::with_capacity(raw.nodes.len());
    for (node_index, spec) in raw.nodes.iter().enumerate() {
        match normalize_node(spec, catalog) {
            Ok(node) => nodes.push(node),
            Err(error) => {
                let node = describe_node(spec);
                tracing::warn!(group = index, node = %node, %error, "dropping unresolvable node");
                failures.push(NodeFailure {
                    group_index: index,
                    node_index,
                    node,
                    error,
                });
            }
        }
    }

    let label = match raw.label.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default_label(raw, nodes.len()),
    };
    let group_label = match sanitize_group_label(&label) {
        key if key.is_empty() => sanitize_group_label(&default_label(raw, nodes.len())),
        key => key,
    };
    let group_label = Some(group_label).filter(|l| !l.is_empty());

    MarkerGroup {
        label,
        group_label,
        nodes,
        style,
        machine_count: raw.machine_count,
    }
}

fn default_label(raw: &RawGroup, node_count: usize) -> String {
    if let Some(StyleSpec::Preset(name)) = &raw.style {
        let name = name.trim();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().chain(chars).collect::<String>().replace('_', " ");
        }
    }
    match node_count {
        1 => "1 node".to_string(),
        n => format!("{n} nodes"),
    }
}

fn describe_node(spec: &NodeSpec) -> String {
    match spec {
        NodeSpec::RegionCode(code) => code.clone(),
        NodeSpec::CoordinatePair(c) => format!("[{}, {}]", c.lat, c.lon),
        NodeSpec::LabeledRegion { label, region } => format!("{label} @ {region}"),
        NodeSpec::LabeledCoordinates { label, coordinates } => {
            format!("{label} @ [{}, {}]", coordinates.lat, coordinates.lon)
        }
    }
}

/// Reduces a label to letters, digits (any script), `-`, `_` and single spaces.
pub fn sanitize_group_label(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else if ch.is_whitespace() {
            pending_space = true;
        }
    }
    out
}

/// First occurrence keeps its key; later collisions get `" 2"`, `" 3"`, ... in input order.
/// A generated key never collides with a key that appears verbatim elsewhere in the batch.
fn dedupe_group_labels(groups: Vec<MarkerGroup>) -> Vec<MarkerGroup> {
    let verbatim: FxHashSet<String> = groups
        .iter()
        .filter_map(|g| g.group_label.clone())
        .collect();

    let (out, _, _) = groups.into_iter().fold(
        (
            Vec::new(),
            FxHashMap::<String, usize>::default(),
            FxHashSet::<String>::default(),
        ),
        |(mut out, mut counts, mut used), mut group| {
            if let Some(base) = group.group_label.take() {
                let seen = counts.entry(base.clone()).or_insert(0);
                *seen += 1;
                let key = if *seen == 1 && !used.contains(&base) {
                    base
                } else {
                    let mut n = (*seen).max(2);
                    loop {
                        let candidate = format!("{base} {n}");
                        if !used.contains(&candidate) && !verbatim.contains(&candidate) {
                            break candidate;
                        }
                        n += 1;
                    }
                };
                used.insert(key.clone());
                group.group_label = Some(key);
            }
            out.push(group);
            (out, counts, used)
        },
    );
    out
}

/// Raw groups parsed from JSON, plus the nodes that were malformed on arrival.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedGroups {
    pub groups: Vec<RawGroup>,
    pub failures: Vec<NodeFailure>,
    /// For each group, the input position of every node that survived parsing.
    pub node_positions: Vec<Vec<usize>>,
}

/// Parses marker groups from JSON: either an array of group objects or an object holding one
/// under `marker_groups`.
///
/// Malformed nodes are recorded and skipped; only a document that is not a list of objects is
/// an error.
pub fn parse_groups(value: &Value) -> Result<ParsedGroups> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("marker_groups") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::InvalidInput {
                    message: "expected an array of marker groups or a `marker_groups` array"
                        .to_string(),
                });
            }
        },
        _ => {
            return Err(Error::InvalidInput {
                message: "expected an array of marker groups".to_string(),
            });
        }
    };

    let mut out = ParsedGroups::default();
    for (index, item) in items.iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(Error::InvalidInput {
                message: format!("marker group {index} is not an object"),
            });
        };

        let mut group = RawGroup {
            label: map.get("label").and_then(Value::as_str).map(str::to_string),
            style: map
                .get("style")
                .filter(|v| !v.is_null())
                .map(StyleSpec::from_value),
            machine_count: map.get("machine_count").and_then(Value::as_u64),
            ..Default::default()
        };

        let nodes = match map.get("nodes") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(nodes)) => nodes.as_slice(),
            Some(_) => {
                return Err(Error::InvalidInput {
                    message: format!("marker group {index}: `nodes` must be an array"),
                });
            }
        };
        let mut positions = Vec::with_capacity(nodes.len());
        for (node_index, node) in nodes.iter().enumerate() {
            match NodeSpec::from_value(node) {
                Ok(spec) => {
                    group.nodes.push(spec);
                    positions.push(node_index);
                }
                Err(error) => {
                    tracing::warn!(group = index, node = %node, %error, "dropping malformed node");
                    out.failures.push(NodeFailure {
                        group_index: index,
                        node_index,
                        node: node.to_string(),
                        error,
                    });
                }
            }
        }
        out.groups.push(group);
        out.node_positions.push(positions);
    }
    Ok(out)
}

/// Parses then normalizes, reporting parse and resolution failures together in input order.
pub fn normalize_value(value: &Value, config: &MapConfig) -> Result<NormalizedGroups> {
    let ParsedGroups {
        groups,
        failures: parse_failures,
        node_positions,
    } = parse_groups(value)?;
    let mut normalized = normalize_groups(&groups, config);
    // Resolution failures index the parsed node list; map them back to input positions.
    for failure in &mut normalized.failures {
        if let Some(&position) = node_positions
            .get(failure.group_index)
            .and_then(|p| p.get(failure.node_index))
        {
            failure.node_index = position;
        }
    }
    let mut failures = parse_failures;
    failures.append(&mut normalized.failures);
    failures.sort_by_key(|f| (f.group_index, f.node_index));
    normalized.failures = failures;
    Ok(normalized)
}
