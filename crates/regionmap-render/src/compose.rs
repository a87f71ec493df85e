//! Render composition: projected markers, shared glow gradients, animation parameters and the
//! legend geometry.

use crate::model::{
    AnimationLayout, Fill, GradientDef, GroupLayout, LegendItemLayout, LegendLayout, MapLayout,
    MarkerLayout, RegionDotLayout,
};
use crate::projection::{Point, project_or_offscreen};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
use indexmap::IndexMap;
use regionmap_core::colour::lighten;
use regionmap_core::{
    Animation, AnimationConfig, Layout, MapSession, MarkerGroup, RegionCatalog, Style,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ComposeOptions {
    /// Legend glyph radius as a fraction of the map marker radius.
    pub legend_glyph_scale: f64,
    pub legend_row_height: f64,
    pub legend_padding: f64,
    pub legend_text: TextStyle,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            legend_glyph_scale: 0.75,
            legend_row_height: 20.0,
            legend_padding: 12.0,
            legend_text: TextStyle::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for ComposeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeOptions")
            .field("legend_glyph_scale", &self.legend_glyph_scale)
            .field("legend_row_height", &self.legend_row_height)
            .field("legend_padding", &self.legend_padding)
            .field("legend_text", &self.legend_text)
            .finish_non_exhaustive()
    }
}

/// Glow gradients for one render pass, one per distinct colour.
#[derive(Debug, Clone, Default)]
pub struct GradientRegistry {
    prefix: String,
    by_colour: IndexMap<String, GradientDef>,
}

impl GradientRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            by_colour: IndexMap::new(),
        }
    }

    /// Returns the gradient id for `colour`, defining it on first use.
    pub fn id_for(&mut self, colour: &str) -> String {
        if let Some(def) = self.by_colour.get(colour) {
            return def.id.clone();
        }
        let slug: String = colour
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let mut id = format!("{}-glow-{}", self.prefix, slug);
        if self.by_colour.values().any(|d| d.id == id) {
            id = format!("{id}-{}", self.by_colour.len());
        }
        self.by_colour.insert(
            colour.to_string(),
            GradientDef {
                id: id.clone(),
                colour: colour.to_string(),
                highlight: lighten(colour, 20.0),
            },
        );
        id
    }

    pub fn len(&self) -> usize {
        self.by_colour.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_colour.is_empty()
    }

    pub fn into_defs(self) -> Vec<GradientDef> {
        self.by_colour.into_values().collect()
    }
}

/// Animation attributes for a marker drawn at `radius`. Static styles get `None`.
pub fn marker_animation(
    animation: Animation,
    radius: f64,
    timing: &AnimationConfig,
) -> Option<AnimationLayout> {
    match animation {
        Animation::None => None,
        Animation::Pulse => Some(AnimationLayout::Pulse {
            duration: timing.pulse_duration,
            min_radius: radius,
            max_radius: radius * timing.pulse_radius_scale,
        }),
        Animation::Fade => Some(AnimationLayout::Fade {
            duration: timing.fade_duration,
            min_opacity: timing.fade_min_opacity,
            max_opacity: timing.fade_max_opacity,
        }),
    }
}

/// Drawing parameters for one marker. `radius` lets call sites scale glyphs (legend vs. map).
pub fn compose_marker(
    label: &str,
    at: Point,
    style: &Style,
    radius: f64,
    gradients: &mut GradientRegistry,
    timing: &AnimationConfig,
) -> MarkerLayout {
    let fill = if style.glow {
        Fill::Gradient {
            id: gradients.id_for(&style.colour),
        }
    } else {
        Fill::Solid {
            colour: style.colour.clone(),
        }
    };
    MarkerLayout {
        label: label.to_string(),
        x: at.x,
        y: at.y,
        radius,
        fill,
        animation: marker_animation(style.animation, radius, timing),
    }
}

fn legend_detail(group: &MarkerGroup) -> String {
    let nodes = match group.nodes.len() {
        1 => "1 node".to_string(),
        n => format!("{n} nodes"),
    };
    match group.machine_count {
        Some(1) => format!("1 machine, {nodes}"),
        Some(m) => format!("{m} machines, {nodes}"),
        None => nodes,
    }
}

/// Lays out the whole map for the session's current selection.
pub fn compose_map(session: &MapSession<'_>, options: &ComposeOptions) -> MapLayout {
    let config = session.config();
    let props = session.props();
    let theme = session.theme().clone();
    let bbox = config.bbox;
    let timing = &config.animation;

    let id = props
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| "regionmap".to_string());
    let mut gradients = GradientRegistry::new(&id);

    let region_dots = if session.show_regions() {
        RegionCatalog::new(config)
            .all()
            .into_iter()
            .map(|(code, coordinates)| {
                let p = project_or_offscreen(coordinates, &bbox);
                RegionDotLayout {
                    code,
                    x: p.x,
                    y: p.y,
                    radius: config.region_marker_radius,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let groups: Vec<GroupLayout> = session
        .visible_groups()
        .map(|group| GroupLayout {
            label: group.label.clone(),
            group_label: group.group_label.clone(),
            markers: group
                .nodes
                .iter()
                .map(|node| {
                    compose_marker(
                        &node.label,
                        project_or_offscreen(node.coordinates, &bbox),
                        &group.style,
                        group.style.size,
                        &mut gradients,
                        timing,
                    )
                })
                .collect(),
        })
        .collect();

    // Legend rows: one per group, then the catalog summary.
    let pad = options.legend_padding;
    let row_h = options.legend_row_height;
    let (legend_x, legend_y) = match session.layout() {
        Layout::Stacked => (bbox.min_x, bbox.max_y() + pad),
        Layout::SideBySide => (bbox.max_x() + pad, bbox.min_y),
    };
    let glyph_col = row_h;
    let text_x = legend_x + pad + glyph_col;

    let mut items = Vec::new();
    let mut max_text_w: f64 = 0.0;
    let row_center = |row: usize| legend_y + pad + (row as f64) * row_h + row_h / 2.0;

    for group in session.groups() {
        let cy = row_center(items.len());
        let visible = session.selection().is_visible(group);
        let radius = (group.style.size * options.legend_glyph_scale).min(row_h / 2.0 - 1.0);
        let glyph = compose_marker(
            &group.label,
            Point {
                x: legend_x + pad + glyph_col / 2.0,
                y: cy,
            },
            &group.style,
            radius.max(1.0),
            &mut gradients,
            timing,
        );
        let detail = legend_detail(group);
        let text = format!("{} {}", group.label, detail);
        max_text_w = max_text_w.max(
            options
                .text_measurer
                .measure(&text, &options.legend_text)
                .width,
        );
        items.push(LegendItemLayout {
            label: group.label.clone(),
            group_label: group.group_label.clone(),
            visible,
            detail,
            glyph,
            text_x,
            text_y: cy,
        });
    }

    if session.show_regions() {
        let cy = row_center(items.len());
        let total = RegionCatalog::new(config).len();
        let detail = match total {
            1 => "1 region".to_string(),
            n => format!("{n} regions"),
        };
        let glyph = MarkerLayout {
            label: "All regions".to_string(),
            x: legend_x + pad + glyph_col / 2.0,
            y: cy,
            radius: config.region_marker_radius,
            fill: Fill::Solid {
                colour: theme.neutral_marker.clone(),
            },
            animation: None,
        };
        max_text_w = max_text_w.max(
            options
                .text_measurer
                .measure(&format!("All regions {detail}"), &options.legend_text)
                .width,
        );
        items.push(LegendItemLayout {
            label: "All regions".to_string(),
            group_label: None,
            visible: true,
            detail,
            glyph,
            text_x,
            text_y: cy,
        });
    }

    let legend_height = if items.is_empty() {
        0.0
    } else {
        pad * 2.0 + (items.len() as f64) * row_h
    };
    let legend_width = match session.layout() {
        Layout::Stacked => bbox.width,
        Layout::SideBySide => pad * 2.0 + glyph_col + max_text_w,
    };

    let (width, height) = match session.layout() {
        Layout::Stacked => (bbox.max_x(), legend_y + legend_height),
        Layout::SideBySide => (
            legend_x + legend_width,
            bbox.max_y().max(legend_y + legend_height),
        ),
    };

    MapLayout {
        id,
        class: props.class.clone(),
        layout: session.layout(),
        width,
        height,
        map_bbox: bbox,
        theme,
        marker_opacity: config.marker_opacity,
        hover_opacity: config.hover_opacity,
        gradients: gradients.into_defs(),
        region_dots,
        groups,
        legend: LegendLayout {
            x: legend_x,
            y: legend_y,
            width: legend_width,
            height: legend_height,
            items,
        },
    }
}
