use crate::land::LandPaths;
use crate::model::{AnimationLayout, MapLayout, MarkerLayout};
use crate::{Error, Result};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Optional `<title>` for the whole document.
    pub title: Option<String>,
    /// When false, pulse/fade markers are drawn static.
    pub include_animations: bool,
    pub include_legend: bool,
    /// Opacity applied to legend entries whose group is hidden.
    pub hidden_legend_opacity: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            include_animations: true,
            include_legend: true,
            hidden_legend_opacity: 0.4,
        }
    }
}

/// Shortest decimal form with at most three fractional digits.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        return "0".to_string();
    }
    format!("{r}")
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn map_css(id: &str, layout: &MapLayout, options: &SvgRenderOptions) -> String {
    let mut css = String::new();
    let _ = write!(
        &mut css,
        "#{id} .regionmap-marker{{opacity:{};transition:opacity 0.2s;}}",
        fmt(layout.marker_opacity)
    );
    let _ = write!(
        &mut css,
        "#{id} .regionmap-marker:hover{{opacity:{};}}",
        fmt(layout.hover_opacity)
    );
    let _ = write!(
        &mut css,
        "#{id} .legend-item{{cursor:pointer;}}#{id} .legend-item.hidden{{opacity:{};}}",
        fmt(options.hidden_legend_opacity)
    );
    let _ = write!(
        &mut css,
        "#{id} .legend-label{{fill:{};font-size:12px;}}#{id} .legend-detail{{fill:{};font-size:10px;}}",
        layout.theme.neutral_text, layout.theme.neutral_marker
    );
    css
}

fn write_animation(out: &mut String, animation: &AnimationLayout) {
    match animation {
        AnimationLayout::Pulse {
            duration,
            min_radius,
            max_radius,
        } => {
            let _ = write!(
                out,
                r#"<animate attributeName="r" values="{lo};{hi};{lo}" dur="{}s" repeatCount="indefinite"/>"#,
                fmt(*duration),
                lo = fmt(*min_radius),
                hi = fmt(*max_radius),
            );
        }
        AnimationLayout::Fade {
            duration,
            min_opacity,
            max_opacity,
        } => {
            let _ = write!(
                out,
                r#"<animate attributeName="opacity" values="{hi};{lo};{hi}" dur="{}s" repeatCount="indefinite"/>"#,
                fmt(*duration),
                lo = fmt(*min_opacity),
                hi = fmt(*max_opacity),
            );
        }
    }
}

fn write_marker(out: &mut String, marker: &MarkerLayout, class: &str, animate: bool) {
    let _ = write!(
        out,
        r#"<circle class="{class}" cx="{}" cy="{}" r="{}" fill="{}">"#,
        fmt(marker.x),
        fmt(marker.y),
        fmt(marker.radius),
        escape_xml(&marker.fill.to_attr()),
    );
    let _ = write!(out, "<title>{}</title>", escape_xml(&marker.label));
    if animate {
        if let Some(animation) = &marker.animation {
            write_animation(out, animation);
        }
    }
    out.push_str("</circle>");
}

/// Writes a standalone SVG document for a composed map.
pub fn render_map_svg(
    layout: &MapLayout,
    land: &dyn LandPaths,
    options: &SvgRenderOptions,
) -> Result<String> {
    if !(layout.width.is_finite() && layout.width > 0.0)
        || !(layout.height.is_finite() && layout.height > 0.0)
    {
        return Err(Error::InvalidLayout {
            message: format!(
                "canvas must have a positive size, got {}x{}",
                layout.width, layout.height
            ),
        });
    }

    let id = escape_xml(&layout.id);
    let class = match layout.class.as_deref().map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("regionmap {}", escape_xml(extra)),
        _ => "regionmap".to_string(),
    };
    let theme = &layout.theme;
    let bbox = &layout.map_bbox;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" class="{class}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="regionmap" data-layout="{}">"#,
        layout.layout.as_str(),
        w = fmt(layout.width),
        h = fmt(layout.height),
    );
    if let Some(title) = options.title.as_deref() {
        let _ = write!(&mut out, "<title>{}</title>", escape_xml(title));
    }
    let _ = write!(
        &mut out,
        "<style>{}</style>",
        map_css(&id, layout, options)
    );

    if !layout.gradients.is_empty() {
        out.push_str("<defs>");
        for g in &layout.gradients {
            let _ = write!(
                &mut out,
                r#"<radialGradient id="{}" cx="50%" cy="50%" r="50%"><stop offset="0%" stop-color="{}"/><stop offset="60%" stop-color="{}"/><stop offset="100%" stop-color="{}" stop-opacity="0.6"/></radialGradient>"#,
                escape_xml(&g.id),
                escape_xml(&g.highlight),
                escape_xml(&g.colour),
                escape_xml(&g.colour),
            );
        }
        out.push_str("</defs>");
    }

    let _ = write!(
        &mut out,
        r#"<rect class="ocean" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        fmt(bbox.min_x),
        fmt(bbox.min_y),
        fmt(bbox.width),
        fmt(bbox.height),
        escape_xml(&theme.ocean),
    );

    let paths = land.paths(bbox);
    if !paths.is_empty() {
        let _ = write!(
            &mut out,
            r#"<g class="land" fill="{}" stroke="{}" stroke-width="0.5">"#,
            escape_xml(&theme.land),
            escape_xml(&theme.border),
        );
        for d in &paths {
            let _ = write!(&mut out, r#"<path d="{}"/>"#, escape_xml(d));
        }
        out.push_str("</g>");
    }

    if !layout.region_dots.is_empty() {
        let _ = write!(
            &mut out,
            r#"<g class="regions" fill="{}">"#,
            escape_xml(&theme.neutral_marker)
        );
        for dot in &layout.region_dots {
            let _ = write!(
                &mut out,
                r#"<circle class="region-dot" data-region="{}" cx="{}" cy="{}" r="{}"/>"#,
                escape_xml(&dot.code),
                fmt(dot.x),
                fmt(dot.y),
                fmt(dot.radius),
            );
        }
        out.push_str("</g>");
    }

    out.push_str(r#"<g class="markers">"#);
    for group in &layout.groups {
        out.push_str(r#"<g class="marker-group""#);
        if let Some(key) = group.group_label.as_deref() {
            let _ = write!(&mut out, r#" data-group-label="{}""#, escape_xml(key));
        }
        out.push('>');
        for marker in &group.markers {
            write_marker(
                &mut out,
                marker,
                "regionmap-marker",
                options.include_animations,
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g>");

    if options.include_legend && !layout.legend.items.is_empty() {
        let legend = &layout.legend;
        let _ = write!(
            &mut out,
            r#"<g class="legend" data-layout="{}"><rect class="legend-background" x="{}" y="{}" width="{}" height="{}" fill="none"/>"#,
            layout.layout.as_str(),
            fmt(legend.x),
            fmt(legend.y),
            fmt(legend.width),
            fmt(legend.height),
        );
        for item in &legend.items {
            let state = if item.visible { "visible" } else { "hidden" };
            let _ = write!(&mut out, r#"<g class="legend-item {state}""#);
            if let Some(key) = item.group_label.as_deref() {
                let _ = write!(&mut out, r#" data-group-label="{}""#, escape_xml(key));
            }
            out.push('>');
            write_marker(&mut out, &item.glyph, "legend-glyph", false);
            let _ = write!(
                &mut out,
                r#"<text class="legend-label" x="{}" y="{}" dominant-baseline="middle">{}<tspan class="legend-detail" dx="6">{}</tspan></text>"#,
                fmt(item.text_x),
                fmt(item.text_y),
                escape_xml(&item.label),
                escape_xml(&item.detail),
            );
            out.push_str("</g>");
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>\n");
    tracing::debug!(
        groups = layout.groups.len(),
        gradients = layout.gradients.len(),
        bytes = out.len(),
        "rendered map svg"
    );
    Ok(out)
}
