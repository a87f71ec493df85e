//! Colour tables and the small amount of colour math the renderer needs for glow gradients.

/// Fallback for missing or unresolvable colours.
pub const NEUTRAL_GRAY: &str = "#6b7280";

/// Symbolic colour names accepted anywhere a colour is expected.
pub const NAMED_COLOURS: &[(&str, &str)] = &[
    ("blue", "#3b82f6"),
    ("green", "#10b981"),
    ("red", "#ef4444"),
    ("yellow", "#eab308"),
    ("amber", "#f59e0b"),
    ("orange", "#f97316"),
    ("purple", "#8b5cf6"),
    ("violet", "#8b5cf6"),
    ("pink", "#ec4899"),
    ("rose", "#f43f5e"),
    ("cyan", "#06b6d4"),
    ("teal", "#14b8a6"),
    ("sky", "#0ea5e9"),
    ("indigo", "#6366f1"),
    ("lime", "#84cc16"),
    ("emerald", "#10b981"),
    ("fuchsia", "#d946ef"),
    ("slate", "#64748b"),
    ("gray", NEUTRAL_GRAY),
    ("grey", NEUTRAL_GRAY),
    ("black", "#000000"),
    ("white", "#ffffff"),
];

/// Twelve mutually distinguishable colours used for automatic assignment.
pub const CYCLE_PALETTE: [&str; 12] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4", "#f97316",
    "#84cc16", "#6366f1", "#14b8a6", "#d946ef",
];

pub fn named_colour(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NAMED_COLOURS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Resolves a caller colour: CSS literals pass through, names go through [`NAMED_COLOURS`],
/// anything else is `None`.
pub fn resolve_colour(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.starts_with('#') {
        return parse_hex_rgb01(raw).map(|_| raw.to_ascii_lowercase());
    }
    let lower = raw.to_ascii_lowercase();
    if ["rgb(", "rgba(", "hsl(", "hsla(", "var("]
        .iter()
        .any(|p| lower.starts_with(p))
        && lower.ends_with(')')
    {
        return Some(raw.to_string());
    }
    named_colour(raw).map(str::to_string)
}

#[derive(Debug, Clone, Copy)]
struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

#[derive(Debug, Clone, Copy)]
struct Hsl {
    h_deg: f64,
    s_pct: f64,
    l_pct: f64,
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

fn rgb01_to_hex(rgb: Rgb01) -> String {
    let r = (rgb.r.clamp(0.0, 1.0) * 255.0).round() as i64;
    let g = (rgb.g.clamp(0.0, 1.0) * 255.0).round() as i64;
    let b = (rgb.b.clamp(0.0, 1.0) * 255.0).round() as i64;
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}

fn rgb01_to_hsl(rgb: Rgb01) -> Hsl {
    let Rgb01 { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h_deg: 0.0,
            s_pct: 0.0,
            l_pct: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let mut h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h /= 6.0;

    Hsl {
        h_deg: h * 360.0,
        s_pct: s * 100.0,
        l_pct: l * 100.0,
    }
}

fn hsl_to_rgb01(hsl: Hsl) -> Rgb01 {
    let h = (hsl.h_deg / 360.0) % 1.0;
    let s = (hsl.s_pct / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l_pct / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb01 { r: l, g: l, b: l };
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    Rgb01 {
        r: hue_to_rgb(p, q, h + 1.0 / 3.0),
        g: hue_to_rgb(p, q, h),
        b: hue_to_rgb(p, q, h - 1.0 / 3.0),
    }
}

/// Raises the lightness of a hex colour by `l_delta` percentage points.
///
/// Non-hex colours (`rgb(...)`, CSS variables) are returned unchanged.
pub fn lighten(colour: &str, l_delta: f64) -> String {
    let Some(rgb) = parse_hex_rgb01(colour) else {
        return colour.to_string();
    };
    let mut hsl = rgb01_to_hsl(rgb);
    hsl.l_pct = (hsl.l_pct + l_delta).clamp(0.0, 100.0);
    rgb01_to_hex(hsl_to_rgb01(hsl))
}
