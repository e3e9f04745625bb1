// Pure helpers that turn animated property values into CSS.

/// Transform-related values for one element; defaults are the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParts {
    pub translate_x: f32,
    pub translate_y: f32,
    pub slide_x_pct: f32,
    pub scale: f32,
    pub scale_x: f32,
    pub rotate_deg: f32,
    pub rotate_x_deg: f32,
}

impl Default for TransformParts {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            slide_x_pct: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            rotate_deg: 0.0,
            rotate_x_deg: 0.0,
        }
    }
}

/// CSS `transform` value in a fixed component order, omitting identities.
pub fn compose_transform(p: &TransformParts) -> String {
    let mut out = Vec::new();
    if p.translate_x != 0.0 {
        out.push(format!("translateX({}px)", p.translate_x));
    }
    if p.translate_y != 0.0 {
        out.push(format!("translateY({}px)", p.translate_y));
    }
    if p.slide_x_pct != 0.0 {
        out.push(format!("translateX({}%)", p.slide_x_pct));
    }
    if p.scale != 1.0 {
        out.push(format!("scale({})", p.scale));
    }
    if p.scale_x != 1.0 {
        out.push(format!("scaleX({})", p.scale_x));
    }
    if p.rotate_deg != 0.0 {
        out.push(format!("rotate({}deg)", p.rotate_deg));
    }
    if p.rotate_x_deg != 0.0 {
        out.push(format!("rotateX({}deg)", p.rotate_x_deg));
    }
    if out.is_empty() {
        "none".to_string()
    } else {
        out.join(" ")
    }
}

/// `display` and `pointer-events` for a visibility flag. `shown` is the
/// display value written when visible, so a stylesheet `display: none` is
/// overridden rather than inherited.
pub fn visibility_css(visible: f32, shown: &str) -> (&str, &'static str) {
    if visible >= 0.5 {
        (shown, "auto")
    } else {
        ("none", "none")
    }
}

/// Backing-store size for a canvas of the given CSS size.
///
/// Square surfaces take their height from the width.
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64, square: bool) -> (u32, u32) {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let h = if square { css_width } else { css_height };
    let w_px = (css_width * dpr).round().max(1.0) as u32;
    let h_px = (h * dpr).round().max(1.0) as u32;
    (w_px, h_px)
}

/// Parse `#rrggbb`, `rrggbb` or `0xrrggbb`.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// `rgba(r, g, b, a)` for canvas gradient stops.
pub fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!("rgba({}, {}, {}, {})", rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0))
}
