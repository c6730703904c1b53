//! Procedural RGBA textures: radial gradients that stand in for textures
//! that never loaded, and small sprites generated in code.

/// Edge length of a placeholder for a failed texture.
pub const PLACEHOLDER_SIZE: u32 = 512;

/// Edge length of the round star/particle sprite.
pub const STAR_SPRITE_SIZE: u32 = 32;

/// Inner/outer colors used when a texture has no placeholder of its own.
pub const DEFAULT_PLACEHOLDER: [&str; 2] = ["#888888", "#444444"];

/// A color stop: position in [0, 1] plus straight RGBA in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub t: f32,
    pub rgba: [f32; 4],
}

impl GradientStop {
    pub const fn new(t: f32, rgba: [f32; 4]) -> Self {
        Self { t, rgba }
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into 0..255 channels.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Sample a sorted stop list at `t`, clamping outside the first/last stop.
pub fn sample_stops(stops: &[GradientStop], t: f32) -> [f32; 4] {
    let Some(first) = stops.first() else { return [0.0; 4] };
    if t <= first.t {
        return first.rgba;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.t {
            let span = (b.t - a.t).max(f32::EPSILON);
            let f = (t - a.t) / span;
            let mut out = [0.0; 4];
            for (i, c) in out.iter_mut().enumerate() {
                *c = a.rgba[i] + (b.rgba[i] - a.rgba[i]) * f;
            }
            return out;
        }
    }
    stops[stops.len() - 1].rgba
}

/// Fill a `size × size` RGBA8 image with a radial gradient centered in the
/// image, radius `size / 2`. Pixels are sampled at their centers.
pub fn radial_gradient(size: u32, stops: &[GradientStop]) -> Vec<u8> {
    let n = size as usize;
    let mut pixels = Vec::with_capacity(n * n * 4);
    let center = size as f32 * 0.5;
    let radius = center.max(f32::EPSILON);
    for y in 0..n {
        for x in 0..n {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
            let c = sample_stops(stops, t);
            pixels.extend(c.iter().map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8));
        }
    }
    pixels
}

/// Opaque two-color gradient from `#RRGGBB` strings. Unparseable colors fall
/// back to the default gray pair.
pub fn placeholder_gradient(size: u32, inner: &str, outer: &str) -> Vec<u8> {
    let fallback = |s: &str, default: &str| {
        parse_hex_color(s).or_else(|| {
            log::warn!("invalid placeholder color {:?}", s);
            parse_hex_color(default)
        })
        .unwrap_or([0x88, 0x88, 0x88])
    };
    let to_rgba = |c: [u8; 3]| [c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0, 1.0];
    let inner = to_rgba(fallback(inner, DEFAULT_PLACEHOLDER[0]));
    let outer = to_rgba(fallback(outer, DEFAULT_PLACEHOLDER[1]));
    radial_gradient(size, &[GradientStop::new(0.0, inner), GradientStop::new(1.0, outer)])
}

/// White round sprite fading to transparent at the rim.
pub fn star_sprite() -> Vec<u8> {
    radial_gradient(
        STAR_SPRITE_SIZE,
        &[
            GradientStop::new(0.0, [1.0, 1.0, 1.0, 1.0]),
            GradientStop::new(0.3, [1.0, 1.0, 1.0, 0.8]),
            GradientStop::new(0.5, [1.0, 1.0, 1.0, 0.3]),
            GradientStop::new(1.0, [1.0, 1.0, 1.0, 0.0]),
        ],
    )
}
