//! Color helpers. Everything is display RGB in [0, 1] unless scaled for HDR.

/// `0xRRGGBB` → `[r, g, b]`.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn scale(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    [rgb[0] * factor, rgb[1] * factor, rgb[2] * factor]
}

/// HSL with every component in [0, 1]; hue wraps.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// `0xRRGGBB` → `"#rrggbb"`.
pub fn hex_string(hex: u32) -> String {
    format!("#{:06x}", hex & 0xff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn hex_channels() {
        assert!(close(hex_to_rgb(0xff8000), [1.0, 128.0 / 255.0, 0.0]));
        assert_eq!(hex_string(0x4d94ff), "#4d94ff");
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hsl_gray_and_white() {
        assert!(close(hsl_to_rgb(0.3, 0.0, 0.4), [0.4, 0.4, 0.4]));
        assert!(close(hsl_to_rgb(0.1, 1.0, 1.0), [1.0, 1.0, 1.0]));
    }

    #[test]
    fn meteor_head_is_warm_and_bright() {
        let [r, g, b] = hsl_to_rgb(0.12, 1.0, 0.95);
        assert!(r >= g && g > b);
        assert!(b > 0.85);
    }
}
