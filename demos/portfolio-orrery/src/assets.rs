//! Built-in texture manifest: local copies first, then the public CDN.
//! Keys whose every source fails get a radial placeholder gradient.

use cosmo_engine::{AssetManifest, TextureDescriptor};

const TEX_BASE: &str = "https://www.solarsystemscope.com/textures/";
const LOCAL_BASE: &str = "./assets/textures/planets/";
const FLARE_BASE: &str = "https://cdn.jsdelivr.net/gh/mrdoob/three.js@r165/examples/textures/lensflare/";
const LOCAL_FLARE_BASE: &str = "./assets/textures/lensflare/";

/// (key, remote file, local file). An empty local file means CDN only.
const PLANET_TEXTURES: [(&str, &str, &str); 15] = [
    ("sun", "8k_sun.jpg", "sun.jpg"),
    ("mercury", "8k_mercury.jpg", "mercury.jpg"),
    ("venus", "8k_venus_surface.jpg", "venus.jpg"),
    ("earth_day", "8k_earth_daymap.jpg", "earth_day.jpg"),
    ("earth_clouds", "8k_earth_clouds.jpg", "earth_clouds.jpg"),
    ("earth_normal", "8k_earth_normal_map.jpg", "earth_normal.jpg"),
    ("earth_specular", "8k_earth_specular_map.jpg", "earth_specular.jpg"),
    ("moon", "8k_moon.jpg", "moon.jpg"),
    ("mars", "8k_mars.jpg", "mars.jpg"),
    ("jupiter", "8k_jupiter.jpg", "jupiter.jpg"),
    ("saturn", "8k_saturn.jpg", "saturn.jpg"),
    ("saturn_ring", "8k_saturn_ring_alpha.png", "saturn_ring_alpha.jpg"),
    ("uranus", "2k_uranus.jpg", "uranus.jpg"),
    ("neptune", "2k_neptune.jpg", "neptune.jpg"),
    ("stars", "8k_stars_milky_way.jpg", ""),
];

pub const FLARE_MAIN: &str = "flare0";
pub const FLARE_GHOST: &str = "flare3";
const FLARE_TEXTURES: [(&str, &str); 2] = [(FLARE_MAIN, "lensflare0.png"), (FLARE_GHOST, "lensflare3.png")];

/// Loaded ahead of everything else.
pub const PRIORITY_KEYS: [&str; 2] = ["sun", "earth_day"];

/// Key of the generated point-sprite texture.
pub const STAR_SPRITE_KEY: &str = "star_sprite";

/// Placeholder gradient colors, looked up by the part of the key before
/// the first `_`. "earth_day" never matches its own entry ("earth"), so the
/// Earth placeholder falls back to gray.
const PLACEHOLDER_COLORS: [(&str, &str, &str); 10] = [
    ("sun", "#FDB813", "#FF6B00"),
    ("mercury", "#B8B8B8", "#6E6E6E"),
    ("venus", "#FFC649", "#D4A051"),
    ("earth_day", "#4DA6FF", "#2E7CB8"),
    ("mars", "#E27B58", "#C1440E"),
    ("jupiter", "#C88B3A", "#E8C9A0"),
    ("saturn", "#FAD5A5", "#E6B96C"),
    ("uranus", "#7DE3F5", "#4FA8B8"),
    ("neptune", "#5B5DDF", "#2E3F8F"),
    ("moon", "#C0C0C0", "#808080"),
];

/// Inner/outer gradient colors for `key`, or `None` for the default gray.
pub fn placeholder_colors(key: &str) -> Option<(&'static str, &'static str)> {
    let prefix = key.split('_').next().unwrap_or(key);
    PLACEHOLDER_COLORS
        .iter()
        .find(|(k, _, _)| *k == prefix)
        .map(|(_, inner, outer)| (*inner, *outer))
}

/// Normal and specular maps hold data, not color.
fn is_color_data(key: &str) -> bool {
    !key.contains("normal") && !key.contains("specular")
}

fn descriptor(key: &str, sources: [String; 2]) -> TextureDescriptor {
    let mut desc = TextureDescriptor::new(key).with_srgb(is_color_data(key));
    for url in sources {
        desc = desc.with_source(url);
    }
    if let Some((inner, outer)) = placeholder_colors(key) {
        desc = desc.with_placeholder(inner, outer);
    }
    desc
}

pub fn builtin_manifest() -> AssetManifest {
    let mut manifest = AssetManifest::default();
    for (key, remote, local) in PLANET_TEXTURES {
        let local = if local.is_empty() { String::new() } else { format!("{LOCAL_BASE}{local}") };
        manifest.push(descriptor(key, [local, format!("{TEX_BASE}{remote}")]));
    }
    for (key, file) in FLARE_TEXTURES {
        manifest.push(descriptor(key, [format!("{LOCAL_FLARE_BASE}{file}"), format!("{FLARE_BASE}{file}")]));
    }
    manifest.prioritize(&PRIORITY_KEYS);
    manifest
}
