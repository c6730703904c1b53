//! Descriptive tables for every body in the system.
//!
//! Distances and radii are scene units (Earth radius = 1.0), not physical.
//! Speeds are dimensionless rates fed to the orbit rules in `orbit.rs`.

// ── Planets ──────────────────────────────────────────────────────────

/// Static description of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub radius: f32,
    /// Orbital radius around the sun.
    pub distance: f32,
    /// Orbital angular speed.
    pub speed: f32,
    /// Self-rotation speed.
    pub rotation_speed: f32,
    /// Glow color of the atmosphere shell, when the planet has one.
    pub atmosphere: Option<u32>,
    pub rings: bool,
}

pub const PLANET_COUNT: usize = 8;

pub const PLANETS: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec { key: "mercury", name: "Mercury", radius: 0.40, distance: 20.0, speed: 4.74, rotation_speed: 0.01, atmosphere: None, rings: false },
    PlanetSpec { key: "venus", name: "Venus", radius: 0.95, distance: 30.0, speed: 3.50, rotation_speed: 0.004, atmosphere: Some(0xffe4b5), rings: false },
    PlanetSpec { key: "earth", name: "Earth", radius: 1.00, distance: 45.0, speed: 2.98, rotation_speed: 1.00, atmosphere: Some(0x4d94ff), rings: false },
    PlanetSpec { key: "mars", name: "Mars", radius: 0.53, distance: 60.0, speed: 2.41, rotation_speed: 0.97, atmosphere: Some(0xff4500), rings: false },
    PlanetSpec { key: "jupiter", name: "Jupiter", radius: 4.50, distance: 100.0, speed: 1.31, rotation_speed: 2.40, atmosphere: None, rings: false },
    PlanetSpec { key: "saturn", name: "Saturn", radius: 4.00, distance: 140.0, speed: 0.97, rotation_speed: 2.20, atmosphere: None, rings: true },
    PlanetSpec { key: "uranus", name: "Uranus", radius: 2.00, distance: 180.0, speed: 0.68, rotation_speed: 1.40, atmosphere: None, rings: false },
    PlanetSpec { key: "neptune", name: "Neptune", radius: 1.90, distance: 210.0, speed: 0.54, rotation_speed: 1.50, atmosphere: None, rings: false },
];

pub fn planet(key: &str) -> Option<&'static PlanetSpec> {
    PLANETS.iter().find(|p| p.key == key)
}

/// Sphere tessellation for planets and their shells.
pub const PLANET_SEGMENTS: u32 = 128;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_KEY: &str = "sun";
pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: f32 = 10.0;
/// Core sphere radius relative to `SUN_RADIUS`; the glow shell sits at 1.0.
pub const SUN_CORE_SCALE: f32 = 0.98;
pub const SUN_CORONA_SCALE: f32 = 1.7;
/// HDR tint over the sun texture.
pub const SUN_CORE_TINT: [f32; 3] = [2.5, 2.2, 1.8];
/// Flat core color when no sun texture is available.
pub const SUN_FALLBACK_COLOR: u32 = 0xffd700;
pub const SUN_GLOW_COLOR: u32 = 0xffd14a;
pub const CORONA_INNER: [f32; 3] = [1.15, 0.75, 0.35];
pub const CORONA_OUTER: [f32; 3] = [1.0, 0.98, 0.9];

// ── Moon ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonSpec {
    pub key: &'static str,
    pub name: &'static str,
    /// Key of the planet it circles.
    pub parent: &'static str,
    pub radius: f32,
    /// Distance from the parent's center.
    pub distance: f32,
    pub speed: f32,
    pub rotation_speed: f32,
}

pub const MOON: MoonSpec = MoonSpec {
    key: "moon",
    name: "Moon",
    parent: "earth",
    radius: 0.27,
    distance: 4.0,
    speed: 10.0,
    rotation_speed: 0.5,
};

pub const MOON_SEGMENTS: u32 = 64;

// ── Comets ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometSpec {
    pub name: &'static str,
    /// Semi-major axis of the orbit ellipse.
    pub distance: f32,
    pub speed: f32,
    pub inclination_deg: f32,
    pub eccentricity: f32,
    pub core_color: u32,
    pub tail_color: [f32; 3],
}

pub const COMETS: [CometSpec; 3] = [
    CometSpec { name: "Halley Comet", distance: 180.0, speed: 0.3, inclination_deg: 15.0, eccentricity: 0.7, core_color: 0xccddff, tail_color: [0.7, 0.8, 1.0] },
    CometSpec { name: "Wirtanen Comet", distance: 120.0, speed: 0.5, inclination_deg: -20.0, eccentricity: 0.65, core_color: 0xaaffaa, tail_color: [0.6, 1.0, 0.7] },
    CometSpec { name: "Swift-Tuttle Comet", distance: 240.0, speed: 0.25, inclination_deg: 25.0, eccentricity: 0.8, core_color: 0xffffaa, tail_color: [1.0, 0.95, 0.6] },
];

pub const COMET_CORE_RADIUS: f32 = 0.3;
/// Core diffuse color as a fraction of the core color; the rest is emissive.
pub const COMET_CORE_ALBEDO: f32 = 0.45;
pub const COMET_CORE_EMISSIVE: f32 = 2.5;
pub const COMET_COMA_RADIUS: f32 = 1.2;
pub const COMET_COMA_OPACITY: f32 = 0.3;
pub const ION_TAIL_LENGTH: f32 = 20.0;
pub const ION_TAIL_WIDTH: f32 = 0.5;
pub const ION_TAIL_OFFSET: [f32; 3] = [-10.0, 0.0, 0.0];
pub const ION_TAIL_OPACITY: f32 = 0.6;
pub const DUST_TAIL_LENGTH: f32 = 15.0;
pub const DUST_TAIL_WIDTH: f32 = 0.8;
pub const DUST_TAIL_OFFSET: [f32; 3] = [-7.0, -2.0, 0.0];
pub const DUST_TAIL_TILT: f32 = -0.3;
pub const DUST_TAIL_COLOR: [f32; 3] = [1.0, 0.9, 0.7];
pub const DUST_TAIL_OPACITY: f32 = 0.4;

// ── Surface overlays ─────────────────────────────────────────────────

/// Animated band shell drawn additively just above a planet's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySpec {
    pub tint_a: u32,
    pub tint_b: u32,
    pub frequency: f32,
    pub strength: f32,
    /// Band flow direction in UV space (normalized when built).
    pub flow: [f32; 2],
    pub opacity: f32,
    /// Shell radius is `radius * (1 + radius_offset)`.
    pub radius_offset: f32,
    /// Shader time runs at `elapsed * speed_multiplier`.
    pub speed_multiplier: f32,
}

pub fn overlay_for(key: &str) -> Option<OverlaySpec> {
    let spec = match key {
        "earth" => OverlaySpec { tint_a: 0x99d6ff, tint_b: 0xffffff, frequency: 8.0, strength: 0.22, flow: [0.3, 1.0], opacity: 0.18, radius_offset: 0.012, speed_multiplier: 0.9 },
        "jupiter" => OverlaySpec { tint_a: 0xb36b32, tint_b: 0xf8d6a1, frequency: 5.0, strength: 0.4, flow: [1.0, 0.15], opacity: 0.28, radius_offset: 0.008, speed_multiplier: 1.4 },
        "saturn" => OverlaySpec { tint_a: 0xcaa871, tint_b: 0xfbe5b6, frequency: 6.0, strength: 0.35, flow: [1.0, 0.05], opacity: 0.24, radius_offset: 0.008, speed_multiplier: 1.1 },
        "uranus" => OverlaySpec { tint_a: 0x4cc9ff, tint_b: 0xa0f4ff, frequency: 7.0, strength: 0.26, flow: [0.2, 1.0], opacity: 0.2, radius_offset: 0.01, speed_multiplier: 1.2 },
        "neptune" => OverlaySpec { tint_a: 0x1a4bff, tint_b: 0x7fb9ff, frequency: 7.0, strength: 0.26, flow: [0.2, 1.0], opacity: 0.2, radius_offset: 0.01, speed_multiplier: 1.2 },
        "mars" => OverlaySpec { tint_a: 0x9b4b2a, tint_b: 0xffa366, frequency: 9.0, strength: 0.18, flow: [0.6, 0.4], opacity: 0.14, radius_offset: 0.006, speed_multiplier: 0.7 },
        _ => return None,
    };
    Some(spec)
}

// ── Shells, clouds, rings ────────────────────────────────────────────

pub const ATMOSPHERE_SCALE: f32 = 1.05;
/// Atmosphere shader time runs at `elapsed * 0.6`.
pub const ATMOSPHERE_TIME_SCALE: f32 = 0.6;
pub const CORONA_TIME_SCALE: f32 = 0.7;

pub const CLOUD_SCALE: f32 = 1.01;
pub const CLOUD_OPACITY: f32 = 0.6;
pub const CLOUD_ROTATION_SPEED: f32 = 0.3;

pub const RING_INNER: f32 = 1.2;
pub const RING_OUTER: f32 = 2.5;
pub const RING_SEGMENTS: u32 = 256;
/// Ring plane tilt about X.
pub const RING_TILT: f32 = std::f32::consts::PI / 2.1;

// ── Texture scrolling (UV units per simulated second) ────────────────

pub const EARTH_DAY_SCROLL: f32 = 0.0001;
pub const EARTH_DETAIL_SCROLL: f32 = 0.00015;
pub const CLOUD_SCROLL: f32 = 0.0025;
pub const RING_SCROLL: f32 = 0.0009;

/// Band drift for the gas giants' surface textures.
pub fn surface_scroll(key: &str) -> f32 {
    match key {
        "jupiter" => 0.0008,
        "saturn" => 0.0006,
        _ => 0.0,
    }
}

// ── Backdrop ─────────────────────────────────────────────────────────

pub const BACKDROP_RADIUS: f32 = 20_000.0;
pub const BACKDROP_SEGMENTS: u32 = 64;
pub const BACKDROP_TINT: [f32; 3] = [1.2, 1.2, 1.3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_are_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
            assert!(pair[0].speed > pair[1].speed);
        }
    }

    #[test]
    fn only_saturn_has_rings() {
        let ringed: Vec<_> = PLANETS.iter().filter(|p| p.rings).map(|p| p.key).collect();
        assert_eq!(ringed, vec!["saturn"]);
    }

    #[test]
    fn atmospheres_on_inner_rocky_planets() {
        let with_air: Vec<_> = PLANETS.iter().filter(|p| p.atmosphere.is_some()).map(|p| p.key).collect();
        assert_eq!(with_air, vec!["venus", "earth", "mars"]);
    }

    #[test]
    fn overlays_cover_six_planets() {
        let covered = PLANETS.iter().filter(|p| overlay_for(p.key).is_some()).count();
        assert_eq!(covered, 6);
        assert!(overlay_for("mercury").is_none());
        assert!(overlay_for("venus").is_none());
    }

    #[test]
    fn moon_orbits_an_existing_planet() {
        assert!(planet(MOON.parent).is_some());
    }

    #[test]
    fn comet_orbits_are_bound_ellipses() {
        for c in &COMETS {
            assert!(c.eccentricity > 0.0 && c.eccentricity < 1.0);
        }
    }
}
