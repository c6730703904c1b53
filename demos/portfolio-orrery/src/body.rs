//! Logical bodies. Each one owns a root render node; its kind carries only
//! the state its update rule needs.

use cosmo_engine::EntityId;

use crate::bodies::{CometSpec, MoonSpec, PlanetSpec};
use crate::meteor::Meteor;

/// Circular orbit state shared by planets and the moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularOrbit {
    pub distance: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    /// Accumulated orbital angle; never wrapped.
    pub angle: f32,
    /// Accumulated self-rotation about Y.
    pub spin: f32,
}

impl CircularOrbit {
    pub fn new(distance: f32, speed: f32, rotation_speed: f32, angle: f32) -> Self {
        Self { distance, speed, rotation_speed, angle, spin: 0.0 }
    }
}

/// Polar-form ellipse around the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometOrbit {
    /// Semi-major axis.
    pub distance: f32,
    pub speed: f32,
    pub inclination_deg: f32,
    pub eccentricity: f32,
    pub angle: f32,
    /// Fixed roll about the radial axis, chosen at build time.
    pub roll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayLayer {
    /// Light-aware glow shell; follows the parent's position only.
    Atmosphere,
    /// Band shell; follows position and rotation, time runs at `speed_multiplier`.
    Surface { speed_multiplier: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Star {
        spin: f32,
    },
    Planet {
        orbit: CircularOrbit,
        /// Cloud shell child, spinning on top of the planet.
        clouds: Option<EntityId>,
    },
    Moon {
        /// Index of the body it circles.
        parent: usize,
        orbit: CircularOrbit,
    },
    Comet {
        orbit: CometOrbit,
        core: EntityId,
        core_spin: f32,
    },
    Meteor(Meteor),
    Overlay {
        /// Root node of the body the shell wraps.
        parent: EntityId,
        layer: OverlayLayer,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub key: String,
    pub name: String,
    /// Root render node.
    pub node: EntityId,
    pub radius: f32,
    pub kind: BodyKind,
}

impl Body {
    pub fn star(key: &str, name: &str, node: EntityId, radius: f32) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            node,
            radius,
            kind: BodyKind::Star { spin: 0.0 },
        }
    }

    pub fn planet(spec: &PlanetSpec, node: EntityId, angle: f32) -> Self {
        Self {
            key: spec.key.to_string(),
            name: spec.name.to_string(),
            node,
            radius: spec.radius,
            kind: BodyKind::Planet {
                orbit: CircularOrbit::new(spec.distance, spec.speed, spec.rotation_speed, angle),
                clouds: None,
            },
        }
    }

    pub fn moon(spec: &MoonSpec, node: EntityId, parent: usize) -> Self {
        Self {
            key: spec.key.to_string(),
            name: spec.name.to_string(),
            node,
            radius: spec.radius,
            kind: BodyKind::Moon {
                parent,
                orbit: CircularOrbit::new(spec.distance, spec.speed, spec.rotation_speed, 0.0),
            },
        }
    }

    pub fn comet(spec: &CometSpec, node: EntityId, core: EntityId, angle: f32, roll: f32) -> Self {
        Self {
            key: "comet".to_string(),
            name: spec.name.to_string(),
            node,
            radius: 0.0,
            kind: BodyKind::Comet {
                orbit: CometOrbit {
                    distance: spec.distance,
                    speed: spec.speed,
                    inclination_deg: spec.inclination_deg,
                    eccentricity: spec.eccentricity,
                    angle,
                    roll,
                },
                core,
                core_spin: 0.0,
            },
        }
    }

    pub fn meteor(node: EntityId, meteor: Meteor) -> Self {
        Self {
            key: "meteor".to_string(),
            name: String::new(),
            node,
            radius: 0.0,
            kind: BodyKind::Meteor(meteor),
        }
    }

    pub fn overlay(parent: &Body, node: EntityId, layer: OverlayLayer) -> Self {
        Self {
            key: parent.key.clone(),
            name: parent.name.clone(),
            node,
            radius: parent.radius,
            kind: BodyKind::Overlay { parent: parent.node, layer },
        }
    }

    /// Whether clicks and searches may focus this body.
    pub fn is_focusable(&self) -> bool {
        matches!(self.kind, BodyKind::Star { .. } | BodyKind::Planet { .. } | BodyKind::Moon { .. })
    }

    /// Orbital radius around the sun, for bodies that circle it directly.
    pub fn sun_distance(&self) -> Option<f32> {
        match &self.kind {
            BodyKind::Planet { orbit, .. } => Some(orbit.distance),
            _ => None,
        }
    }

    /// Camera distance kept from this body while it is focused.
    pub fn focus_distance(&self, scale: f32, offset: f32) -> f32 {
        self.radius * scale + offset
    }

    pub fn is_atmosphere(&self) -> bool {
        matches!(self.kind, BodyKind::Overlay { layer: OverlayLayer::Atmosphere, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{planet, COMETS, MOON, SUN_RADIUS};

    #[test]
    fn only_star_planets_and_moon_are_focusable() {
        let earth = Body::planet(planet("earth").unwrap(), EntityId(2), 0.0);
        let sun = Body::star("sun", "Sun", EntityId(1), SUN_RADIUS);
        let moon = Body::moon(&MOON, EntityId(3), 1);
        let comet = Body::comet(&COMETS[0], EntityId(4), EntityId(5), 0.0, 0.0);
        let atmosphere = Body::overlay(&earth, EntityId(6), OverlayLayer::Atmosphere);
        assert!(sun.is_focusable() && earth.is_focusable() && moon.is_focusable());
        assert!(!comet.is_focusable());
        assert!(!atmosphere.is_focusable());
        assert!(atmosphere.is_atmosphere());
    }

    #[test]
    fn only_planets_report_sun_distance() {
        let mars = Body::planet(planet("mars").unwrap(), EntityId(2), 1.0);
        assert_eq!(mars.sun_distance(), Some(60.0));
        assert_eq!(Body::moon(&MOON, EntityId(3), 0).sun_distance(), None);
        assert_eq!(Body::star("sun", "Sun", EntityId(1), 10.0).sun_distance(), None);
    }

    #[test]
    fn focus_distance_scales_with_radius() {
        let jupiter = Body::planet(planet("jupiter").unwrap(), EntityId(2), 0.0);
        assert!((jupiter.focus_distance(4.0, 5.0) - 23.0).abs() < 1e-5);
    }

    #[test]
    fn overlay_inherits_parent_identity() {
        let saturn = Body::planet(planet("saturn").unwrap(), EntityId(9), 0.0);
        let shell = Body::overlay(&saturn, EntityId(10), OverlayLayer::Surface { speed_multiplier: 1.1 });
        assert_eq!(shell.key, "saturn");
        match shell.kind {
            BodyKind::Overlay { parent, .. } => assert_eq!(parent, EntityId(9)),
            _ => panic!("expected overlay"),
        }
    }
}
