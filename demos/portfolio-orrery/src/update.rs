//! Per-frame scene animation. Every rate is expressed per simulated second
//! (directly, or through the orbit speed factor), so a paused clock or a
//! zero speed freezes the whole scene.

use cosmo_engine::{EngineContext, FrameTime, Node};
use glam::{Quat, Vec3};

use crate::bodies::{self, CLOUD_ROTATION_SPEED};
use crate::body::{BodyKind, OverlayLayer};
use crate::builder::SolarScene;
use crate::materials;
use crate::meteor::MeteorTuning;
use crate::orbit;

/// Scene-wide tuning. Defaults reproduce the shipped look.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTuning {
    pub meteors: MeteorTuning,
    pub star_count: usize,
    pub dust_count: usize,
    pub star_point_size: f32,
    pub dust_point_size: f32,
    pub dust_opacity: f32,
    /// Backdrop star spin, radians per simulated second.
    pub star_field_spin: f32,
    pub sun_group_spin: f32,
    /// Extra spin of the sun meshes on top of the group.
    pub sun_mesh_spin: f32,
    /// Camera approach rate toward a focused body (per real second).
    pub focus_gain: f32,
    pub focus_distance_scale: f32,
    pub focus_distance_offset: f32,
    /// Pointer travel in CSS pixels before a press becomes a drag.
    pub drag_threshold: f32,
    /// Orbit radians per CSS pixel of drag.
    pub drag_sensitivity: f32,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            meteors: MeteorTuning::default(),
            star_count: 100_000,
            dust_count: 50_000,
            star_point_size: 4.0,
            dust_point_size: 0.5,
            dust_opacity: 0.6,
            star_field_spin: 0.006,
            sun_group_spin: 0.03,
            sun_mesh_spin: 0.012,
            focus_gain: 3.0,
            focus_distance_scale: 4.0,
            focus_distance_offset: 5.0,
            drag_threshold: 4.0,
            drag_sensitivity: 0.005,
        }
    }
}

fn node_pos(ctx: &EngineContext, id: cosmo_engine::EntityId) -> Vec3 {
    ctx.scene.get(id).map_or(Vec3::ZERO, |n| n.pos)
}

fn with_node(ctx: &mut EngineContext, id: cosmo_engine::EntityId, f: impl FnOnce(&mut Node)) {
    if let Some(node) = ctx.scene.get_mut(id) {
        f(node);
    }
}

/// Advance the whole scene by one frame of simulated time. Callers skip
/// this while paused.
pub fn update_frame(scene: &mut SolarScene, ctx: &mut EngineContext, frame: &FrameTime, tuning: &SceneTuning) {
    let dt = frame.sim_dt;
    let t = frame.elapsed;
    let sf = orbit::speed_factor(dt);

    ctx.assets.scroll(dt);

    with_node(ctx, scene.star_field, |n| {
        n.rotation = (n.rotation * Quat::from_rotation_y(tuning.star_field_spin * dt)).normalize();
    });

    // ── Orbits ──
    for i in 0..scene.bodies.len() {
        let node = scene.bodies[i].node;
        let center = match scene.bodies[i].kind {
            BodyKind::Moon { parent, .. } => scene.bodies.get(parent).map(|p| node_pos(ctx, p.node)),
            _ => None,
        };
        match &mut scene.bodies[i].kind {
            BodyKind::Planet { orbit, clouds } => {
                orbit.angle += orbit::angle_step(orbit.speed, orbit::PLANET_ANGLE_RATE, sf);
                orbit.spin += orbit::spin_step(orbit.rotation_speed, sf);
                let pos = orbit::circular_position(Vec3::ZERO, orbit.angle, orbit.distance);
                let rotation = Quat::from_rotation_y(orbit.spin);
                with_node(ctx, node, |n| {
                    n.pos = pos;
                    n.rotation = rotation;
                });
                if let Some(local) = (*clouds).and_then(|c| ctx.transforms.get_local_mut(c)) {
                    local.spin_y(orbit::spin_step(CLOUD_ROTATION_SPEED, sf));
                }
            }
            BodyKind::Moon { orbit, .. } => {
                orbit.angle += orbit::angle_step(orbit.speed, orbit::MOON_ANGLE_RATE, sf);
                orbit.spin += orbit::spin_step(orbit.rotation_speed, sf);
                let (angle, distance, spin) = (orbit.angle, orbit.distance, orbit.spin);
                let center = center.unwrap_or(Vec3::ZERO);
                with_node(ctx, node, |n| {
                    n.pos = orbit::circular_position(center, angle, distance);
                    n.rotation = Quat::from_rotation_y(spin);
                });
            }
            BodyKind::Comet { orbit, core, core_spin } => {
                orbit.angle += orbit::angle_step(orbit.speed, orbit::COMET_ANGLE_RATE, sf);
                *core_spin += orbit::spin_step(1.0, sf);
                let pos = orbit::comet_position(orbit.distance, orbit.eccentricity, orbit.inclination_deg, orbit.angle);
                let facing = orbit::comet_orientation(pos, orbit.roll);
                with_node(ctx, node, |n| {
                    n.pos = pos;
                    if let Some(q) = facing {
                        n.rotation = q;
                    }
                });
                if let Some(local) = ctx.transforms.get_local_mut(*core) {
                    local.rotation = Quat::from_rotation_y(*core_spin);
                }
            }
            _ => {}
        }
    }

    // ── Shells follow their bodies ──
    for body in &scene.bodies {
        let BodyKind::Overlay { parent, layer } = body.kind else { continue };
        let Some((pos, rotation)) = ctx.scene.get(parent).map(|p| (p.pos, p.rotation)) else { continue };
        with_node(ctx, body.node, |n| {
            n.pos = pos;
            let Some(slot) = n.material.as_mut() else { return };
            match layer {
                OverlayLayer::Atmosphere => {
                    let sun_dir = (-pos).normalize_or_zero();
                    materials::set_sun_direction(slot, sun_dir.to_array());
                    materials::set_time(slot, t * bodies::ATMOSPHERE_TIME_SCALE);
                }
                OverlayLayer::Surface { speed_multiplier } => {
                    n.rotation = rotation;
                    materials::set_time(slot, t * speed_multiplier);
                }
            }
        });
    }

    // ── Meteors ──
    for body in scene.bodies.iter_mut() {
        let BodyKind::Meteor(meteor) = &mut body.kind else { continue };
        meteor.step(dt, &mut ctx.rng, &tuning.meteors);
        let meteor = &*meteor;
        with_node(ctx, body.node, |n| {
            n.visible = meteor.is_active();
            if let Some(slot) = n.material.as_mut() {
                let opacity = if meteor.is_active() { meteor.opacity } else { 0.0 };
                materials::set_meteor_look(slot, meteor.head_color, meteor.tail_color, meteor.tail_sharpness, opacity);
            }
            if meteor.is_active() {
                n.pos = meteor.position;
                n.rotation = meteor.orientation();
                n.scale = Vec3::new(meteor.tail_width, meteor.length, 1.0);
            }
        });
    }

    // ── Sun ──
    let sun = scene.sun;
    if let Some(glow) = sun.glow {
        with_node(ctx, glow, |n| {
            if let Some(slot) = n.material.as_mut() {
                materials::set_time(slot, t);
            }
        });
    }
    with_node(ctx, sun.corona, |n| {
        if let Some(slot) = n.material.as_mut() {
            materials::set_time(slot, t * bodies::CORONA_TIME_SCALE);
        }
    });
    for body in scene.bodies.iter_mut() {
        if let BodyKind::Star { spin } = &mut body.kind {
            *spin += tuning.sun_group_spin * dt;
            let rotation = Quat::from_rotation_y(*spin);
            with_node(ctx, body.node, |n| n.rotation = rotation);
        }
    }
    for mesh in sun.meshes() {
        if let Some(local) = ctx.transforms.get_local_mut(mesh) {
            local.spin_y(tuning.sun_mesh_spin * dt);
        }
    }
}
