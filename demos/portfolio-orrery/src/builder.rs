//! Scene construction. Runs once, after every texture has loaded or fallen
//! back to a placeholder, and never fails: a missing texture becomes a
//! generated gradient.

use std::collections::HashMap;

use cosmo_engine::assets::placeholder::{self, DEFAULT_PLACEHOLDER, PLACEHOLDER_SIZE, STAR_SPRITE_SIZE};
use cosmo_engine::{EngineContext, EntityId, GeometryId, LocalTransform, Node, TextureId};
#[cfg(feature = "vectors")]
use cosmo_engine::GuideStyle;
use glam::{Quat, Vec2, Vec3};

use crate::assets::{self, FLARE_GHOST, FLARE_MAIN, STAR_SPRITE_KEY};
use crate::bodies::{self, PlanetSpec, COMETS, MOON, PLANETS};
use crate::body::{Body, BodyKind, OverlayLayer};
use crate::color;
use crate::geometry;
use crate::materials::{self, Surface};
use crate::meteor::Meteor;
use crate::orbit;
use crate::projects::{self, SearchIndex};
use crate::ui::{LensFlare, PlanetList, PlanetListEntry, UiMessage};
use crate::update::SceneTuning;

/// Render nodes of the sun. The group carries no material; its meshes are
/// children that spin on top of the group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunRig {
    pub group: EntityId,
    pub core: EntityId,
    /// Animated glow shell, present only with a sun texture.
    pub glow: Option<EntityId>,
    pub corona: EntityId,
}

impl SunRig {
    pub fn meshes(&self) -> impl Iterator<Item = EntityId> {
        [Some(self.core), self.glow, Some(self.corona)].into_iter().flatten()
    }
}

/// Everything the update loop and interaction layer need after the build.
pub struct SolarScene {
    pub bodies: Vec<Body>,
    /// Render node → index of the body that owns it.
    picks: HashMap<EntityId, usize>,
    pub backdrop: EntityId,
    pub star_field: EntityId,
    pub dust: EntityId,
    pub sun: SunRig,
    pub planet_list: PlanetList,
    pub lens_flare: Option<LensFlare>,
    pub search: SearchIndex,
}

impl SolarScene {
    /// Owning body of a picked render node.
    pub fn pick(&self, node: EntityId) -> Option<usize> {
        self.picks.get(&node).copied()
    }

    /// First focusable body with `key`.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.key == key && b.is_focusable())
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn atmospheres(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.bodies.iter().filter(|b| b.is_atmosphere()).map(|b| b.node)
    }

    pub fn meteors(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| matches!(b.kind, BodyKind::Meteor(_)))
    }
}

// ── Builder ──────────────────────────────────────────────────────────

struct SceneBuilder<'a> {
    ctx: &'a mut EngineContext,
    bodies: Vec<Body>,
    picks: HashMap<EntityId, usize>,
    planet_list: PlanetList,
}

impl<'a> SceneBuilder<'a> {
    fn new(ctx: &'a mut EngineContext) -> Self {
        Self {
            ctx,
            bodies: Vec::new(),
            picks: HashMap::new(),
            planet_list: PlanetList::new(),
        }
    }

    fn node(&mut self) -> Node {
        Node::new(self.ctx.next_id())
    }

    fn spawn(&mut self, node: Node) -> EntityId {
        let id = node.id;
        self.ctx.scene.spawn(node);
        id
    }

    fn spawn_child(&mut self, parent: EntityId, node: Node, local: LocalTransform) -> EntityId {
        let id = self.spawn(node);
        self.ctx.transforms.attach(id, parent, local);
        id
    }

    fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    fn pickable(&mut self, node: EntityId, body: usize) {
        self.picks.insert(node, body);
    }

    fn sphere(&mut self, segments: u32) -> GeometryId {
        self.ctx.geometry.add_sphere(&format!("sphere{segments}"), segments)
    }

    /// Texture for `key` if it can be sampled, otherwise a fresh gradient.
    fn texture_or_fallback(&mut self, key: &str) -> TextureId {
        match self.ctx.assets.available(key) {
            Some(id) => id,
            None => self.fallback_texture(key),
        }
    }

    fn fallback_texture(&mut self, key: &str) -> TextureId {
        log::warn!("texture {} unavailable; using generated placeholder", key);
        let (inner, outer) = assets::placeholder_colors(key).unwrap_or((DEFAULT_PLACEHOLDER[0], DEFAULT_PLACEHOLDER[1]));
        let pixels = placeholder::placeholder_gradient(PLACEHOLDER_SIZE, inner, outer);
        self.ctx.assets.add_generated(key, PLACEHOLDER_SIZE, pixels)
    }

    fn scroll(&mut self, key: &str, speed: f32) {
        self.ctx.assets.register_scroll(key, Vec2::new(speed, 0.0));
    }

    /// Post an ordered planet-list entry for bodies that host a project.
    fn list_entry(&mut self, key: &str, name: &str) {
        let Some(project) = projects::project(key) else { return };
        let Some(insert_before) = self.planet_list.insert(key, project.order) else { return };
        let title = if project.title.is_empty() { project.label() } else { project.title };
        let title = if title.is_empty() { name } else { title };
        self.ctx.post_ui(&UiMessage::PlanetListEntry(PlanetListEntry {
            key: key.to_string(),
            label: name.to_uppercase(),
            title: title.to_string(),
            color: project.bubble_color.to_string(),
            order: project.order,
            insert_before,
        }));
    }

    // ── Backdrop and point clouds ────────────────────────────────────

    fn backdrop(&mut self) -> EntityId {
        let geom = self.sphere(bodies::BACKDROP_SEGMENTS);
        let texture = self.ctx.assets.available("stars");
        let node = self
            .node()
            .with_tag("backdrop")
            .with_uniform_scale(bodies::BACKDROP_RADIUS)
            .with_material(materials::backdrop(geom, texture, bodies::BACKDROP_TINT));
        self.spawn(node)
    }

    fn point_clouds(&mut self, tuning: &SceneTuning) -> (EntityId, EntityId) {
        let sprite = self.ctx.assets.add_generated(STAR_SPRITE_KEY, STAR_SPRITE_SIZE, placeholder::star_sprite());

        let stars = geometry::star_particles(&mut self.ctx.rng, tuning.star_count);
        let geom = self.ctx.geometry.add_points("star_particles", &stars, true);
        let node = self
            .node()
            .with_tag("star_particles")
            .with_material(materials::points(geom, Some(sprite), tuning.star_point_size, 1.0));
        let star_field = self.spawn(node);

        let dust = geometry::dust_particles(&mut self.ctx.rng, tuning.dust_count);
        let geom = self.ctx.geometry.add_points("star_dust", &dust, true);
        let node = self
            .node()
            .with_tag("star_dust")
            .with_material(materials::points(geom, None, tuning.dust_point_size, tuning.dust_opacity));
        let dust = self.spawn(node);

        (star_field, dust)
    }

    // ── Sun ──────────────────────────────────────────────────────────

    fn sun(&mut self) -> (SunRig, Option<LensFlare>) {
        let geom = self.sphere(bodies::PLANET_SEGMENTS);
        let texture = self.ctx.assets.available(bodies::SUN_KEY);

        let group_node = self.node().with_tag(bodies::SUN_KEY);
        let group = self.spawn(group_node);
        let index = self.add_body(Body::star(bodies::SUN_KEY, bodies::SUN_NAME, group, bodies::SUN_RADIUS));

        let core_material = match texture {
            Some(tex) => materials::basic(geom, Some(tex), bodies::SUN_CORE_TINT),
            None => materials::basic(geom, None, color::hex_to_rgb(bodies::SUN_FALLBACK_COLOR)),
        };
        let core_node = self.node().with_tag("sun_core").with_material(core_material);
        let core = self.spawn_child(
            group,
            core_node,
            LocalTransform::new().with_uniform_scale(bodies::SUN_RADIUS * bodies::SUN_CORE_SCALE),
        );

        let glow = texture.map(|tex| {
            let node = self
                .node()
                .with_tag("sun_glow")
                .with_material(materials::sun_surface(geom, tex, bodies::SUN_GLOW_COLOR));
            self.spawn_child(group, node, LocalTransform::new().with_uniform_scale(bodies::SUN_RADIUS))
        });

        let corona_radius = bodies::SUN_RADIUS * bodies::SUN_CORONA_SCALE;
        let corona_node = self
            .node()
            .with_tag("sun_corona")
            .with_pick_radius(corona_radius)
            .with_material(materials::corona(geom, bodies::CORONA_INNER, bodies::CORONA_OUTER));
        let corona = self.spawn_child(group, corona_node, LocalTransform::new().with_uniform_scale(corona_radius));
        self.pickable(corona, index);

        self.list_entry(bodies::SUN_KEY, bodies::SUN_NAME);

        let flare = match (self.ctx.assets.loaded(FLARE_MAIN), self.ctx.assets.loaded(FLARE_GHOST)) {
            (Some(main), Some(ghost)) => Some(LensFlare::new(main, ghost)),
            _ => None,
        };

        (SunRig { group, core, glow, corona }, flare)
    }

    // ── Planets ──────────────────────────────────────────────────────

    /// Surface texture key and id, trying `key`, then `key_day`.
    fn planet_texture(&mut self, key: &str) -> (String, TextureId) {
        let day = format!("{key}_day");
        if let Some(id) = self.ctx.assets.available(key) {
            (key.to_string(), id)
        } else if let Some(id) = self.ctx.assets.available(&day) {
            (day, id)
        } else {
            let id = self.fallback_texture(key);
            (key.to_string(), id)
        }
    }

    fn planet_surface(&mut self, spec: &PlanetSpec) -> Surface {
        let (roughness, metalness) = materials::planet_finish(spec.key, spec.distance);
        if spec.key == "earth" {
            let map = self.texture_or_fallback("earth_day");
            self.scroll("earth_day", bodies::EARTH_DAY_SCROLL);
            let mut surface = Surface::new(Some(map), roughness, metalness);
            surface.normal_map = self.ctx.assets.loaded("earth_normal");
            if surface.normal_map.is_some() {
                self.scroll("earth_normal", bodies::EARTH_DETAIL_SCROLL);
            }
            surface.specular_map = self.ctx.assets.loaded("earth_specular");
            if surface.specular_map.is_some() {
                self.scroll("earth_specular", bodies::EARTH_DETAIL_SCROLL);
            }
            surface
        } else {
            let (key, map) = self.planet_texture(spec.key);
            self.scroll(&key, bodies::surface_scroll(spec.key));
            Surface::new(Some(map), roughness, metalness)
        }
    }

    fn planet(&mut self, spec: &PlanetSpec) -> usize {
        #[cfg(feature = "vectors")]
        self.ctx.guides.add_ring(spec.distance, &GuideStyle::default());

        let geom = self.sphere(bodies::PLANET_SEGMENTS);
        let surface = self.planet_surface(spec);
        let angle = self.ctx.rng.next_f32() * std::f32::consts::TAU;
        let node = self
            .node()
            .with_tag(spec.key)
            .with_pos(orbit::circular_position(Vec3::ZERO, angle, spec.distance))
            .with_uniform_scale(spec.radius)
            .with_pick_radius(spec.radius)
            .with_material(materials::standard(geom, &surface));
        let id = self.spawn(node);
        let index = self.add_body(Body::planet(spec, id, angle));
        self.pickable(id, index);
        self.list_entry(spec.key, spec.name);

        if spec.key == "earth" {
            let clouds = self.clouds(id, spec.radius, index);
            if let BodyKind::Planet { clouds: slot, .. } = &mut self.bodies[index].kind {
                *slot = clouds;
            }
        }
        if let Some(overlay) = bodies::overlay_for(spec.key) {
            let geom = self.sphere(bodies::PLANET_SEGMENTS);
            let node = self
                .node()
                .with_tag(format!("{}_overlay", spec.key))
                .with_uniform_scale(spec.radius * (1.0 + overlay.radius_offset))
                .with_material(materials::surface_overlay(geom, &overlay));
            let shell = self.spawn(node);
            let body = Body::overlay(&self.bodies[index], shell, OverlayLayer::Surface { speed_multiplier: overlay.speed_multiplier });
            self.add_body(body);
        }
        if let Some(glow) = spec.atmosphere {
            let node = self
                .node()
                .with_tag(format!("{}_atmosphere", spec.key))
                .with_uniform_scale(spec.radius * bodies::ATMOSPHERE_SCALE)
                .with_material(materials::atmosphere(geom, glow));
            let shell = self.spawn(node);
            let body = Body::overlay(&self.bodies[index], shell, OverlayLayer::Atmosphere);
            self.add_body(body);
        }
        if spec.rings {
            self.rings(id, spec.radius, index);
        }
        index
    }

    fn clouds(&mut self, planet: EntityId, radius: f32, index: usize) -> Option<EntityId> {
        let Some(map) = self.ctx.assets.loaded("earth_clouds") else {
            log::warn!("cloud texture unavailable, skipping clouds");
            return None;
        };
        self.scroll("earth_clouds", bodies::CLOUD_SCROLL);
        let geom = self.sphere(bodies::PLANET_SEGMENTS);
        let mut slot = materials::standard(geom, &Surface::new(Some(map), 1.0, 0.0));
        slot.opacity = bodies::CLOUD_OPACITY;
        let node = self
            .node()
            .with_tag("earth_clouds")
            .with_pick_radius(radius * bodies::CLOUD_SCALE)
            .with_material(slot);
        let id = self.spawn_child(planet, node, LocalTransform::new().with_uniform_scale(bodies::CLOUD_SCALE));
        self.pickable(id, index);
        Some(id)
    }

    fn rings(&mut self, planet: EntityId, radius: f32, index: usize) {
        let map = self.texture_or_fallback("saturn_ring");
        self.scroll("saturn_ring", bodies::RING_SCROLL);
        let mesh = geometry::ring_mesh(bodies::RING_INNER, bodies::RING_OUTER, bodies::RING_SEGMENTS);
        let geom = self.ctx.geometry.add_mesh("saturn_ring", mesh, true);
        let node = self
            .node()
            .with_tag("saturn_ring")
            .with_pick_radius(radius * bodies::RING_OUTER)
            .with_material(materials::standard(geom, &Surface::new(Some(map), 0.8, 0.1)));
        let id = self.spawn_child(
            planet,
            node,
            LocalTransform::new().with_rotation(Quat::from_rotation_x(bodies::RING_TILT)),
        );
        self.pickable(id, index);
    }

    // ── Moon ─────────────────────────────────────────────────────────

    fn moon(&mut self) {
        let Some(parent) = self.bodies.iter().position(|b| b.key == MOON.parent && matches!(b.kind, BodyKind::Planet { .. })) else {
            log::warn!("moon parent {} missing; skipping moon", MOON.parent);
            return;
        };
        let geom = self.sphere(bodies::MOON_SEGMENTS);
        let map = self.texture_or_fallback(MOON.key);
        let center = self.ctx.scene.get(self.bodies[parent].node).map_or(Vec3::ZERO, |n| n.pos);
        let node = self
            .node()
            .with_tag(MOON.key)
            .with_pos(orbit::circular_position(center, 0.0, MOON.distance))
            .with_uniform_scale(MOON.radius)
            .with_pick_radius(MOON.radius)
            .with_material(materials::standard(geom, &Surface::new(Some(map), 0.9, 0.0)));
        let id = self.spawn(node);
        let index = self.add_body(Body::moon(&MOON, id, parent));
        self.pickable(id, index);
    }

    // ── Comets ───────────────────────────────────────────────────────

    fn comets(&mut self) {
        let core_geom = self.sphere(16);
        let coma_geom = self.sphere(32);
        let ion_geom = self
            .ctx
            .geometry
            .add_mesh("ion_tail", geometry::tail_mesh(bodies::ION_TAIL_LENGTH, bodies::ION_TAIL_WIDTH), true);
        let dust_geom = self
            .ctx
            .geometry
            .add_mesh("dust_tail", geometry::tail_mesh(bodies::DUST_TAIL_LENGTH, bodies::DUST_TAIL_WIDTH), true);

        for spec in &COMETS {
            let angle = self.ctx.rng.next_f32() * std::f32::consts::TAU;
            let roll = self.ctx.rng.next_f32() * std::f32::consts::TAU;
            let pos = orbit::comet_position(spec.distance, spec.eccentricity, spec.inclination_deg, angle);
            let mut group_node = self.node().with_tag(spec.name).with_pos(pos);
            if let Some(q) = orbit::comet_orientation(pos, roll) {
                group_node = group_node.with_rotation(q);
            }
            let group = self.spawn(group_node);

            let core_color = color::hex_to_rgb(spec.core_color);
            let mut surface = Surface::new(None, 0.25, 0.0);
            surface.color = color::scale(core_color, bodies::COMET_CORE_ALBEDO);
            surface.emissive = core_color;
            surface.emissive_intensity = bodies::COMET_CORE_EMISSIVE;
            let node = self.node().with_material(materials::standard(core_geom, &surface));
            let core = self.spawn_child(group, node, LocalTransform::new().with_uniform_scale(bodies::COMET_CORE_RADIUS));

            let mut coma = materials::basic(coma_geom, None, core_color);
            coma.blend = cosmo_engine::BlendMode::Additive;
            coma.opacity = bodies::COMET_COMA_OPACITY;
            let node = self.node().with_material(coma);
            self.spawn_child(group, node, LocalTransform::new().with_uniform_scale(bodies::COMET_COMA_RADIUS));

            let node = self
                .node()
                .with_material(materials::comet_tail(ion_geom, spec.tail_color, bodies::ION_TAIL_OPACITY));
            self.spawn_child(group, node, LocalTransform::new().with_offset(Vec3::from(bodies::ION_TAIL_OFFSET)));

            let node = self
                .node()
                .with_material(materials::comet_tail(dust_geom, bodies::DUST_TAIL_COLOR, bodies::DUST_TAIL_OPACITY));
            self.spawn_child(
                group,
                node,
                LocalTransform::new()
                    .with_offset(Vec3::from(bodies::DUST_TAIL_OFFSET))
                    .with_rotation(Quat::from_rotation_z(bodies::DUST_TAIL_TILT)),
            );

            self.add_body(Body::comet(spec, group, core, angle, roll));
        }
    }

    // ── Meteors ──────────────────────────────────────────────────────

    fn meteors(&mut self, tuning: &SceneTuning) {
        let geom = self.ctx.geometry.add_mesh("meteor", geometry::meteor_quad(), true);
        for _ in 0..tuning.meteors.pool_size {
            let meteor = Meteor::new(&mut self.ctx.rng, &tuning.meteors);
            let node = self
                .node()
                .with_tag("meteor")
                .with_visible(false)
                .with_material(materials::meteor(geom));
            let id = self.spawn(node);
            self.add_body(Body::meteor(id, meteor));
        }
    }
}

/// Build every body, guide, cloud and pool, in draw-registration order.
pub fn build_scene(ctx: &mut EngineContext, tuning: &SceneTuning) -> SolarScene {
    log::info!("building solar scene");
    let mut b = SceneBuilder::new(ctx);

    let backdrop = b.backdrop();
    let (star_field, dust) = b.point_clouds(tuning);
    let (sun, lens_flare) = b.sun();
    for spec in &PLANETS {
        b.planet(spec);
    }
    b.moon();
    b.comets();
    b.meteors(tuning);

    if let Some(flare) = &lens_flare {
        b.ctx.post_ui(&UiMessage::LensFlare(flare.clone()));
    }

    let SceneBuilder { ctx, bodies, picks, planet_list } = b;
    ctx.assets.freeze();
    log::info!(
        "solar scene ready: {} bodies, {} nodes, {} listed projects",
        bodies.len(),
        ctx.scene.len(),
        planet_list.len()
    );

    SolarScene {
        bodies,
        picks,
        backdrop,
        star_field,
        dust,
        sun,
        planet_list,
        lens_flare,
        search: SearchIndex::build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::builtin_manifest;
    use cosmo_engine::TextureStatus;

    pub(crate) fn small_tuning() -> SceneTuning {
        SceneTuning { star_count: 50, dust_count: 20, ..SceneTuning::default() }
    }

    fn built() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new();
        let scene = build_scene(&mut ctx, &small_tuning());
        (ctx, scene)
    }

    fn count(scene: &SolarScene, pred: impl Fn(&BodyKind) -> bool) -> usize {
        scene.bodies.iter().filter(|b| pred(&b.kind)).count()
    }

    #[test]
    fn builds_every_body_kind() {
        let (_, scene) = built();
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Star { .. })), 1);
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Planet { .. })), 8);
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Moon { .. })), 1);
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Comet { .. })), 3);
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Meteor(_))), 150);
        // 6 surface overlays + 3 atmospheres
        assert_eq!(count(&scene, |k| matches!(k, BodyKind::Overlay { .. })), 9);
        assert_eq!(scene.atmospheres().count(), 3);
    }

    #[test]
    fn meteors_start_hidden() {
        let (ctx, scene) = built();
        for m in scene.meteors() {
            assert!(!ctx.scene.get(m.node).unwrap().visible);
        }
    }

    #[test]
    fn pick_table_maps_children_to_their_body() {
        let (ctx, scene) = built();
        let sun = scene.find("sun").unwrap();
        assert_eq!(scene.pick(scene.sun.corona), Some(sun));
        assert_eq!(scene.pick(scene.sun.group), None);

        let saturn = scene.find("saturn").unwrap();
        let ring = ctx.scene.find_by_tag("saturn_ring").unwrap().id;
        assert_eq!(scene.pick(ring), Some(saturn));

        let moon = scene.find("moon").unwrap();
        assert_eq!(scene.pick(scene.bodies[moon].node), Some(moon));
    }

    #[test]
    fn planet_list_skips_moon_and_neptune() {
        let (mut ctx, scene) = built();
        let keys: Vec<&str> = scene.planet_list.keys().collect();
        assert_eq!(keys, ["sun", "saturn", "uranus", "jupiter", "mars", "earth", "venus", "mercury"]);

        let json: serde_json::Value = serde_json::from_str(&ctx.take_ui_messages()).unwrap();
        let entries: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["type"] == "planet_list_entry")
            .collect();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0]["label"], "SUN");
        assert!(entries[0]["insert_before"].is_null());
    }

    #[test]
    fn missing_textures_fall_back_without_clouds_or_flare() {
        let (ctx, scene) = built();
        assert!(scene.lens_flare.is_none());
        assert!(ctx.scene.find_by_tag("earth_clouds").is_none());
        assert!(scene.sun.glow.is_none());
        assert_eq!(ctx.assets.status("mars"), Some(TextureStatus::Placeholder));
        let planet = scene.find("earth").unwrap();
        match scene.bodies[planet].kind {
            BodyKind::Planet { clouds, .. } => assert!(clouds.is_none()),
            _ => panic!("earth should be a planet"),
        }
    }

    #[test]
    fn loaded_textures_enable_clouds_glow_and_flare() {
        let mut ctx = EngineContext::new();
        ctx.assets.load_manifest(&builtin_manifest());
        for key in ["sun", "earth_day", "earth_clouds", "earth_normal", FLARE_MAIN, FLARE_GHOST] {
            ctx.assets.mark_loaded(key);
        }
        let scene = build_scene(&mut ctx, &small_tuning());
        assert!(scene.sun.glow.is_some());
        assert_eq!(scene.lens_flare.as_ref().map(|f| f.elements.len()), Some(5));
        let clouds = ctx.scene.find_by_tag("earth_clouds").unwrap().id;
        assert_eq!(scene.pick(clouds), scene.find("earth"));
        // earth day, normal, clouds; jupiter, saturn, ring. Specular never loaded.
        assert_eq!(ctx.assets.scroll_count(), 6);
    }

    #[test]
    fn built_scene_pins_texture_ids() {
        let (mut ctx, _) = built();
        assert!(ctx.assets.is_frozen());
        let sprite = ctx.assets.id(STAR_SPRITE_KEY);
        let count = ctx.assets.len();
        assert!(!ctx.assets.load_manifest(&builtin_manifest()));
        assert_eq!(ctx.assets.len(), count);
        assert_eq!(ctx.assets.id(STAR_SPRITE_KEY), sprite);
        assert!(sprite.is_some());
    }

    #[test]
    fn planets_start_on_their_orbits() {
        let (ctx, scene) = built();
        for spec in &PLANETS {
            let body = &scene.bodies[scene.find(spec.key).unwrap()];
            let pos = ctx.scene.get(body.node).unwrap().pos;
            assert!((pos.length() - spec.distance).abs() < 1e-3);
            assert!(pos.y.abs() < 1e-6);
        }
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn one_guide_ring_per_planet() {
        let (ctx, _) = built();
        assert_eq!(ctx.guides.ring_count(), PLANETS.len());
    }
}
