//! Pointer handling, picking and focus.
//!
//! A press that travels past the drag threshold orbits the camera; a press
//! released in place is a click and casts a pick ray.

use cosmo_engine::{Camera3D, EngineContext};
use glam::{Vec2, Vec3};

use crate::body::Body;
use crate::builder::SolarScene;
use crate::projects;
use crate::ui::{InfoPanel, UiMessage};
use crate::update::SceneTuning;

/// Wheel steps scale the camera distance by this factor.
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionMode {
    Idle,
    /// Pressed, not yet past the drag threshold.
    Pressed,
    OrbitCamera,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionResult {
    None,
    CameraOrbited,
    /// Press and release without a drag, at this CSS-pixel position.
    Click { pos: Vec2 },
}

pub struct InteractionSystem {
    mode: InteractionMode,
    pointer_start: Vec2,
    last_pointer: Vec2,
    drag_threshold: f32,
    /// Orbit radians per pixel.
    sensitivity: f32,
}

impl InteractionSystem {
    pub fn new(tuning: &SceneTuning) -> Self {
        Self {
            mode: InteractionMode::Idle,
            pointer_start: Vec2::ZERO,
            last_pointer: Vec2::ZERO,
            drag_threshold: tuning.drag_threshold,
            sensitivity: tuning.drag_sensitivity,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether the camera controls currently own the pointer.
    pub fn is_dragging(&self) -> bool {
        self.mode == InteractionMode::OrbitCamera
    }

    pub fn on_pointer_down(&mut self, pos: Vec2) {
        self.mode = InteractionMode::Pressed;
        self.pointer_start = pos;
        self.last_pointer = pos;
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, camera: &mut Camera3D) -> InteractionResult {
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        match self.mode {
            InteractionMode::Idle => InteractionResult::None,
            InteractionMode::Pressed => {
                if (pos - self.pointer_start).length() > self.drag_threshold {
                    self.mode = InteractionMode::OrbitCamera;
                    camera.orbit(-delta.x * self.sensitivity, -delta.y * self.sensitivity);
                    InteractionResult::CameraOrbited
                } else {
                    InteractionResult::None
                }
            }
            InteractionMode::OrbitCamera => {
                camera.orbit(-delta.x * self.sensitivity, -delta.y * self.sensitivity);
                InteractionResult::CameraOrbited
            }
        }
    }

    pub fn on_pointer_up(&mut self, pos: Vec2) -> InteractionResult {
        let mode = std::mem::replace(&mut self.mode, InteractionMode::Idle);
        match mode {
            InteractionMode::Pressed => InteractionResult::Click { pos },
            _ => InteractionResult::None,
        }
    }

    /// Positive deltas zoom out. Ignored while zoom is locked by focus.
    pub fn on_wheel(&mut self, delta: f32, camera: &mut Camera3D) -> bool {
        if delta == 0.0 {
            return false;
        }
        let factor = if delta > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
        camera.zoom(factor)
    }
}

// ── Focus ────────────────────────────────────────────────────────────

/// Info panel contents for a focusable body.
pub fn panel_for(body: &Body) -> InfoPanel {
    match projects::project(&body.key) {
        Some(project) => InfoPanel::for_project(&body.key, project),
        None => InfoPanel::generic(&body.key, &body.name, body.radius, body.sun_distance()),
    }
}

/// The focused body, which the camera tracks and the info panel describes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusTracker {
    current: Option<usize>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Focus body `index`: show its panel, highlight its list entry and
    /// lock zoom. Returns false for unknown or non-focusable bodies.
    pub fn focus(&mut self, ctx: &mut EngineContext, scene: &SolarScene, index: usize) -> bool {
        let Some(body) = scene.body(index).filter(|b| b.is_focusable()) else {
            return false;
        };
        log::debug!("focus {}", body.key);
        self.current = Some(index);
        ctx.post_ui(&UiMessage::InfoPanel(panel_for(body)));
        ctx.post_ui(&UiMessage::ActiveItem { key: Some(body.key.clone()) });
        ctx.camera.zoom_enabled = false;
        true
    }

    pub fn focus_key(&mut self, ctx: &mut EngineContext, scene: &SolarScene, key: &str) -> bool {
        match scene.find(key) {
            Some(index) => self.focus(ctx, scene, index),
            None => false,
        }
    }

    /// Close the info panel. The list highlight stays.
    pub fn close_panel(&mut self, ctx: &mut EngineContext) {
        self.current = None;
        ctx.camera.zoom_enabled = true;
        ctx.post_ui(&UiMessage::InfoPanelClosed);
    }

    /// Drop focus and fly home.
    pub fn reset_view(&mut self, ctx: &mut EngineContext) {
        self.current = None;
        ctx.camera.reset();
        ctx.post_ui(&UiMessage::InfoPanelClosed);
        ctx.post_ui(&UiMessage::ActiveItem { key: None });
    }

    /// Cast a ray through a CSS-pixel position and focus whatever it hits.
    pub fn pick(&mut self, ctx: &mut EngineContext, scene: &SolarScene, pos: Vec2) -> Option<usize> {
        let ndc = ctx.pointer_ndc(pos.x, pos.y);
        let ray = ctx.camera.ray_from_ndc(ndc.x, ndc.y);
        let hit = ctx.scene.raycast(&ray)?;
        let index = scene.pick(hit.id)?;
        self.focus(ctx, scene, index).then_some(index)
    }

    /// Focus the first project matching `raw` and report the outcome.
    /// A blank query clears the feedback line and leaves focus alone.
    pub fn search(&mut self, ctx: &mut EngineContext, scene: &SolarScene, raw: &str) {
        let term = raw.trim();
        if term.is_empty() {
            ctx.post_ui(&UiMessage::SearchFeedback { message: String::new() });
            return;
        }
        let found = scene.search.find(term).filter(|key| self.focus_key(ctx, scene, key));
        let message = match found.and_then(projects::project) {
            Some(project) => format!("Focused on {}.", project.label()),
            None => format!("No project matched \"{term}\"."),
        };
        ctx.post_ui(&UiMessage::SearchFeedback { message });
    }

    /// Ease the camera toward the focused body. Runs every frame, paused or
    /// not, on real time.
    pub fn track(&self, ctx: &mut EngineContext, scene: &SolarScene, real_dt: f32, tuning: &SceneTuning) {
        let Some(body) = self.current.and_then(|i| scene.body(i)) else { return };
        let target = ctx.scene.get(body.node).map_or(Vec3::ZERO, |n| n.pos);
        let distance = body.focus_distance(tuning.focus_distance_scale, tuning.focus_distance_offset);
        ctx.camera.focus_step(target, distance, real_dt, tuning.focus_gain);
    }
}
