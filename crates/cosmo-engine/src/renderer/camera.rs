use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use crate::core::scene::Ray;

/// Smallest polar angle the orbit controls allow (keeps the camera off the pole).
const POLAR_EPSILON: f32 = 1e-3;

/// Perspective camera orbiting a target point, with orbit-controls style
/// damping, distance limits and a zoom switch.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending orbit motion applied per update (0 = no damping).
    pub damping: f32,
    /// Wheel zoom is ignored while false (e.g. while a body is focused).
    pub zoom_enabled: bool,
    home_position: Vec3,
    home_target: Vec3,
    /// Pending (azimuth, polar) rotation still to be applied.
    pending: (f32, f32),
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w = unused.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Camera3D {
    pub fn new(position: Vec3, target: Vec3, fov_deg: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            fov_deg,
            aspect,
            near: 0.1,
            far: 50_000.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            damping: 0.0,
            zoom_enabled: true,
            home_position: position,
            home_target: target,
            pending: (0.0, 0.0),
        }
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect.max(1e-6), self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Build a world-space ray through a point in normalized device coordinates
    /// (x, y in [-1, 1], y up).
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = self.view_proj().inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray::new(self.position, far - near)
    }

    /// Queue an orbit rotation around the target (radians).
    /// Applied gradually by `update_controls` when damping is on.
    pub fn orbit(&mut self, d_azimuth: f32, d_polar: f32) {
        self.pending.0 += d_azimuth;
        self.pending.1 += d_polar;
    }

    /// Multiply the target distance by `factor` (>1 zooms out).
    /// Returns false when zoom is disabled.
    pub fn zoom(&mut self, factor: f32) -> bool {
        if !self.zoom_enabled || factor <= 0.0 {
            return false;
        }
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).clamp(self.min_distance, self.max_distance);
        self.position = self.target + offset.normalize_or_zero() * distance;
        true
    }

    /// Apply pending orbit motion. Call once per frame.
    pub fn update_controls(&mut self) {
        let (d_az, d_polar) = self.pending;
        if d_az == 0.0 && d_polar == 0.0 {
            return;
        }
        let step = if self.damping > 0.0 { self.damping } else { 1.0 };
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius > 0.0 {
            let mut azimuth = offset.x.atan2(offset.z);
            let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
            azimuth += d_az * step;
            polar = (polar + d_polar * step).clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
            let radius = radius.clamp(self.min_distance, self.max_distance);
            self.position = self.target + Vec3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );
        }
        if self.damping > 0.0 {
            self.pending = (d_az * (1.0 - self.damping), d_polar * (1.0 - self.damping));
            if self.pending.0.abs() < 1e-6 && self.pending.1.abs() < 1e-6 {
                self.pending = (0.0, 0.0);
            }
        } else {
            self.pending = (0.0, 0.0);
        }
    }

    /// One frame of focus tracking: the target eases toward `focus` and the
    /// eye eases toward `distance` from the target along its current heading.
    pub fn focus_step(&mut self, focus: Vec3, distance: f32, dt: f32, gain: f32) {
        let t = (dt * gain).clamp(0.0, 1.0);
        self.target = self.target.lerp(focus, t);
        let offset = self.position - self.target;
        let heading = if offset.length_squared() > 0.0 { offset.normalize() } else { Vec3::Z };
        let desired = self.target + heading * distance;
        self.position = self.position.lerp(desired, t);
    }

    /// Return to the initial eye/target and re-enable zoom.
    pub fn reset(&mut self) {
        self.position = self.home_position;
        self.target = self.home_target;
        self.pending = (0.0, 0.0);
        self.zoom_enabled = true;
    }
}
