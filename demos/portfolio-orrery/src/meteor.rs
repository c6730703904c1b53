//! Meteor lifecycle: dormant meteors count down a spawn delay, active ones
//! fly inward, stretch and fade, then go dormant again. Meteors are never
//! freed; the pool is recycled in place.

use cosmo_engine::Rng;
use glam::{Quat, Vec3};

use crate::color;

/// Tuning for the meteor pool. Defaults reproduce the shipped look.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorTuning {
    pub pool_size: usize,
    /// First spawn delay range (simulated seconds).
    pub initial_delay: (f32, f32),
    /// Delay range after a meteor expires.
    pub respawn_delay: (f32, f32),
    pub life: (f32, f32),
    pub peak_opacity: (f32, f32),
    pub tail_length: (f32, f32),
    pub tail_width: (f32, f32),
    pub tail_sharpness: (f32, f32),
    /// Spawn shell radius range.
    pub start_radius: (f32, f32),
    pub speed: (f32, f32),
    /// Lateral jitter added to the inward heading, as a full-width range.
    pub lateral_jitter: f32,
    /// Active meteors beyond this squared distance expire.
    pub expiry_radius_sq: f32,
    /// Tail length grows by this fraction over the meteor's life.
    pub stretch: f32,
}

impl Default for MeteorTuning {
    fn default() -> Self {
        Self {
            pool_size: 150,
            initial_delay: (0.5, 3.5),
            respawn_delay: (1.5, 5.5),
            life: (3.0, 6.0),
            peak_opacity: (0.8, 1.0),
            tail_length: (200.0, 500.0),
            tail_width: (2.0, 4.5),
            tail_sharpness: (1.8, 3.0),
            start_radius: (1200.0, 2400.0),
            speed: (320.0, 500.0),
            lateral_jitter: 0.6,
            expiry_radius_sq: 16_000_000.0,
            stretch: 0.9,
        }
    }
}

fn sample(rng: &mut Rng, (lo, hi): (f32, f32)) -> f32 {
    rng.range(lo, hi)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeteorPhase {
    Dormant { delay: f32 },
    Active { life: f32, max_life: f32 },
}

/// Outcome of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorEvent {
    Waiting,
    Spawned,
    Moved,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub phase: MeteorPhase,
    pub position: Vec3,
    pub velocity: Vec3,
    pub peak_opacity: f32,
    pub tail_length: f32,
    pub tail_width: f32,
    pub tail_sharpness: f32,
    pub head_color: [f32; 3],
    pub tail_color: [f32; 3],
    /// Current visual opacity (0 while dormant).
    pub opacity: f32,
    /// Current visual tail length.
    pub length: f32,
}

/// `sin((1 - life_ratio)·π)`: zero at both ends of the life, peak midway.
pub fn envelope(life_ratio: f32) -> f32 {
    ((1.0 - life_ratio) * std::f32::consts::PI).sin().max(0.0)
}

impl Meteor {
    pub fn new(rng: &mut Rng, tuning: &MeteorTuning) -> Self {
        Self {
            phase: MeteorPhase::Dormant { delay: sample(rng, tuning.initial_delay) },
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            peak_opacity: 0.0,
            tail_length: 0.0,
            tail_width: 0.0,
            tail_sharpness: 2.5,
            head_color: [1.2, 1.1, 1.0],
            tail_color: [1.0, 0.8, 0.4],
            opacity: 0.0,
            length: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, MeteorPhase::Active { .. })
    }

    /// Life remaining as a fraction of the full life (0 when dormant).
    pub fn life_ratio(&self) -> f32 {
        match self.phase {
            MeteorPhase::Active { life, max_life } if max_life > 0.0 => life / max_life,
            _ => 0.0,
        }
    }

    /// Orientation taking the quad's +Y axis onto the flight direction.
    pub fn orientation(&self) -> Quat {
        let dir = self.velocity.normalize_or_zero();
        if dir == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Y, dir)
        }
    }

    /// Start a flight from a random point on the spawn shell, heading
    /// roughly toward the origin.
    pub fn spawn(&mut self, rng: &mut Rng, tuning: &MeteorTuning) {
        let max_life = sample(rng, tuning.life);
        self.phase = MeteorPhase::Active { life: max_life, max_life };
        self.peak_opacity = sample(rng, tuning.peak_opacity);
        self.tail_length = sample(rng, tuning.tail_length);
        self.tail_width = sample(rng, tuning.tail_width);
        self.tail_sharpness = sample(rng, tuning.tail_sharpness);

        let start_dir = rng.unit_vector();
        self.position = start_dir * sample(rng, tuning.start_radius);

        let mut tangent = start_dir.cross(Vec3::Y);
        if tangent.length_squared() < 1e-4 {
            tangent = Vec3::X;
        }
        let jitter = (rng.next_f32() - 0.5) * tuning.lateral_jitter;
        let heading = (-start_dir + tangent.normalize() * jitter).normalize_or_zero();
        self.velocity = heading * sample(rng, tuning.speed);

        self.head_color = color::hsl_to_rgb(rng.range(0.1, 0.18), 1.0, 0.95);
        self.tail_color = color::hsl_to_rgb(rng.range(0.08, 0.13), 0.9, 0.65);
        self.opacity = 0.0;
        self.length = self.tail_length;
    }

    pub fn reset(&mut self, rng: &mut Rng, tuning: &MeteorTuning) {
        self.phase = MeteorPhase::Dormant { delay: sample(rng, tuning.respawn_delay) };
        self.opacity = 0.0;
    }

    /// Advance by `dt` simulated seconds.
    pub fn step(&mut self, dt: f32, rng: &mut Rng, tuning: &MeteorTuning) -> MeteorEvent {
        match self.phase {
            MeteorPhase::Dormant { delay } => {
                let delay = delay - dt;
                if delay <= 0.0 {
                    self.spawn(rng, tuning);
                    MeteorEvent::Spawned
                } else {
                    self.phase = MeteorPhase::Dormant { delay };
                    MeteorEvent::Waiting
                }
            }
            MeteorPhase::Active { life, max_life } => {
                let life = life - dt;
                if life <= 0.0 {
                    self.reset(rng, tuning);
                    return MeteorEvent::Expired;
                }
                self.phase = MeteorPhase::Active { life, max_life };
                self.position += self.velocity * dt;
                if self.position.length_squared() > tuning.expiry_radius_sq {
                    self.reset(rng, tuning);
                    return MeteorEvent::Expired;
                }
                let ratio = life / max_life;
                self.length = self.tail_length * (1.0 + (1.0 - ratio) * tuning.stretch);
                self.opacity = envelope(ratio) * self.peak_opacity;
                MeteorEvent::Moved
            }
        }
    }
}
