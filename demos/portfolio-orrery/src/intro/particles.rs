//! The three particle populations of the intro plus the milky-way band.
//! Each one updates its own state and appends draw ops to a frame.

use cosmo_engine::Rng;
use std::f32::consts::TAU;

use super::host::{DrawOp, IntroFrame, Rgba};

fn white(alpha: f32) -> Rgba {
    [1.0, 1.0, 1.0, alpha]
}

// ── Milky-way band ───────────────────────────────────────────────────

fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Diagonal glow across the middle of the screen.
pub fn milky_way_band(frame: &mut IntroFrame, width: f32, height: f32) {
    frame.push(DrawOp::Band {
        from: [0.0, height * 0.28],
        to: [width, height * 0.7],
        stops: vec![
            (0.0, rgba8(26, 32, 56, 0.0)),
            (0.25, rgba8(58, 82, 126, 0.15)),
            (0.5, rgba8(98, 122, 166, 0.25)),
            (0.75, rgba8(58, 82, 126, 0.15)),
            (1.0, rgba8(26, 32, 56, 0.0)),
        ],
    });
}

// ── Galaxy clusters ──────────────────────────────────────────────────

/// Slowly drifting smudge of dim points, re-scattered every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyCluster {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub density: u32,
    pub speed: f32,
    width: f32,
}

impl GalaxyCluster {
    pub fn new(rng: &mut Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.next_f32() * width,
            y: height * 0.3 + rng.next_f32() * height * 0.4,
            size: rng.range(80.0, 240.0),
            density: rng.range(60.0, 180.0) as u32,
            speed: rng.range(0.06, 0.28),
            width,
        }
    }

    /// Drift left, wrapping past the right edge.
    pub fn update(&mut self) {
        self.x -= self.speed;
        if self.x < -self.size {
            self.x = self.width + self.size;
        }
    }

    pub fn draw(&self, rng: &mut Rng, frame: &mut IntroFrame) {
        let spread = self.size * 0.55;
        for _ in 0..self.density {
            let angle = rng.next_f32() * TAU;
            let radius = rng.next_f32() * spread;
            let brightness = 1.0 - radius / spread;
            frame.push(DrawOp::Rect {
                x: self.x + angle.cos() * radius,
                y: self.y + angle.sin() * radius,
                w: 1.0,
                h: 1.0,
                color: white(brightness * 0.28),
            });
        }
    }
}

// ── Distant stars ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DistantStar {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub brightness: f32,
    twinkle: f32,
    phase: f32,
}

impl DistantStar {
    pub fn new(rng: &mut Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.next_f32() * width,
            y: rng.next_f32() * height,
            size: rng.range(0.4, 1.5),
            brightness: rng.range(0.3, 0.9),
            twinkle: rng.range(0.01, 0.03),
            phase: rng.next_f32() * TAU,
        }
    }

    /// Brightness oscillates in [0, 0.7] with the frame counter.
    pub fn update(&mut self, time: f32) {
        self.brightness = 0.35 + (time * self.twinkle + self.phase).sin() * 0.35;
    }

    pub fn draw(&self, frame: &mut IntroFrame) {
        frame.push(DrawOp::Circle { x: self.x, y: self.y, r: self.size, color: white(self.brightness) });
    }
}

// ── Micro particles ──────────────────────────────────────────────────

/// Depth range particles respawn in.
const MICRO_NEAR_SPAWN: f32 = 1000.0;
const MICRO_DEPTH_SPAN: f32 = 2000.0;
/// Projection focal length.
const FOCAL: f32 = 1000.0;

/// Foreground particle flying toward the viewer. `x`/`y` are normalized
/// screen offsets projected by `FOCAL / z`.
#[derive(Debug, Clone, PartialEq)]
pub struct MicroParticle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Depth on the previous frame; the streak runs from there.
    pub pz: f32,
    pub size: f32,
    pub brightness: f32,
}

impl MicroParticle {
    pub fn new(rng: &mut Rng) -> Self {
        let mut p = Self { x: 0.0, y: 0.0, z: 0.0, pz: 0.0, size: 0.0, brightness: 0.0 };
        p.reset(rng);
        p
    }

    pub fn reset(&mut self, rng: &mut Rng) {
        self.z = MICRO_NEAR_SPAWN + rng.next_f32() * MICRO_DEPTH_SPAN;
        self.x = (rng.next_f32() - 0.5) * 2.2;
        self.y = (rng.next_f32() - 0.5) * 2.2;
        self.size = rng.range(0.2, 0.6);
        self.brightness = rng.range(0.3, 0.8);
        self.pz = self.z;
    }

    pub fn update(&mut self, rng: &mut Rng, speed: f32) {
        self.pz = self.z;
        self.z -= speed;
        if self.z < 1.0 {
            self.reset(rng);
        }
    }

    /// Screen position at depth `z`.
    pub fn project(&self, z: f32, width: f32, height: f32) -> [f32; 2] {
        let scale = FOCAL / z;
        [self.x * scale * width + width * 0.5, self.y * scale * height + height * 0.5]
    }

    /// Streak from the previous position, an optional halo, then the core.
    pub fn draw(&self, frame: &mut IntroFrame, speed: f32, width: f32, height: f32) {
        let [x, y] = self.project(self.z, width, height);
        let prev = self.project(self.pz, width, height);
        let size = (1.0 - self.z / (MICRO_NEAR_SPAWN + MICRO_DEPTH_SPAN)) * self.size * 2.4;
        let trail = (speed / 28.0).min(0.85) * self.brightness;

        frame.push(DrawOp::Line {
            from: prev,
            to: [x, y],
            width: (size * 0.4).max(0.5),
            color: white(trail * 0.6),
        });
        if size > 0.8 {
            frame.push(DrawOp::Circle { x, y, r: size * 1.4, color: white(self.brightness * 0.3) });
        }
        // negative radii throw in canvas arc()
        frame.push(DrawOp::Circle { x, y, r: size.max(0.0), color: white(self.brightness) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_wraps_to_the_right_edge() {
        let mut rng = Rng::new(3);
        let mut cluster = GalaxyCluster::new(&mut rng, 800.0, 600.0);
        assert!(cluster.y >= 180.0 && cluster.y <= 420.0);
        cluster.x = -cluster.size + 0.01;
        cluster.speed = 0.1;
        cluster.update();
        assert!((cluster.x - (800.0 + cluster.size)).abs() < 1e-3);
    }

    #[test]
    fn cluster_draws_density_points() {
        let mut rng = Rng::new(4);
        let cluster = GalaxyCluster::new(&mut rng, 800.0, 600.0);
        let mut frame = IntroFrame::default();
        cluster.draw(&mut rng, &mut frame);
        assert_eq!(frame.len(), cluster.density as usize);
    }

    #[test]
    fn star_twinkle_stays_in_range() {
        let mut rng = Rng::new(5);
        let mut star = DistantStar::new(&mut rng, 800.0, 600.0);
        for t in 0..500 {
            star.update(t as f32);
            assert!((0.0..=0.7 + 1e-6).contains(&star.brightness));
        }
    }

    #[test]
    fn particle_respawns_behind_the_viewer() {
        let mut rng = Rng::new(6);
        let mut p = MicroParticle::new(&mut rng);
        assert!(p.z >= 1000.0 && p.z < 3000.0);
        p.z = 5.0;
        p.update(&mut rng, 10.0);
        assert!(p.z >= 1000.0);
        assert_eq!(p.pz, p.z);
    }

    #[test]
    fn particle_streaks_outward() {
        let mut rng = Rng::new(7);
        let mut p = MicroParticle::new(&mut rng);
        p.x = 0.5;
        p.y = 0.0;
        p.update(&mut rng, 20.0);
        let now = p.project(p.z, 800.0, 600.0);
        let before = p.project(p.pz, 800.0, 600.0);
        assert!(now[0] > before[0]);

        let mut frame = IntroFrame::default();
        p.draw(&mut frame, 20.0, 800.0, 600.0);
        assert!(matches!(frame.ops[0], DrawOp::Line { .. }));
    }
}
