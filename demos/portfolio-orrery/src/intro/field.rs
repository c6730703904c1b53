use cosmo_engine::Rng;

use super::host::{DrawOp, IntroFrame};
use super::particles::{milky_way_band, DistantStar, GalaxyCluster, MicroParticle};

pub const CLUSTER_COUNT: usize = 5;
pub const STAR_COUNT: usize = 320;
pub const PARTICLE_COUNT: usize = 2600;
pub const INITIAL_SPEED: f32 = 15.0;
/// Fraction of the gap to the target speed closed each frame.
const SPEED_EASE: f32 = 0.05;
const FADE: [f32; 4] = [1.0 / 255.0, 3.0 / 255.0, 11.0 / 255.0, 0.18];

/// The animated background: band, clusters, stars and the particle stream.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub clusters: Vec<GalaxyCluster>,
    pub stars: Vec<DistantStar>,
    pub particles: Vec<MicroParticle>,
    pub speed: f32,
    pub target_speed: f32,
    /// Frame counter driving the twinkle.
    pub time: f32,
}

impl Starfield {
    pub fn build(rng: &mut Rng, width: f32, height: f32) -> Self {
        Self {
            clusters: (0..CLUSTER_COUNT).map(|_| GalaxyCluster::new(rng, width, height)).collect(),
            stars: (0..STAR_COUNT).map(|_| DistantStar::new(rng, width, height)).collect(),
            particles: (0..PARTICLE_COUNT).map(|_| MicroParticle::new(rng)).collect(),
            speed: INITIAL_SPEED,
            target_speed: INITIAL_SPEED,
            time: 0.0,
        }
    }

    /// Advance one animation frame and return what to paint.
    pub fn frame(&mut self, rng: &mut Rng, width: f32, height: f32) -> IntroFrame {
        self.time += 1.0;
        self.speed += (self.target_speed - self.speed) * SPEED_EASE;

        let mut frame = IntroFrame::with_capacity(2 + STAR_COUNT + PARTICLE_COUNT * 3);
        frame.push(DrawOp::Fade { color: FADE });
        milky_way_band(&mut frame, width, height);

        for cluster in &mut self.clusters {
            cluster.update();
            cluster.draw(rng, &mut frame);
        }
        for star in &mut self.stars {
            star.update(self.time);
            star.draw(&mut frame);
        }
        let speed = self.speed;
        for particle in &mut self.particles {
            particle.update(rng, speed);
            particle.draw(&mut frame, speed, width, height);
        }
        frame
    }
}
