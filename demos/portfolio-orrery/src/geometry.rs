//! Procedural meshes and point clouds built once with the scene.

use cosmo_engine::{MeshData, PointVertex, Rng};
use std::f32::consts::{PI, TAU};

// ── Meshes ───────────────────────────────────────────────────────────

const TAIL_SEGMENTS_X: u32 = 32;
const TAIL_SEGMENTS_Y: u32 = 8;
/// Half-width left at the far end of a tail, as a fraction of the start.
const TAIL_END_WIDTH: f32 = 0.3;

/// Grid plane in XY centered on the origin, `width` along X and `height`
/// along Y, with V = 1 at the top edge. `shape` may move each vertex.
fn plane(width: f32, height: f32, gx: u32, gy: u32, shape: impl Fn(f32, f32) -> [f32; 3]) -> MeshData {
    let mut mesh = MeshData::default();
    for iy in 0..=gy {
        let y = height * 0.5 - iy as f32 * height / gy as f32;
        for ix in 0..=gx {
            let x = ix as f32 * width / gx as f32 - width * 0.5;
            let uv = [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32];
            mesh.push_vertex(shape(x, y), uv);
        }
    }
    let row = gx + 1;
    for iy in 0..gy {
        for ix in 0..gx {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Comet tail: a plane along X whose half-width shrinks linearly from full
/// at `x = -length/2` to 30% at `x = +length/2`.
pub fn tail_mesh(length: f32, width: f32) -> MeshData {
    plane(length, width, TAIL_SEGMENTS_X, TAIL_SEGMENTS_Y, |x, y| {
        let along = (x + length * 0.5) / length;
        [x, y * (1.0 - along * (1.0 - TAIL_END_WIDTH)), 0.0]
    })
}

/// Unit quad with its top edge on the origin, so the meteor head sits at the
/// node position and the streak trails along -Y.
pub fn meteor_quad() -> MeshData {
    plane(1.0, 1.0, 1, 1, |x, y| [x, y - 0.5, 0.0])
}

/// Flat annulus in XY. U runs from 0 at the inner edge to 1 at the outer
/// edge so a 1D strip texture maps radially.
pub fn ring_mesh(inner: f32, outer: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for radius in [inner, outer] {
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let pos = [radius * theta.cos(), radius * theta.sin(), 0.0];
            let u = (radius - inner) / (outer - inner);
            mesh.push_vertex(pos, [u, 0.0]);
        }
    }
    for i in 0..segments {
        let a = i;
        let b = i + segments + 1;
        let c = i + segments + 2;
        let d = i + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }
    mesh
}

// ── Point clouds ─────────────────────────────────────────────────────

/// Inner radius of the star shells; sizes shrink toward the outer edge.
const STAR_MIN_RADIUS: f32 = 500.0;
const STAR_RADIUS_SPAN: f32 = 19_500.0;

fn spherical(radius: f32, theta: f32, phi: f32) -> [f32; 3] {
    [
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    ]
}

fn star_color(rng: &mut Rng) -> [f32; 3] {
    let class = rng.next_f32();
    if class < 0.5 {
        [1.0, 1.0, 1.0]
    } else if class < 0.7 {
        [rng.range(0.85, 1.0), rng.range(0.9, 1.0), 1.0]
    } else if class < 0.85 {
        [1.0, rng.range(0.95, 1.0), rng.range(0.8, 1.0)]
    } else if class < 0.95 {
        [1.0, rng.range(0.8, 0.9), rng.range(0.5, 0.7)]
    } else {
        [1.0, rng.range(0.6, 0.8), rng.range(0.4, 0.6)]
    }
}

/// Background stars in three radial shells (30% near, 40% middle, 30% far).
/// 30% of them hug the galactic plane.
pub fn star_particles(rng: &mut Rng, count: usize) -> Vec<PointVertex> {
    let near = count * 3 / 10;
    let middle = count * 7 / 10;
    (0..count)
        .map(|i| {
            let radius = if i < near {
                rng.range(500.0, 5_500.0)
            } else if i < middle {
                rng.range(5_000.0, 15_000.0)
            } else {
                rng.range(15_000.0, 20_000.0)
            };
            let theta = rng.next_f32() * TAU;
            let mut phi = rng.next_f32() * PI;
            if rng.next_f32() < 0.3 {
                phi = PI / 2.0 + (rng.next_f32() - 0.5) * 0.3;
            }
            let color = star_color(rng);
            let distance_factor = 1.0 - (radius - STAR_MIN_RADIUS) / STAR_RADIUS_SPAN;
            let size = rng.range(0.5, 3.5) * (0.5 + distance_factor * 1.5);
            PointVertex { pos: spherical(radius, theta, phi), color, size }
        })
        .collect()
}

/// Faint white dust between 1000 and 20000 units.
pub fn dust_particles(rng: &mut Rng, count: usize) -> Vec<PointVertex> {
    (0..count)
        .map(|_| {
            let radius = rng.range(1_000.0, 20_000.0);
            let theta = rng.next_f32() * TAU;
            let phi = rng.next_f32() * PI;
            PointVertex { pos: spherical(radius, theta, phi), color: [1.0, 1.0, 1.0], size: 1.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_width_at(mesh: &MeshData, target_x: f32) -> f32 {
        (0..mesh.vertex_count())
            .map(|i| mesh.position(i))
            .filter(|p| (p[0] - target_x).abs() < 1e-3)
            .map(|p| p[1].abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn tail_tapers_to_thirty_percent() {
        let mesh = tail_mesh(20.0, 0.5);
        assert_eq!(mesh.vertex_count(), 33 * 9);
        assert_eq!(mesh.indices.len(), 32 * 8 * 6);
        assert!((half_width_at(&mesh, -10.0) - 0.25).abs() < 1e-4);
        assert!((half_width_at(&mesh, 10.0) - 0.075).abs() < 1e-4);
    }

    #[test]
    fn ring_uv_maps_radius() {
        let mesh = ring_mesh(4.8, 10.0, 256);
        assert_eq!(mesh.vertex_count(), 2 * 257);
        for i in 0..mesh.vertex_count() {
            let [x, y, _] = mesh.position(i);
            let r = (x * x + y * y).sqrt();
            let expected = (r - 4.8) / (10.0 - 4.8);
            assert!((mesh.uv(i)[0] - expected).abs() < 1e-4);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn meteor_quad_hangs_below_origin() {
        let mesh = meteor_quad();
        assert_eq!(mesh.vertex_count(), 4);
        let ys: Vec<f32> = (0..4).map(|i| mesh.position(i)[1]).collect();
        assert!(ys.iter().all(|&y| (-1.0..=0.0).contains(&y)));
        assert_eq!(mesh.indices, vec![0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn stars_stay_inside_the_backdrop() {
        let mut rng = Rng::new(1);
        let stars = star_particles(&mut rng, 2000);
        assert_eq!(stars.len(), 2000);
        for s in &stars {
            let r = (s.pos[0] * s.pos[0] + s.pos[1] * s.pos[1] + s.pos[2] * s.pos[2]).sqrt();
            assert!(r >= 499.0 && r <= 20_001.0);
            assert!(s.size > 0.0);
            assert!((0.85..=1.0).contains(&s.color[0]));
        }
    }

    #[test]
    fn dust_count_and_color() {
        let mut rng = Rng::new(2);
        let dust = dust_particles(&mut rng, 100);
        assert_eq!(dust.len(), 100);
        assert!(dust.iter().all(|p| p.color == [1.0, 1.0, 1.0]));
    }
}
