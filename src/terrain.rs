//! Mountain valley terrain with analytic, time-driven elevation.
//!
//! The grid never moves: ridges flow toward the camera because their phase
//! depends on elapsed time, so the patch needs no recycling.

use bytemuck::{Pod, Zeroable};

use crate::params::TerrainShape;

/// Vertex data for terrain and prop meshes (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Ridge noise terms: (weight, frequency along v, frequency along u)
const RIDGES: [(f32, f32, f32); 2] = [(0.65, 17.0, 5.0), (0.35, 37.0, -13.0)];

/// Terrain elevation at normalized grid coordinate `(u, v)` and time `t`
///
/// `u` runs across the travel axis (0.5 = centerline), `v` along it
/// (0 = nearest the camera). Zero inside the central road band, rising as
/// a power curve beyond it, modulated by traveling ridge noise that
/// vanishes at the band edge so the surface stays continuous.
pub fn elevation(shape: &TerrainShape, u: f32, v: f32, t: f32) -> f32 {
    let distance = (u - 0.5).abs() * 2.0;
    if distance <= shape.road_half_width {
        return 0.0;
    }

    let wall = ((distance - shape.road_half_width) / (1.0 - shape.road_half_width)).min(1.0);
    let travel = v + shape.flow_per_s * t;
    let noise: f32 = RIDGES
        .iter()
        .map(|&(weight, freq_v, freq_u)| weight * (travel * freq_v + u * freq_u).sin())
        .sum();

    shape.peak_height_m * wall.powf(shape.profile_power) * (1.0 + shape.noise_strength * noise)
}

/// Terrain grid mesh re-evaluated every frame
pub struct TerrainPatch {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    shape: TerrainShape,
}

impl TerrainPatch {
    /// Create a flat grid with the shape's resolution and extent
    pub fn new(shape: TerrainShape) -> Self {
        let segments = shape.segments;
        let mut vertices = Vec::with_capacity((segments + 1).pow(2));
        let mut indices = Vec::with_capacity(segments.pow(2) * 6);

        // Rows march away from the camera (toward -z)
        for row in 0..=segments {
            for col in 0..=segments {
                let u = col as f32 / segments as f32;
                let v = row as f32 / segments as f32;
                let x = (u - 0.5) * shape.width_m;
                let z = shape.near_z - v * shape.depth_m;

                vertices.push(Vertex {
                    position: [x, 0.0, z],
                    uv: [u, v],
                });
            }
        }

        // Generate triangle indices
        for row in 0..segments {
            for col in 0..segments {
                let top_left = (row * (segments + 1) + col) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((row + 1) * (segments + 1) + col) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        let mut patch = Self {
            vertices,
            indices,
            shape,
        };
        patch.update(0.0);
        patch
    }

    /// Recompute every vertex elevation for elapsed time `time_s`
    pub fn update(&mut self, time_s: f32) {
        for vertex in &mut self.vertices {
            let [u, v] = vertex.uv;
            vertex.position[1] = elevation(&self.shape, u, v, time_s);
        }
    }

    pub fn shape(&self) -> &TerrainShape {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_grid_creation() {
        let shape = TerrainShape::default();
        let patch = TerrainPatch::new(shape.clone());

        // Check vertex count: (segments + 1)^2
        assert_eq!(patch.vertices.len(), 65 * 65);

        // Check triangle count: segments^2 * 2 triangles * 3 indices
        assert_eq!(patch.indices.len(), shape.segments.pow(2) * 6);
        assert!(patch
            .indices
            .iter()
            .all(|&i| (i as usize) < patch.vertices.len()));
    }

    #[test]
    fn test_road_band_is_flat() {
        let shape = TerrainShape::default();
        for step in 0..=20 {
            let u = 0.5 + (step as f32 / 20.0 - 0.5) * shape.road_half_width * 0.99;
            for t in [0.0, 1.7, 250.0] {
                assert_eq!(elevation(&shape, u, 0.3, t), 0.0);
            }
        }
    }

    #[test]
    fn test_continuous_at_road_edge() {
        let shape = TerrainShape::default();
        let edge_u = 0.5 + shape.road_half_width / 2.0;
        let mut previous = f32::MAX;
        for exponent in 1..7 {
            let eps = 10f32.powi(-exponent);
            let height = elevation(&shape, edge_u + eps, 0.42, 3.3);
            assert!(height >= 0.0);
            assert!(height <= previous);
            previous = height;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_never_below_ground() {
        let shape = TerrainShape::default();
        for i in 0..=50 {
            for j in 0..=10 {
                let h = elevation(&shape, i as f32 / 50.0, j as f32 / 10.0, i as f32 * 0.37);
                assert!(h >= 0.0);
                assert!(h <= shape.peak_height_m * (1.0 + shape.noise_strength) + 1e-3);
            }
        }
    }

    #[test]
    fn test_ridges_flow_toward_camera() {
        // A ridge seen at v now is seen at v - flow*dt after dt seconds
        let shape = TerrainShape::default();
        let dt = 0.5;
        let later = elevation(&shape, 0.9, 0.5 - shape.flow_per_s * dt, dt);
        let now = elevation(&shape, 0.9, 0.5, 0.0);
        assert!((later - now).abs() < 1e-3);
    }

    #[test]
    fn test_update_matches_pure_function() {
        let mut patch = TerrainPatch::new(TerrainShape::default());
        patch.update(12.5);
        for vertex in patch.vertices.iter().step_by(97) {
            let [u, v] = vertex.uv;
            assert_eq!(vertex.position[1], elevation(patch.shape(), u, v, 12.5));
        }
    }
}
