//! Flat vertex/index buffers handed to the renderer once per frame

use crate::engine::Particle;
use glam::Vec2;

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

/// Two triangles sharing the top-right/bottom-left diagonal, relative to the
/// first vertex of a quad
pub const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 2, 3, 0];

/// Quads for every live particle.
///
/// `vertices` holds `x, y` pairs. Each particle contributes its corners in
/// the order top-right, top-left, bottom-left, bottom-right. `indices` holds
/// six entries per particle pointing into those four corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGeometry {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl RenderGeometry {
    pub fn from_particles(particles: &[Particle], half_extent: f32) -> Self {
        let mut vertices = Vec::with_capacity(particles.len() * VERTICES_PER_QUAD * 2);
        let mut indices = Vec::with_capacity(particles.len() * INDICES_PER_QUAD);

        for (i, particle) in particles.iter().enumerate() {
            let Vec2 { x, y } = particle.pos;
            vertices.extend_from_slice(&[
                x + half_extent,
                y + half_extent,
                x - half_extent,
                y + half_extent,
                x - half_extent,
                y - half_extent,
                x + half_extent,
                y - half_extent,
            ]);

            let base = (i * VERTICES_PER_QUAD) as u32;
            indices.extend(QUAD_INDICES.iter().map(|offset| base + offset));
        }

        Self { vertices, indices }
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / INDICES_PER_QUAD
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertices as points
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
    }
}
