//! Vertex buffer and the fixed quad geometry used to sample the volume.
//!
//! Four screen quadrants, each a BiTri (two triangles forming one rectangle),
//! sample the volume at increasing texcoord Z so the quads read as cuts
//! through successive depths.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

/// Vertices per BiTri
pub const VERTICES_PER_BI_TRI: usize = 6;

/// Texcoord Z of each quad, in drawing order
pub const DEPTH_PLANES: [f32; 4] = [0.0, 0.33, 0.66, 1.0];

const LEFT: f32 = -2.75;
const RIGHT: f32 = 2.75;
const TOP: f32 = 1.75;
const BOTTOM: f32 = -1.75;
const MID_X: f32 = 0.0;
const MID_Y: f32 = 0.0;
const SPACING: f32 = 0.05;

/// One vertex as consumed by the device
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec4,
    pub tex_coord0: Vec4,
}

/// Host-side vertex storage.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
    tex_coord0_count: u32,
    linearized: bool,
}

impl VertexBuffer {
    /// Allocate `num_vertices` zeroed vertices with 2 texcoord components
    pub fn new(num_vertices: usize) -> Self {
        Self {
            vertices: vec![Vertex::zeroed(); num_vertices],
            tex_coord0_count: 2,
            linearized: false,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of texcoord 0 components the device should read (2..=4)
    pub fn tex_coord0_count(&self) -> u32 {
        self.tex_coord0_count
    }

    pub fn set_tex_coord0_count(&mut self, count: u32) {
        assert!((1..=4).contains(&count), "invalid texcoord component count {}", count);
        self.tex_coord0_count = count;
    }

    /// Define BiTri `index` covering the rectangle (left, top)-(right, bottom).
    ///
    /// Vertex order is (l,t) (r,t) (r,b) (l,t) (r,b) (l,b), at z = 0.
    ///
    /// # Panics
    ///
    /// Panics if the buffer has no room for BiTri `index`.
    pub fn define_bi_tri(&mut self, index: usize, left: f32, top: f32, right: f32, bottom: f32) {
        let start = index * VERTICES_PER_BI_TRI;
        assert!(start + VERTICES_PER_BI_TRI <= self.vertices.len(),
            "BiTri {} does not fit in {} vertices", index, self.vertices.len());

        let corners = [
            (left, top),
            (right, top),
            (right, bottom),
            (left, top),
            (right, bottom),
            (left, bottom),
        ];
        for (vertex, (x, y)) in self.vertices[start..start + VERTICES_PER_BI_TRI].iter_mut().zip(corners) {
            vertex.position = Vec4::new(x, y, 0.0, 1.0);
        }
    }

    /// Read access to all vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Write access to all vertices (the buffer "lock")
    pub fn lock(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Scale normalized texcoords U and V to texel units.
    pub fn linearize(&mut self, texture_width: f32, texture_height: f32) {
        for vertex in &mut self.vertices {
            vertex.tex_coord0.x *= texture_width;
            vertex.tex_coord0.y *= texture_height;
        }
        self.linearized = true;
    }

    pub fn is_linearized(&self) -> bool {
        self.linearized
    }

    /// Device byte layout of the vertices
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Texcoords of one BiTri at depth `p`, matching `define_bi_tri`'s order
fn set_bi_tri_tex_coords(vertices: &mut [Vertex], p: f32) {
    let uvs = [
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ];
    for (vertex, (u, v)) in vertices.iter_mut().zip(uvs) {
        vertex.tex_coord0 = Vec4::new(u, v, p, 0.0);
    }
}

/// Build the four-quadrant volume geometry.
///
/// Quads are top-left, top-right, bottom-left, bottom-right with a small gap
/// around the center, each at the matching entry of `DEPTH_PLANES`. The
/// buffer is linearized against the host's maximum texture size.
pub fn build_volume_geometry(max_texture_width: u32, max_texture_height: u32) -> VertexBuffer {
    let mut buffer = VertexBuffer::new(VERTICES_PER_BI_TRI * DEPTH_PLANES.len());
    buffer.set_tex_coord0_count(3);

    buffer.define_bi_tri(0, LEFT, TOP, MID_X - SPACING, MID_Y + SPACING);
    buffer.define_bi_tri(1, MID_X + SPACING, TOP, RIGHT, MID_Y + SPACING);
    buffer.define_bi_tri(2, LEFT, MID_Y - SPACING, MID_X - SPACING, BOTTOM);
    buffer.define_bi_tri(3, MID_X + SPACING, MID_Y - SPACING, RIGHT, BOTTOM);

    let vertices = buffer.lock();
    for (quad, plane) in vertices.chunks_exact_mut(VERTICES_PER_BI_TRI).zip(DEPTH_PLANES) {
        set_bi_tri_tex_coords(quad, plane);
    }

    buffer.linearize(max_texture_width as f32, max_texture_height as f32);
    buffer
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
