//! Static vertex data shared by the lesson programs.
//!
//! All arrays are tightly packed `f32` attributes; the layout of each one is
//! noted above it and matches a `VertexLayout` built by the lesson using it.

use glam::Vec3;

/// Two separate triangles side by side, positions only. Each inner array is
/// uploaded to its own buffer.
pub const TWO_TRIANGLES: [[f32; 9]; 2] = [
    [
        -0.5, 0.5, 0.0, // top
        -1.0, -0.5, 0.0, // left
        0.0, -0.5, 0.0, // right
    ],
    [
        0.5, 0.5, 0.0, // top
        0.0, -0.5, 0.0, // left
        1.0, -0.5, 0.0, // right
    ],
];

/// Corners of the triforce, positions only. Vertices 1 and 3 coincide so
/// each lower triangle keeps its own indices.
pub const TRIFORCE_VERTICES: [f32; 21] = [
    -1.0, -0.5, 0.0, // 0
    0.0, -0.5, 0.0, // 1
    -0.5, 0.5, 0.0, // 2
    0.0, -0.5, 0.0, // 3
    1.0, -0.5, 0.0, // 4
    0.5, 0.5, 0.0, // 5
    0.0, 1.5, 0.0, // 6, apex
];

pub const TRIFORCE_INDICES: [u32; 9] = [
    1, 0, 2, // left
    3, 4, 5, // right
    2, 5, 6, // top
];

/// The triforce spans three units vertically, so it is shrunk to fit clip space.
pub const TRIFORCE_SCALE: f32 = 0.6;

/// Position (3) + colour (3) per corner.
pub const COLOURED_QUAD_VERTICES: [f32; 24] = [
    0.5, -0.5, 0.0, 1.0, 0.0, 0.0, // bottom right
    -0.5, -0.5, 0.0, 0.0, 1.0, 0.0, // bottom left
    -0.5, 0.5, 0.0, 0.0, 0.0, 1.0, // top left
    0.5, 0.5, 0.0, 1.0, 1.0, 0.0, // top right
];

pub const COLOURED_QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Full-screen quad: position (3) + colour (3) + texture coordinates (2).
pub const TEXTURED_QUAD_VERTICES: [f32; 32] = [
    1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, // top right
    1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, // bottom right
    -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, // bottom left
    -1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, // top left
];

pub const TEXTURED_QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // top right, bottom right, top left
    1, 2, 3, // bottom right, bottom left, top left
];

/// Unit cube as 36 unindexed vertices: position (3) + texture coordinates (2).
#[rustfmt::skip]
pub const TEXTURED_CUBE_VERTICES: [f32; 180] = [
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,

    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,

     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

/// Unit cube as 36 unindexed vertices: position (3) + face normal (3).
#[rustfmt::skip]
pub const NORMAL_CUBE_VERTICES: [f32; 216] = [
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,  0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,  0.0,  0.0, -1.0,
    -0.5, -0.5, -0.5,  0.0,  0.0, -1.0,

    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5,  0.5,  0.5,  0.0,  0.0,  1.0,
    -0.5, -0.5,  0.5,  0.0,  0.0,  1.0,

    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5, -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5, -1.0,  0.0,  0.0,
    -0.5,  0.5,  0.5, -1.0,  0.0,  0.0,

     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,  1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,  1.0,  0.0,  0.0,
     0.5,  0.5,  0.5,  1.0,  0.0,  0.0,

    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5,  0.5,  0.0, -1.0,  0.0,
    -0.5, -0.5, -0.5,  0.0, -1.0,  0.0,

    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5,  0.5,  0.0,  1.0,  0.0,
    -0.5,  0.5, -0.5,  0.0,  1.0,  0.0,
];

/// World positions of the ten cubes in the 3D lessons.
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Multiplies every component, for shrinking position-only data.
pub fn scaled<const N: usize>(vertices: &[f32; N], factor: f32) -> [f32; N] {
    vertices.map(|v| v * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::VertexLayout;

    fn max_index(indices: &[u32]) -> u32 {
        indices.iter().copied().max().unwrap_or(0)
    }

    #[test]
    fn test_indices_stay_in_range() {
        let position = VertexLayout::new().attribute(3);
        assert!((max_index(&TRIFORCE_INDICES) as usize) < position.vertex_count(TRIFORCE_VERTICES.len()));

        let coloured = VertexLayout::new().attribute(3).attribute(3);
        assert!(
            (max_index(&COLOURED_QUAD_INDICES) as usize)
                < coloured.vertex_count(COLOURED_QUAD_VERTICES.len())
        );

        let textured = VertexLayout::new().attribute(3).attribute(3).attribute(2);
        assert!(
            (max_index(&TEXTURED_QUAD_INDICES) as usize)
                < textured.vertex_count(TEXTURED_QUAD_VERTICES.len())
        );
    }

    #[test]
    fn test_cubes_have_36_vertices() {
        let textured = VertexLayout::new().attribute(3).attribute(2);
        assert_eq!(textured.vertex_count(TEXTURED_CUBE_VERTICES.len()), 36);

        let lit = VertexLayout::new().attribute(3).attribute(3);
        assert_eq!(lit.vertex_count(NORMAL_CUBE_VERTICES.len()), 36);
    }

    #[test]
    fn test_cube_normals_are_unit_and_outward() {
        for vertex in NORMAL_CUBE_VERTICES.chunks_exact(6) {
            let position = Vec3::new(vertex[0], vertex[1], vertex[2]);
            let normal = Vec3::new(vertex[3], vertex[4], vertex[5]);
            assert_eq!(normal.length(), 1.0);
            // Each corner sits on the face its normal points out of.
            assert_eq!(position.dot(normal), 0.5);
        }
    }

    #[test]
    fn test_texture_coordinates_in_unit_range() {
        for vertex in TEXTURED_CUBE_VERTICES.chunks_exact(5) {
            assert!((0.0..=1.0).contains(&vertex[3]));
            assert!((0.0..=1.0).contains(&vertex[4]));
        }
    }

    #[test]
    fn test_scaled_triforce_fits_clip_space() {
        let triforce = scaled(&TRIFORCE_VERTICES, TRIFORCE_SCALE);
        assert!(triforce.iter().all(|v| (-1.0..=1.0).contains(v)));
        approx::assert_relative_eq!(triforce[19], 0.9, epsilon = 1e-6);
    }
}
