//! Procedural meshes.

use glint_math::Vec3;

use crate::mesh::{Face, Mesh};

const ICO_X: f32 = 0.525_731_1;
const ICO_Z: f32 = 0.850_650_8;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-ICO_X, 0.0, ICO_Z],
    [ICO_X, 0.0, ICO_Z],
    [-ICO_X, 0.0, -ICO_Z],
    [ICO_X, 0.0, -ICO_Z],
    [0.0, ICO_Z, ICO_X],
    [0.0, ICO_Z, -ICO_X],
    [0.0, -ICO_Z, ICO_X],
    [0.0, -ICO_Z, -ICO_X],
    [ICO_Z, ICO_X, 0.0],
    [-ICO_Z, ICO_X, 0.0],
    [ICO_Z, -ICO_X, 0.0],
    [-ICO_Z, -ICO_X, 0.0],
];

// Counter-clockwise seen from outside.
const ICOSAHEDRON_FACES: [Face; 20] = [
    [0, 1, 4],
    [0, 4, 9],
    [9, 4, 5],
    [4, 8, 5],
    [4, 1, 8],
    [8, 1, 10],
    [8, 10, 3],
    [5, 8, 3],
    [5, 3, 2],
    [2, 3, 7],
    [7, 3, 10],
    [7, 10, 6],
    [7, 6, 11],
    [11, 6, 0],
    [0, 6, 1],
    [6, 10, 1],
    [9, 11, 0],
    [9, 2, 11],
    [9, 5, 2],
    [7, 11, 2],
];

impl Mesh {
    /// A regular icosahedron inscribed in a sphere of `radius` around the
    /// origin.
    pub fn icosahedron(radius: f32) -> Mesh {
        let positions: Vec<Vec3> = ICOSAHEDRON_VERTICES
            .iter()
            .map(|&p| Vec3::from(p) * radius)
            .collect();

        Mesh::from_positions(&positions, ICOSAHEDRON_FACES.to_vec())
            .unwrap_or_else(|_| Mesh::empty())
    }
}
