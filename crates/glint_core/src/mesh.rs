//! Indexed triangle mesh representation.
//!
//! A mesh is an ordered list of vertices (position, normal, texture
//! coordinate) and an ordered list of triangular faces indexing into it.
//! Every face index is validated once when the mesh is built, so intersection
//! code can index vertices without re-checking.

use glint_math::{Aabb, Vec2, Vec3};
use thiserror::Error;

/// Errors that can occur while building or loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported mesh extension: '{0}'")]
    UnsupportedExtension(String),

    #[error("Malformed OFF file: {0}")]
    MalformedOff(String),

    #[error("OBJ parse error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// Three vertex indices, counter-clockwise when seen from the front.
pub type Face = [u32; 3];

/// A mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    /// Vertex with a zero normal and texture coordinate.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            texcoord: Vec2::ZERO,
        }
    }
}

/// An indexed triangle set with cached bounds.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    bounds: Aabb,
}

impl Mesh {
    /// Build a mesh, rejecting any face that indexes past the vertex list.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> MeshResult<Self> {
        let vertex_count = vertices.len();

        for (face_id, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face: face_id,
                    index,
                    vertex_count,
                });
            }
        }

        let bounds = Aabb::enclosing(vertices.iter().map(|v| v.position));
        Ok(Self {
            vertices,
            faces,
            bounds,
        })
    }

    /// Build a mesh from bare positions and compute smooth normals.
    pub fn from_positions(positions: &[Vec3], faces: Vec<Face>) -> MeshResult<Self> {
        let vertices = positions.iter().map(|&p| Vertex::new(p)).collect();
        let mut mesh = Self::new(vertices, faces)?;
        mesh.compute_normals();
        Ok(mesh)
    }

    /// A mesh without vertices or faces. Its bounds are the null box, so it
    /// never intersects anything.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            bounds: Aabb::EMPTY,
        }
    }

    /// True when the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Tight axis-aligned bounds of all vertex positions.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The three vertices of a face.
    #[inline]
    pub fn face_vertices(&self, face_id: usize) -> [&Vertex; 3] {
        self.faces[face_id].map(|i| &self.vertices[i as usize])
    }

    /// The three corner positions of a face.
    #[inline]
    pub fn face_positions(&self, face_id: usize) -> [Vec3; 3] {
        self.faces[face_id].map(|i| self.vertices[i as usize].position)
    }

    /// Average of the three corner positions of a face.
    pub fn face_centroid(&self, face_id: usize) -> Vec3 {
        let [p0, p1, p2] = self.face_positions(face_id);
        (p0 + p1 + p2) / 3.0
    }

    /// Replace vertex normals with the normalized sum of the unit normals of
    /// every adjacent face.
    ///
    /// Vertices that belong to no face (or only to degenerate faces) end up
    /// with a zero normal.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for face in &self.faces {
            let [p0, p1, p2] = face.map(|i| self.vertices[i as usize].position);
            let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

            for &i in face {
                normals[i as usize] += face_normal;
            }
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.normalize_or_zero();
        }
    }

    /// Recentre the mesh on the origin and scale it uniformly so its largest
    /// extent is 1.
    pub fn make_unitary(&mut self) {
        if self.bounds.is_empty() {
            return;
        }

        let center = self.bounds.centroid();
        let extent = self.bounds.size().max_element();
        let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };

        for vertex in &mut self.vertices {
            vertex.position = (vertex.position - center) * scale;
        }

        self.bounds = Aabb::enclosing(self.vertices.iter().map(|v| v.position));
    }
}
