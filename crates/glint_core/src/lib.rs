//! Glint Core - scene data for the glint raytracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh` with OFF/OBJ loading and procedural proxies
//! - **Shading inputs**: `Material` (with optional surface textures), `Light`, `Texture`
//! - **Placement**: `Transform` (scale, rotation, translation)
//!
//! # Example
//!
//! ```ignore
//! use glint_core::Mesh;
//!
//! let mut mesh = Mesh::load_or_empty("data/tw.off");
//! mesh.make_unitary();
//! println!("{} faces", mesh.face_count());
//! ```

pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod procedural;
pub mod texture;
pub mod transform;

/// Linear RGB radiance or reflectance.
pub type Color = glint_math::Vec3;

// Re-export commonly used types
pub use light::{AreaLight, Light, LightSample};
pub use loader::parse_off;
pub use material::{Material, Reflectance, SurfaceTexture, TextureMode};
pub use mesh::{Face, Mesh, MeshError, MeshResult, Vertex};
pub use texture::{Texture, TextureError, TextureResult};
pub use transform::Transform;
