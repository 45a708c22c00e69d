//! Tracing, BVH and render settings.
//!
//! All sections deserialize from JSON with every field optional; missing
//! fields take the defaults below.

use glint_core::Color;
use glint_math::Vec3;
use serde::Deserialize;

/// Integrator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Rays at this recursion depth or deeper contribute nothing
    pub max_recursion: u32,
    /// Rays attenuated below this contribute nothing
    pub min_beta: f32,
    /// Scale applied to a material's ambient color
    pub ambient_factor: f32,
    /// Offset along the normal for shadow and reflection ray origins
    pub ray_epsilon: f32,
    /// Area light samples along its two tangent axes
    pub area_light_grid: [u32; 2],
    /// Radiance of primary rays that hit nothing
    pub background: Color,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_recursion: 8,
            min_beta: 0.1,
            ambient_factor: 0.1,
            ray_epsilon: 1e-4,
            area_light_grid: [4, 4],
            background: Vec3::splat(0.2),
        }
    }
}

/// Mesh BVH construction settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// Nodes with at most this many faces become leaves
    pub target_leaf_size: usize,
    /// Nodes at this depth become leaves regardless of size
    pub max_depth: u32,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            target_leaf_size: 10,
            max_depth: 100,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub trace: TraceConfig,
    pub bvh: BvhConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            trace: TraceConfig::default(),
            bvh: BvhConfig::default(),
        }
    }
}
