//! Bounding Volume Hierarchy (BVH) over the faces of one mesh.
//!
//! Nodes live in a flat array with the root at index 0. The two children of
//! an internal node are stored next to each other, and each leaf owns a
//! contiguous run of a face-index permutation held by the BVH itself. The
//! mesh is only borrowed, at build and at query time.

use std::time::Instant;

use glint_core::Mesh;
use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::triangle::intersect_face;
use crate::{BvhConfig, Hit};

/// What a node holds besides its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Faces `faces[first_face..first_face + count]` of the BVH permutation.
    Leaf { first_face: u32, count: u32 },
    /// Children at `first_child` and `first_child + 1`.
    Internal { first_child: u32 },
}

/// A BVH node.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub bounds: Aabb,
    pub kind: NodeKind,
}

impl Node {
    const PENDING: Node = Node {
        bounds: Aabb::EMPTY,
        kind: NodeKind::Leaf {
            first_face: 0,
            count: 0,
        },
    };
}

/// A read-only binary tree of bounding boxes over a mesh's faces.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<Node>,
    faces: Vec<u32>,
}

/// Counters gathered while building.
#[derive(Debug, Default)]
struct BuildStats {
    leaves: usize,
    depth: u32,
    degenerate_splits: usize,
}

struct Builder<'m> {
    mesh: &'m Mesh,
    faces: Vec<u32>,
    centroids: Vec<Vec3>,
    nodes: Vec<Node>,
    target_leaf_size: usize,
    max_depth: u32,
    stats: BuildStats,
}

impl Bvh {
    /// Build a BVH over every face of `mesh`.
    ///
    /// A node becomes a leaf once it holds at most `target_leaf_size` faces,
    /// reaches `max_depth`, or cannot be split because every face centroid
    /// falls on the same side of the midpoint of its longest axis.
    pub fn build(mesh: &Mesh, target_leaf_size: usize, max_depth: u32) -> Self {
        let start = Instant::now();
        let face_count = mesh.face_count();

        let mut builder = Builder {
            mesh,
            faces: (0..face_count as u32).collect(),
            centroids: (0..face_count).map(|f| mesh.face_centroid(f)).collect(),
            nodes: Vec::with_capacity(node_capacity_hint(face_count, target_leaf_size, max_depth)),
            target_leaf_size: target_leaf_size.max(1),
            max_depth,
            stats: BuildStats::default(),
        };

        builder.nodes.push(Node::PENDING);
        builder.build_node(0, 0, face_count, 0);

        let Builder {
            faces, nodes, stats, ..
        } = builder;

        log::info!(
            "BVH built: {} faces, {} nodes, {} leaves, depth {} in {:.2?}",
            face_count,
            nodes.len(),
            stats.leaves,
            stats.depth,
            start.elapsed()
        );
        if stats.degenerate_splits > 0 {
            log::debug!(
                "BVH: {} degenerate splits forced into leaves",
                stats.degenerate_splits
            );
        }

        Self { nodes, faces }
    }

    /// Build with the leaf size and depth limit of `config`.
    pub fn with_config(mesh: &Mesh, config: &BvhConfig) -> Self {
        Self::build(mesh, config.target_leaf_size, config.max_depth)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The face-index permutation that leaves point into.
    pub fn face_order(&self) -> &[u32] {
        &self.faces
    }

    pub fn bounds(&self) -> Aabb {
        self.nodes[0].bounds
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf { .. }))
            .count()
    }

    /// Find the nearest face of `mesh` hit by `ray`, updating `hit` in place.
    ///
    /// `mesh` must be the mesh the BVH was built from. Returns true when
    /// `hit` was improved.
    pub fn intersect(&self, mesh: &Mesh, ray: &Ray, hit: &mut Hit<'_>) -> bool {
        let span = self.nodes[0].bounds.intersect(ray);
        if !span.is_forward_hit() || span.min >= hit.t {
            return false;
        }
        self.traverse(0, mesh, ray, hit, true)
    }

    /// Visit the subtree at `node_id`, children nearest first when
    /// `near_first` is set.
    fn traverse(
        &self,
        node_id: usize,
        mesh: &Mesh,
        ray: &Ray,
        hit: &mut Hit<'_>,
        near_first: bool,
    ) -> bool {
        match self.nodes[node_id].kind {
            NodeKind::Leaf { first_face, count } => {
                let first = first_face as usize;
                let mut found = false;
                for &face in &self.faces[first..first + count as usize] {
                    found |= intersect_face(mesh, face as usize, ray, hit);
                }
                found
            }
            NodeKind::Internal { first_child } => {
                let a = first_child as usize;
                let b = a + 1;
                let span_a = self.nodes[a].bounds.intersect(ray);
                let span_b = self.nodes[b].bounds.intersect(ray);

                let a_first = (span_a.min <= span_b.min) == near_first;
                let order = if a_first {
                    [(a, span_a), (b, span_b)]
                } else {
                    [(b, span_b), (a, span_a)]
                };

                let mut found = false;
                for (child, span) in order {
                    // Re-checked against hit.t after the first child
                    if should_descend(&span, hit.t) {
                        found |= self.traverse(child, mesh, ray, hit, near_first);
                    }
                }
                found
            }
        }
    }
}

/// A child is worth visiting when its box is entered ahead of the ray, before
/// the current best hit, at a finite distance.
#[inline]
fn should_descend(span: &Interval, best_t: f32) -> bool {
    span.min.is_finite() && span.is_forward_hit() && span.min < best_t
}

/// Expected node count: a full tree down to `target_leaf_size`, capped by the
/// depth limit. Only a capacity hint.
fn node_capacity_hint(face_count: usize, target_leaf_size: usize, max_depth: u32) -> usize {
    let by_depth = 1usize
        .checked_shl(max_depth.saturating_add(1))
        .map_or(usize::MAX, |n| n - 1);

    let leaves = (face_count as f64 / target_leaf_size.max(1) as f64).max(1.0);
    let levels = (leaves.log2().ceil() as u32).min(40);
    let by_faces = (1usize << (levels + 1)) - 1;

    by_depth.min(by_faces)
}

impl<'m> Builder<'m> {
    fn build_node(&mut self, node_id: usize, start: usize, end: usize, depth: u32) {
        let mesh = self.mesh;
        let bounds = self.faces[start..end]
            .iter()
            .flat_map(|&face| mesh.face_positions(face as usize))
            .fold(Aabb::EMPTY, |aabb, p| aabb.extend(p));

        self.nodes[node_id].bounds = bounds;
        self.stats.depth = self.stats.depth.max(depth);

        if end - start <= self.target_leaf_size || depth >= self.max_depth {
            self.make_leaf(node_id, start, end);
            return;
        }

        let axis = bounds.longest_axis();
        let split = bounds.axis_interval(axis).center();
        let mid = start
            + partition(
                &mut self.faces[start..end],
                &mut self.centroids[start..end],
                axis,
                split,
            );

        if mid == start || mid == end {
            self.stats.degenerate_splits += 1;
            self.make_leaf(node_id, start, end);
            return;
        }

        let first_child = self.nodes.len();
        self.nodes.push(Node::PENDING);
        self.nodes.push(Node::PENDING);
        self.nodes[node_id].kind = NodeKind::Internal {
            first_child: first_child as u32,
        };

        self.build_node(first_child, start, mid, depth + 1);
        self.build_node(first_child + 1, mid, end, depth + 1);
    }

    fn make_leaf(&mut self, node_id: usize, start: usize, end: usize) {
        self.nodes[node_id].kind = NodeKind::Leaf {
            first_face: start as u32,
            count: (end - start) as u32,
        };
        self.stats.leaves += 1;
    }
}

/// Reorder `faces` and `centroids` together so that every face whose centroid
/// lies below `split` on `axis` comes first. Returns the number of such
/// faces.
pub fn partition(faces: &mut [u32], centroids: &mut [Vec3], axis: usize, split: f32) -> usize {
    debug_assert_eq!(faces.len(), centroids.len());

    let mut lo = 0;
    let mut hi = faces.len();
    while lo < hi {
        if centroids[lo][axis] < split {
            lo += 1;
        } else {
            hi -= 1;
            faces.swap(lo, hi);
            centroids.swap(lo, hi);
        }
    }
    lo
}
