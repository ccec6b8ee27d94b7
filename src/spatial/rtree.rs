//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Ray picking (nearest node box hit by a ray)
//! - Nearest neighbor within a distance

use glam::Vec3;
use rstar::{AABB, PointDistance, RTree, RTreeObject, SelectionFunction};

use crate::geometry::Ray;
use crate::graph::NodeId;

/// A node's bounding box in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// The node identifier.
    pub id: NodeId,
    /// Box center (the node position).
    pub center: [f32; 3],
    /// Half of the box edge length.
    pub half_extent: f32,
}

impl NodeBox {
    /// Create a new NodeBox.
    pub fn new(id: NodeId, center: Vec3, half_extent: f32) -> Self {
        Self {
            id,
            center: center.to_array(),
            half_extent,
        }
    }

    fn min(&self) -> Vec3 {
        Vec3::from_array(self.center) - Vec3::splat(self.half_extent)
    }

    fn max(&self) -> Vec3 {
        Vec3::from_array(self.center) + Vec3::splat(self.half_extent)
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min().to_array(), self.max().to_array())
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        Vec3::from_array(self.center).distance_squared(Vec3::from_array(*point))
    }

    fn contains_point(&self, point: &[f32; 3]) -> bool {
        let p = Vec3::from_array(*point);
        p.cmpge(self.min()).all() && p.cmple(self.max()).all()
    }
}

/// Descends only into subtrees whose envelope the ray crosses.
struct RayHits {
    ray: Ray,
}

impl SelectionFunction<NodeBox> for RayHits {
    fn should_unpack_parent(&self, envelope: &AABB<[f32; 3]>) -> bool {
        self.ray
            .intersect_aabb(
                Vec3::from_array(envelope.lower()),
                Vec3::from_array(envelope.upper()),
            )
            .is_some()
    }

    fn should_unpack_leaf(&self, leaf: &NodeBox) -> bool {
        self.ray.intersect_aabb(leaf.min(), leaf.max()).is_some()
    }
}

/// Spatial index for scene nodes.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<NodeBox>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a node into the index.
    pub fn insert(&mut self, id: NodeId, center: Vec3, half_extent: f32) {
        self.tree.insert(NodeBox::new(id, center, half_extent));
    }

    /// The node whose box the ray enters first, with the entry distance.
    pub fn pick(&self, ray: &Ray) -> Option<(NodeId, f32)> {
        self.tree
            .locate_with_selection_function(RayHits { ray: *ray })
            .filter_map(|node| {
                ray.intersect_aabb(node.min(), node.max())
                    .map(|distance| (node.id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }

    /// Find the nearest node center within a maximum distance.
    pub fn nearest_within(&self, point: Vec3, max_distance: f32) -> Option<NodeId> {
        let max_distance_sq = max_distance * max_distance;
        let query = point.to_array();
        self.tree
            .nearest_neighbor(&query)
            .filter(|node| node.distance_2(&query) <= max_distance_sq)
            .map(|node| node.id)
    }

    /// Rebuild the index from a set of boxes.
    ///
    /// This is more efficient than incremental inserts for bulk updates.
    pub fn rebuild(&mut self, boxes: Vec<NodeBox>) {
        self.tree = RTree::bulk_load(boxes);
    }

    /// Clear all nodes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
