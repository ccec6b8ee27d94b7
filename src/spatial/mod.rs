//! Spatial indexing for O(log n) picking.
//!
//! This module provides an R-tree based spatial index over node boxes for
//! ray picking and nearest-neighbor queries.

mod rtree;

pub use rtree::{NodeBox, SpatialIndex};
