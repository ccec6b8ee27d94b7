//! Node type and related structures.
//!
//! Nodes are the points of the network. Each node has:
//! - A stable identifier (its index in the source document)
//! - Position (x, y, z) in scene space
//! - A render style and a handle naming its host-side mesh
//! - Interaction state (hovered, selected, highlighted)

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::handle::RenderHandle;

/// Stable node identifier.
///
/// Equal to the node's index in the document it was built from, so edge
/// records resolve directly against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Mesh shape the host should build for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
    #[default]
    Cube,
    Sphere,
}

/// Render style shared by all nodes of a load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyle {
    pub shape: NodeShape,
    /// Edge length of the cube (or diameter of the sphere).
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            shape: NodeShape::Cube,
            size: 1.2,
            color: 0xff4500,
        }
    }
}

impl NodeStyle {
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size * 0.5
    }
}

/// Renderable node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Vec3,
    pub style: NodeStyle,
    pub handle: RenderHandle,
}

/// Node state flags packed into a single byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    flags: u8,
}

impl NodeState {
    const HIGHLIGHTED: u8 = 0b0000_0001;
    const SELECTED: u8 = 0b0000_0010;
    const HOVERED: u8 = 0b0000_0100;

    /// Create a new default node state.
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Check if the node is highlighted as a neighbour of the selection.
    #[inline]
    pub fn is_highlighted(self) -> bool {
        self.flags & Self::HIGHLIGHTED != 0
    }

    #[inline]
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.set(Self::HIGHLIGHTED, highlighted);
    }

    /// Check if the node is selected.
    #[inline]
    pub fn is_selected(self) -> bool {
        self.flags & Self::SELECTED != 0
    }

    #[inline]
    pub fn set_selected(&mut self, selected: bool) {
        self.set(Self::SELECTED, selected);
    }

    /// Check if the node is hovered.
    #[inline]
    pub fn is_hovered(self) -> bool {
        self.flags & Self::HOVERED != 0
    }

    #[inline]
    pub fn set_hovered(&mut self, hovered: bool) {
        self.set(Self::HOVERED, hovered);
    }

    #[inline]
    fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}
