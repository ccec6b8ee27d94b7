//! Edge type and related structures.
//!
//! Edges are curved connectors between two nodes. Each edge has:
//! - A stable identifier (its index among the built edges)
//! - Start and end node IDs plus their resolved positions
//! - A curvature offset from the document
//! - Line style, color and width for the host renderer

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::handle::RenderHandle;
use super::node::NodeId;

/// Stable edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EdgeId> for u32 {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.0
    }
}

/// Stroke pattern of a connector line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Numeric code for the host API.
    pub fn code(self) -> u8 {
        match self {
            LineStyle::Solid => 0,
            LineStyle::Dashed => 1,
            LineStyle::Dotted => 2,
        }
    }

    /// `(dash, gap)` lengths for dashed line materials; `None` when solid.
    pub fn dash_pattern(self) -> Option<(f32, f32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((0.5, 0.3)),
            LineStyle::Dotted => Some((0.1, 0.2)),
        }
    }
}

/// Palettes and geometry settings for connectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeStyle {
    /// Styles an edge may be drawn with, picked per edge.
    pub line_styles: Vec<LineStyle>,
    /// Colors (0xRRGGBB) an edge may be drawn with, picked per edge.
    pub colors: Vec<u32>,
    pub width: f32,
    /// Added to the document offset to give the curve control point height.
    pub base_curve_height: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            line_styles: vec![LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted],
            colors: vec![0x0000ff, 0x00ff00, 0xff0000],
            width: 3.0,
            base_curve_height: 2.0,
        }
    }
}

/// Renderable connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,
    pub start_position: Vec3,
    pub end_position: Vec3,
    pub offset: f32,
    pub curve_height: f32,
    pub line_style: LineStyle,
    pub color: u32,
    pub width: f32,
    pub handle: RenderHandle,
}

/// Edge state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeState {
    flags: u8,
}

impl EdgeState {
    const HIGHLIGHTED: u8 = 0b0000_0001;

    /// Create a new default edge state.
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Check if the edge touches the current selection.
    #[inline]
    pub fn is_highlighted(self) -> bool {
        self.flags & Self::HIGHLIGHTED != 0
    }

    #[inline]
    pub fn set_highlighted(&mut self, highlighted: bool) {
        if highlighted {
            self.flags |= Self::HIGHLIGHTED;
        } else {
            self.flags &= !Self::HIGHLIGHTED;
        }
    }
}
