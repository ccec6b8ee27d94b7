//! The on-disk network document.
//!
//! ```json
//! { "nodes": [{ "x": 0, "y": 0, "z": 0 }], "edges": [{ "start": 0, "end": 1, "offset": 0.5 }] }
//! ```
//!
//! Edge endpoints are indices into `nodes`. Nothing here checks them; the
//! view model builder decides what to do with dangling references.

use serde::{Deserialize, Serialize};

/// A single node coordinate triple.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl NodeRecord {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// An edge referencing two nodes by index, with a curvature offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub offset: f32,
}

impl EdgeRecord {
    #[inline]
    pub fn new(start: u32, end: u32, offset: f32) -> Self {
        Self { start, end, offset }
    }
}

/// Parsed network document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl NetworkDocument {
    /// The document every failed load collapses to.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// First value that is infinite or NaN, as `(field, index)`.
    ///
    /// JSON numbers beyond the f32 range deserialize to infinity.
    pub fn first_non_finite(&self) -> Option<(&'static str, usize)> {
        if let Some(i) = self
            .nodes
            .iter()
            .position(|n| !n.to_array().iter().all(|c| c.is_finite()))
        {
            return Some(("nodes", i));
        }
        self.edges
            .iter()
            .position(|e| !e.offset.is_finite())
            .map(|i| ("edges", i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "nodes": [{"x": 0, "y": 0, "z": 0}, {"x": 1.5, "y": -2, "z": 3}],
            "edges": [{"start": 0, "end": 1, "offset": 0.25}]
        }"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[1], NodeRecord::new(1.5, -2.0, 3.0));
        assert_eq!(doc.edges, vec![EdgeRecord::new(0, 1, 0.25)]);
    }

    #[test]
    fn test_out_of_range_numbers_are_non_finite() {
        let json = r#"{
            "nodes": [{"x": 0, "y": 0, "z": 0}, {"x": 1e39, "y": 0, "z": 0}],
            "edges": [{"start": 0, "end": 1, "offset": 0}]
        }"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.first_non_finite(), Some(("nodes", 1)));

        let json = r#"{"nodes": [], "edges": [{"start": 0, "end": 1, "offset": 0}, {"start": 0, "end": 1, "offset": -1e40}]}"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.first_non_finite(), Some(("edges", 1)));

        assert_eq!(NetworkDocument::empty().first_non_finite(), None);
    }

    #[test]
    fn test_missing_offset_defaults_to_zero() {
        let json = r#"{"nodes": [], "edges": [{"start": 3, "end": 4}]}"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.edges[0].offset, 0.0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let json = r#"{"nodes": [{"x": 1, "y": 2, "z": 3, "name": "a"}], "meta": {"v": 1}}"#;
        let doc: NetworkDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.nodes[0].to_array(), [1.0, 2.0, 3.0]);
        assert!(doc.edges.is_empty());
    }

    #[test]
    fn test_empty() {
        assert!(NetworkDocument::empty().is_empty());
    }
}
