//! View model construction from a parsed document.
//!
//! Node order is preserved exactly: a node's id is its index in the document,
//! which is what edge records refer to.

use glam::Vec3;
use rand::Rng;
use rand::seq::SliceRandom;

use super::edge::{EdgeId, EdgeStyle, EdgeView};
use super::handle::HandleAllocator;
use super::node::{NodeId, NodeStyle, NodeView};
use crate::data::NetworkDocument;

const FALLBACK_EDGE_COLOR: u32 = 0xffffff;

/// Build one `NodeView` per document node, in document order.
pub fn build_nodes(
    doc: &NetworkDocument,
    style: &NodeStyle,
    handles: &mut HandleAllocator,
) -> Vec<NodeView> {
    doc.nodes
        .iter()
        .enumerate()
        .map(|(i, record)| NodeView {
            id: NodeId(i as u32),
            position: Vec3::from_array(record.to_array()),
            style: *style,
            handle: handles.allocate(),
        })
        .collect()
}

/// Build one `EdgeView` per document edge, resolving endpoints against `nodes`.
///
/// Edges whose `start` or `end` fall outside `nodes` are skipped with a
/// warning. Line style and color come from the style palettes via `rng`.
pub fn build_edges<R: Rng + ?Sized>(
    doc: &NetworkDocument,
    nodes: &[NodeView],
    style: &EdgeStyle,
    handles: &mut HandleAllocator,
    rng: &mut R,
) -> Vec<EdgeView> {
    let mut edges = Vec::with_capacity(doc.edges.len());

    for (i, record) in doc.edges.iter().enumerate() {
        let (Some(start), Some(end)) = (
            nodes.get(record.start as usize),
            nodes.get(record.end as usize),
        ) else {
            tracing::warn!(
                edge = i,
                start = record.start,
                end = record.end,
                node_count = nodes.len(),
                "skipping edge with out-of-range endpoint"
            );
            continue;
        };

        let line_style = style.line_styles.choose(rng).copied().unwrap_or_default();
        let color = style
            .colors
            .choose(rng)
            .copied()
            .unwrap_or(FALLBACK_EDGE_COLOR);

        edges.push(EdgeView {
            id: EdgeId(edges.len() as u32),
            start: start.id,
            end: end.id,
            start_position: start.position,
            end_position: end.position,
            offset: record.offset,
            curve_height: record.offset + style.base_curve_height,
            line_style,
            color,
            width: style.width,
            handle: handles.allocate(),
        });
    }

    edges
}
