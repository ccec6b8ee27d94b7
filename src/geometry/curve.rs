//! Curved connector geometry.
//!
//! Every edge is drawn as a quadratic Bézier whose control point sits
//! `curve_height` above the chord midpoint on +Y. The host uploads the sampled
//! points straight into line geometry.

use glam::Vec3;

use crate::graph::EdgeView;

/// Quadratic Bézier through `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCurve {
    pub start: Vec3,
    pub control: Vec3,
    pub end: Vec3,
}

impl ArcCurve {
    pub fn new(start: Vec3, end: Vec3, height: f32) -> Self {
        let control = start.lerp(end, 0.5) + Vec3::Y * height;
        Self {
            start,
            control,
            end,
        }
    }

    pub fn for_edge(edge: &EdgeView) -> Self {
        Self::new(edge.start_position, edge.end_position, edge.curve_height)
    }

    /// Point at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    /// `segments + 1` evenly parameterised points, endpoints included.
    pub fn sample(&self, segments: u32) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}

/// Flattened line vertices for all edges of a scene.
///
/// `vertices` is `[x0, y0, z0, x1, ...]`; edge `i` owns the points
/// `offsets[i]..offsets[i + 1]`. Per-point cumulative distances go into
/// `distances` so the host can drive dashed materials.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveBuffer {
    pub vertices: Vec<f32>,
    pub distances: Vec<f32>,
    pub offsets: Vec<u32>,
}

impl CurveBuffer {
    pub fn build(edges: &[EdgeView], segments: u32) -> Self {
        let points_per_edge = segments.max(1) as usize + 1;
        let mut buffer = Self {
            vertices: Vec::with_capacity(edges.len() * points_per_edge * 3),
            distances: Vec::with_capacity(edges.len() * points_per_edge),
            offsets: Vec::with_capacity(edges.len() + 1),
        };
        buffer.offsets.push(0);

        for edge in edges {
            let points = ArcCurve::for_edge(edge).sample(segments);
            let mut travelled = 0.0;
            let mut previous = None;
            for point in points {
                if let Some(prev) = previous {
                    travelled += point.distance(prev);
                }
                buffer.vertices.extend_from_slice(&point.to_array());
                buffer.distances.push(travelled);
                previous = Some(point);
            }
            buffer.offsets.push((buffer.distances.len()) as u32);
        }

        buffer
    }

    pub fn edge_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Points belonging to edge `index`, as `[x, y, z]` triples.
    pub fn edge_vertices(&self, index: usize) -> Option<&[f32]> {
        let start = *self.offsets.get(index)? as usize;
        let end = *self.offsets.get(index + 1)? as usize;
        self.vertices.get(start * 3..end * 3)
    }
}
