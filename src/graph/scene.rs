//! NetworkScene - the currently installed dataset.
//!
//! The scene owns the node and edge view models built from one document,
//! the petgraph topology used for neighbour queries, the spatial index used
//! for picking and the sampled connector curves. Loading a new dataset
//! releases every render handle of the previous one before anything new is
//! installed; two datasets never coexist.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::builder::{build_edges, build_nodes};
use super::edge::{EdgeId, EdgeState, EdgeStyle, EdgeView};
use super::handle::{HandleAllocator, RenderHandle};
use super::node::{NodeId, NodeState, NodeStyle, NodeView};
use crate::config::SceneConfig;
use crate::data::NetworkDocument;
use crate::geometry::{Bounds3, CurveBuffer};
use crate::spatial::{NodeBox, SpatialIndex};

/// Where the scene is in its dataset lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetState {
    #[default]
    Empty,
    /// A fetch for the named dataset is in flight; the scene is empty.
    Loading(String),
    Loaded(String),
}

impl DatasetState {
    pub fn dataset(&self) -> Option<&str> {
        match self {
            DatasetState::Empty => None,
            DatasetState::Loading(name) | DatasetState::Loaded(name) => Some(name.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetState::Empty => "empty",
            DatasetState::Loading(_) => "loading",
            DatasetState::Loaded(_) => "loaded",
        }
    }
}

/// Proof that a load was started; only the newest ticket may install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u32,
    dataset: String,
}

impl LoadTicket {
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }
}

/// The installed network and everything derived from it.
pub struct NetworkScene {
    /// Topology. Node weights are their stable ids, edge weights theirs.
    graph: StableGraph<NodeId, EdgeId, Directed>,

    nodes: Vec<NodeView>,
    edges: Vec<EdgeView>,
    node_states: Vec<NodeState>,
    edge_states: Vec<EdgeState>,

    /// Spatial index for picking
    spatial: SpatialIndex,

    curves: CurveBuffer,

    state: DatasetState,
    generation: u32,

    /// Handles of replaced datasets the host has not disposed yet.
    released: Vec<RenderHandle>,

    node_style: NodeStyle,
    edge_style: EdgeStyle,
    curve_segments: u32,
    palette_seed: u64,
}

impl NetworkScene {
    /// Create an empty scene.
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            graph: StableGraph::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_states: Vec::new(),
            edge_states: Vec::new(),
            spatial: SpatialIndex::new(),
            curves: CurveBuffer::default(),
            state: DatasetState::Empty,
            generation: 0,
            released: Vec::new(),
            node_style: config.node,
            edge_style: config.edge.clone(),
            curve_segments: config.curve_segments,
            palette_seed: config.palette_seed,
        }
    }

    // =========================================================================
    // Dataset Lifecycle
    // =========================================================================

    /// Start loading `dataset`: release the current network and hand out a
    /// ticket for the fetch about to happen.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self, dataset: &str) -> LoadTicket {
        if let DatasetState::Loading(previous) = &self.state {
            tracing::debug!(previous = %previous, next = dataset, "superseding in-flight load");
        }
        self.release_all();
        self.generation += 1;
        self.state = DatasetState::Loading(dataset.to_string());
        LoadTicket {
            generation: self.generation,
            dataset: dataset.to_string(),
        }
    }

    /// Install the fetched document for `ticket`.
    ///
    /// Returns false, leaving the scene untouched, when a newer load has
    /// started since the ticket was issued.
    pub fn complete_load(&mut self, ticket: &LoadTicket, doc: &NetworkDocument) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                dataset = %ticket.dataset,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return false;
        }

        self.install(doc);
        self.state = DatasetState::Loaded(ticket.dataset.clone());
        tracing::info!(
            dataset = %ticket.dataset,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "network installed"
        );
        true
    }

    /// Replace the scene with an already parsed document.
    pub fn load_document(&mut self, dataset: &str, doc: &NetworkDocument) {
        let ticket = self.begin_load(dataset);
        self.complete_load(&ticket, doc);
    }

    /// Release the installed network and return to `Empty`.
    pub fn clear(&mut self) {
        self.release_all();
        self.generation += 1;
        self.state = DatasetState::Empty;
    }

    fn install(&mut self, doc: &NetworkDocument) {
        let mut handles = HandleAllocator::new(self.generation);
        let mut rng = StdRng::seed_from_u64(self.palette_seed);

        let nodes = build_nodes(doc, &self.node_style, &mut handles);
        let edges = build_edges(doc, &nodes, &self.edge_style, &mut handles, &mut rng);

        self.graph = StableGraph::with_capacity(nodes.len(), edges.len());
        let indices: Vec<NodeIndex> = nodes.iter().map(|n| self.graph.add_node(n.id)).collect();
        for edge in &edges {
            self.graph
                .add_edge(indices[edge.start.index()], indices[edge.end.index()], edge.id);
        }

        self.spatial.rebuild(
            nodes
                .iter()
                .map(|n| NodeBox::new(n.id, n.position, n.style.half_extent()))
                .collect(),
        );
        self.curves = CurveBuffer::build(&edges, self.curve_segments);
        self.node_states = vec![NodeState::new(); nodes.len()];
        self.edge_states = vec![EdgeState::new(); edges.len()];
        self.nodes = nodes;
        self.edges = edges;
    }

    fn release_all(&mut self) {
        self.released.extend(self.nodes.drain(..).map(|n| n.handle));
        self.released.extend(self.edges.drain(..).map(|e| e.handle));
        self.graph.clear();
        self.node_states.clear();
        self.edge_states.clear();
        self.spatial.clear();
        self.curves = CurveBuffer::default();
    }

    /// Hand the released handles to the host for disposal.
    pub fn drain_released(&mut self) -> Vec<RenderHandle> {
        std::mem::take(&mut self.released)
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    /// Bumped on every load start and clear.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    // =========================================================================
    // View Models
    // =========================================================================

    pub fn nodes(&self) -> &[NodeView] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeView] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn curves(&self) -> &CurveBuffer {
        &self.curves
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.nodes.iter().map(|n| n.position))
    }

    /// Node positions as `[x0, y0, z0, x1, ...]`.
    pub fn node_positions(&self) -> Vec<f32> {
        self.nodes
            .iter()
            .flat_map(|n| n.position.to_array())
            .collect()
    }

    // =========================================================================
    // Interaction State
    // =========================================================================

    pub fn node_states(&self) -> &[NodeState] {
        &self.node_states
    }

    pub fn edge_states(&self) -> &[EdgeState] {
        &self.edge_states
    }

    pub fn node_state_mut(&mut self, id: NodeId) -> Option<&mut NodeState> {
        self.node_states.get_mut(id.index())
    }

    pub fn edge_state_mut(&mut self, id: EdgeId) -> Option<&mut EdgeState> {
        self.edge_states.get_mut(id.raw() as usize)
    }

    /// Reset every node and edge flag.
    pub fn clear_states(&mut self) {
        self.node_states.fill(NodeState::new());
        self.edge_states.fill(EdgeState::new());
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Nodes sharing an edge with `id`, in either direction, without repeats.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let index = NodeIndex::new(id.index());
        if !self.graph.contains_node(index) {
            return Vec::new();
        }
        let mut neighbors: Vec<NodeId> = self
            .graph
            .neighbors_undirected(index)
            .filter_map(|n| self.graph.node_weight(n).copied())
            .filter(|&n| n != id)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Edges starting or ending at `id`.
    pub fn incident_edges(&self, id: NodeId) -> Vec<EdgeId> {
        let index = NodeIndex::new(id.index());
        if !self.graph.contains_node(index) {
            return Vec::new();
        }
        let mut edges: Vec<EdgeId> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .chain(self.graph.edges_directed(index, Direction::Incoming))
            .map(|e| *e.weight())
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// `(out_degree, in_degree)` of a node.
    pub fn degree(&self, id: NodeId) -> (u32, u32) {
        let index = NodeIndex::new(id.index());
        if !self.graph.contains_node(index) {
            return (0, 0);
        }
        (
            self.graph.edges_directed(index, Direction::Outgoing).count() as u32,
            self.graph.edges_directed(index, Direction::Incoming).count() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EdgeRecord, NodeRecord};

    fn triangle() -> NetworkDocument {
        NetworkDocument {
            nodes: vec![
                NodeRecord::new(0.0, 0.0, 0.0),
                NodeRecord::new(4.0, 0.0, 0.0),
                NodeRecord::new(0.0, 0.0, 4.0),
            ],
            edges: vec![
                EdgeRecord::new(0, 1, 0.0),
                EdgeRecord::new(1, 2, 1.0),
                EdgeRecord::new(2, 0, -1.0),
            ],
        }
    }

    fn line(count: u32) -> NetworkDocument {
        NetworkDocument {
            nodes: (0..count).map(|i| NodeRecord::new(i as f32 * 3.0, 1.0, 0.0)).collect(),
            edges: (1..count).map(|i| EdgeRecord::new(i - 1, i, 0.5)).collect(),
        }
    }

    fn scene() -> NetworkScene {
        NetworkScene::new(&SceneConfig::default())
    }

    #[test]
    fn test_starts_empty() {
        let scene = scene();
        assert_eq!(scene.state(), &DatasetState::Empty);
        assert_eq!(scene.node_count(), 0);
        assert!(scene.bounds().is_none());
    }

    #[test]
    fn test_load_installs_views() {
        let mut scene = scene();
        scene.load_document("small", &triangle());

        assert_eq!(scene.state(), &DatasetState::Loaded("small".to_string()));
        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.edge_count(), 3);
        assert_eq!(scene.spatial().len(), 3);
        assert_eq!(scene.curves().edge_count(), 3);
        assert_eq!(scene.node_positions()[3..6], [4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_replace_leaves_only_second_dataset() {
        let mut scene = scene();
        scene.load_document("small", &triangle());
        let first_handles: Vec<_> = scene
            .nodes()
            .iter()
            .map(|n| n.handle)
            .chain(scene.edges().iter().map(|e| e.handle))
            .collect();
        assert!(scene.drain_released().is_empty());

        scene.load_document("medium", &line(5));

        assert_eq!(scene.state().dataset(), Some("medium"));
        assert_eq!(scene.node_count(), 5);
        assert_eq!(scene.edge_count(), 4);
        assert_eq!(scene.spatial().len(), 5);
        assert_eq!(scene.curves().edge_count(), 4);
        for (i, node) in scene.nodes().iter().enumerate() {
            assert_eq!(node.position.x, i as f32 * 3.0);
        }

        let mut released = scene.drain_released();
        released.sort();
        let mut expected = first_handles;
        expected.sort();
        assert_eq!(released, expected);
        assert!(scene.drain_released().is_empty());

        let live = scene.generation();
        assert!(scene.nodes().iter().all(|n| n.handle.generation == live));
    }

    #[test]
    fn test_begin_load_releases_before_fetch() {
        let mut scene = scene();
        scene.load_document("small", &triangle());

        let ticket = scene.begin_load("large");
        assert_eq!(scene.state(), &DatasetState::Loading("large".to_string()));
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.drain_released().len(), 6);
        assert_eq!(ticket.dataset(), "large");
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut scene = scene();
        let first = scene.begin_load("small");
        let second = scene.begin_load("medium");

        assert!(scene.complete_load(&second, &line(3)));
        assert!(!scene.complete_load(&first, &triangle()));

        assert_eq!(scene.state().dataset(), Some("medium"));
        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.edge_count(), 2);
    }

    #[test]
    fn test_stale_ticket_after_later_completion_order() {
        let mut scene = scene();
        let first = scene.begin_load("small");
        let second = scene.begin_load("medium");

        // The older fetch finishes first; it must not flash onto the screen.
        assert!(!scene.complete_load(&first, &triangle()));
        assert_eq!(scene.state(), &DatasetState::Loading("medium".to_string()));
        assert_eq!(scene.node_count(), 0);

        assert!(scene.complete_load(&second, &line(2)));
        assert_eq!(scene.node_count(), 2);
    }

    #[test]
    fn test_failed_load_installs_empty_network() {
        let mut scene = scene();
        scene.load_document("small", &triangle());
        scene.load_document("missing", &NetworkDocument::empty());

        assert_eq!(scene.state().dataset(), Some("missing"));
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.edge_count(), 0);
        assert!(scene.spatial().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut scene = scene();
        scene.load_document("small", &triangle());
        scene.clear();

        assert_eq!(scene.state(), &DatasetState::Empty);
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.drain_released().len(), 6);
    }

    #[test]
    fn test_neighbors_and_incident_edges() {
        let mut scene = scene();
        scene.load_document("small", &triangle());

        assert_eq!(scene.neighbors(NodeId(0)), vec![NodeId(1), NodeId(2)]);
        assert_eq!(scene.incident_edges(NodeId(1)), vec![EdgeId(0), EdgeId(1)]);
        assert_eq!(scene.degree(NodeId(2)), (1, 1));
        assert!(scene.neighbors(NodeId(99)).is_empty());
    }

    #[test]
    fn test_self_loop_is_not_a_neighbor() {
        let mut scene = scene();
        let doc = NetworkDocument {
            nodes: vec![NodeRecord::default(), NodeRecord::new(1.0, 0.0, 0.0)],
            edges: vec![EdgeRecord::new(0, 0, 0.0), EdgeRecord::new(0, 1, 0.0)],
        };
        scene.load_document("loop", &doc);

        assert_eq!(scene.neighbors(NodeId(0)), vec![NodeId(1)]);
        assert_eq!(scene.incident_edges(NodeId(0)), vec![EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn test_states_reset_on_reload() {
        let mut scene = scene();
        scene.load_document("small", &triangle());
        scene.node_state_mut(NodeId(1)).unwrap().set_selected(true);

        scene.load_document("small", &triangle());
        assert!(scene.node_states().iter().all(|s| !s.is_selected()));
    }
}
