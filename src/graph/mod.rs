//! Network view models and the scene that owns them.
//!
//! Nodes and edges are built from a parsed document, given render handles and
//! installed into a `NetworkScene`, which keeps a petgraph StableGraph for
//! neighbour queries alongside them.

mod builder;
mod edge;
mod handle;
mod node;
mod scene;

pub use builder::{build_edges, build_nodes};
pub use edge::{EdgeId, EdgeState, EdgeStyle, EdgeView, LineStyle};
pub use handle::{HandleAllocator, RenderHandle};
pub use node::{NodeId, NodeShape, NodeState, NodeStyle, NodeView};
pub use scene::{DatasetState, LoadTicket, NetworkScene};
