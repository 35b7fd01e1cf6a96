// The `graph` module contains the graph types the model is built from. These types are immutable
// once construction is done.
mod node;
pub use crate::graph::node::Node;

mod adjacency;
pub use crate::graph::adjacency::{Graph, GraphError, Orientation};

use fnv::FnvHashSet;

/// The adapter the model builder consumes. Implementations must answer igniter
/// queries in O(degree); `Graph` caches the sets up front.
pub trait BurnGraph {
    /// The node set, in a stable order.
    fn nodes(&self) -> Vec<Node>;

    /// The nodes whose fire can spread to `node` in one step.
    fn igniters(&self, node: Node) -> &FnvHashSet<Node>;
}
