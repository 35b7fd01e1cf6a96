use fnv::{FnvHashMap, FnvHashSet};
use lazy_static::lazy_static;
use thiserror::Error;

use super::{BurnGraph, Node};

lazy_static! {
    static ref NO_IGNITERS: FnvHashSet<Node> = FnvHashSet::default();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph has no nodes")]
    Empty,
    #[error("igniter {igniter:?} of {node:?} is not a node of the graph")]
    UnknownIgniter { node: Node, igniter: Node },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Directed,
    Undirected,
}

/// Adjacency storage oriented for burning: for every node we keep the set of
/// nodes whose fire can reach it in one step. For directed graphs that is the
/// predecessor set, for undirected graphs the neighbor set.
#[derive(Clone, Debug)]
pub struct Graph {
    orientation: Orientation,
    // Insertion order - model construction iterates nodes in this order.
    nodes: Vec<Node>,
    members: FnvHashSet<Node>,
    igniters: FnvHashMap<Node, FnvHashSet<Node>>,
}

impl Graph {
    pub fn directed() -> Graph {
        Graph::new(Orientation::Directed)
    }

    pub fn undirected() -> Graph {
        Graph::new(Orientation::Undirected)
    }

    fn new(orientation: Orientation) -> Graph {
        Graph {
            orientation,
            nodes: vec![],
            members: FnvHashSet::default(),
            igniters: FnvHashMap::default(),
        }
    }

    pub fn directed_from_edges<I>(edges: I) -> Graph
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut graph = Graph::directed();
        for (from, to) in edges {
            graph.add_edge(Node(from), Node(to));
        }
        graph
    }

    pub fn undirected_from_edges<I>(edges: I) -> Graph
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut graph = Graph::undirected();
        for (from, to) in edges {
            graph.add_edge(Node(from), Node(to));
        }
        graph
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn add_node(&mut self, node: Node) {
        if self.members.insert(node) {
            self.nodes.push(node);
        }
    }

    /// Inserts both endpoints into the node set. Self-loops keep the node but
    /// produce no igniter entry - a node never explains its own burning.
    pub fn add_edge(&mut self, from: Node, to: Node) {
        self.add_node(from);
        self.add_node(to);
        if from == to {
            return;
        }
        self.igniters.entry(to).or_default().insert(from);
        if self.orientation == Orientation::Undirected {
            self.igniters.entry(from).or_default().insert(to);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: Node) -> bool {
        self.members.contains(&node)
    }
}

impl BurnGraph for Graph {
    fn nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    fn igniters(&self, node: Node) -> &FnvHashSet<Node> {
        self.igniters.get(&node).unwrap_or(&NO_IGNITERS)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_directed_igniters_are_predecessors() {
        let graph = Graph::directed_from_edges(vec![(0, 1), (0, 2), (3, 0)]);

        assert_eq!(graph.node_count(), 4);
        assert!(graph.igniters(Node(1)).contains(&Node(0)));
        assert!(graph.igniters(Node(2)).contains(&Node(0)));
        assert!(graph.igniters(Node(0)).contains(&Node(3)));
        // Edges point away from n0, so nothing ignites n3
        assert!(graph.igniters(Node(3)).is_empty());
    }

    #[test]
    fn test_undirected_igniters_are_neighbors() {
        let graph = Graph::undirected_from_edges(vec![(0, 1)]);

        assert!(graph.igniters(Node(0)).contains(&Node(1)));
        assert!(graph.igniters(Node(1)).contains(&Node(0)));
    }

    #[test]
    fn test_self_loop_keeps_node_but_no_igniter() {
        let mut graph = Graph::directed();
        graph.add_edge(Node(7), Node(7));

        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains(Node(7)));
        assert!(graph.igniters(Node(7)).is_empty());
    }

    #[test]
    fn test_isolated_node() {
        let mut graph = Graph::undirected();
        graph.add_node(Node(4));

        assert_eq!(graph.node_count(), 1);
        assert!(graph.igniters(Node(4)).is_empty());
    }

    #[test]
    fn test_duplicate_edges_and_nodes_collapse() {
        let mut graph = Graph::undirected_from_edges(vec![(0, 1), (1, 0), (0, 1)]);
        graph.add_node(Node(0));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.igniters(Node(1)).len(), 1);
    }
}
