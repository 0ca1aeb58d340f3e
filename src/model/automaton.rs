use petgraph::graph::{DiGraph, NodeIndex};

use super::{Edge, IdMode, Node};

/// NFA for one function: `(nodes, edges, id_mode)` per spec.
///
/// Stored as a `petgraph::DiGraph`, which is itself a flat node/edge arena
/// indexed by dense `usize`-backed handles — the representation the design
/// notes call for ("a flat edge list plus dense node indices; never with
/// back-pointers"), with `petgraph` supplying traversal helpers over it.
pub type Graph = DiGraph<Node, Edge>;

#[derive(Debug, Clone)]
pub struct FunctionAutomaton {
    pub function_name: String,
    pub modulus: u32,
    pub id_mode: IdMode,
    pub graph: Graph,
}

impl FunctionAutomaton {
    pub fn new(function_name: impl Into<String>, modulus: u32, id_mode: IdMode) -> Self {
        Self {
            function_name: function_name.into(),
            modulus,
            id_mode,
            graph: Graph::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        self.graph.add_node(node)
    }

    pub fn add_edge(&mut self, src: NodeIndex, dst: NodeIndex, edge: Edge) {
        self.graph.add_edge(src, dst, edge);
    }

    /// Nodes in dense index order `0..num_nodes` — the order the wire
    /// artifact's `nodeLabels`/`nodeDummyIDs`/`nodeUniqueIDs` arrays use.
    pub fn nodes_in_order(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx.index(), &self.graph[idx]))
    }

    /// Edges in insertion order — the order the wire artifact's `edges`
    /// array uses. Insertion order is traversal order, which is what makes
    /// re-running the extractor on identical input byte-identical.
    pub fn edges_in_order(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_indices().map(move |idx| &self.graph[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, EPSILON_LABEL};

    fn node(name: &str, dummy: i64, unique: i64) -> Node {
        Node {
            pretty_name: name.to_string(),
            dummy_id: dummy,
            reset_count: 0,
            unique_id: unique,
        }
    }

    #[test]
    fn node_and_edge_order_is_insertion_order() {
        let mut fa = FunctionAutomaton::new("f", 200, IdMode::Dummy);
        let a = fa.add_node(node("a", 0, 1));
        let b = fa.add_node(node("b", 1, 2));
        fa.add_edge(
            a,
            b,
            Edge {
                src: 0,
                dst: 1,
                label: "a".into(),
                kind: EdgeKind::Consuming {
                    match_dummy: 0,
                    match_unique: 1,
                },
            },
        );

        let names: Vec<_> = fa
            .nodes_in_order()
            .map(|(_, n)| n.pretty_name.clone())
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        let edges: Vec<_> = fa.edges_in_order().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label, "a");
        assert_ne!(edges[0].label, EPSILON_LABEL);
    }
}
