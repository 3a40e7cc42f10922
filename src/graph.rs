//! Inheritance graph over parsed class declarations
//!
//! Edges run base → derived, so a class's ancestors are its transitive
//! incoming neighbors and its descendants the transitive outgoing ones.
//! Names that only ever appear on the right-hand side of a `class X(Y):`
//! header still get a node: they have no ancestry of their own, but their
//! children must remain discoverable through the reverse lookup.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::decl::ClassDecl;

/// Per-class transitive relationship data embedded in artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGraphView {
    /// Every class reachable by following `bases` transitively
    pub ancestors: Vec<String>,
    /// Every class that transitively declares this one as a base
    pub descendants: Vec<String>,
    /// Classes whose `bases` directly include this class
    pub direct_children: Vec<String>,
}

/// The inheritance graph for one parse pass
pub struct InheritanceGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
    /// name → declaration; duplicates resolve last-wins
    decls: HashMap<String, ClassDecl>,
}

impl InheritanceGraph {
    /// Build the graph from the full declaration list.
    pub fn build(classes: &[ClassDecl]) -> Self {
        let mut graph = DiGraph::with_capacity(classes.len(), classes.len());
        let mut node_indices: HashMap<String, NodeIndex> = HashMap::with_capacity(classes.len());
        let mut decls = HashMap::with_capacity(classes.len());

        fn intern(
            graph: &mut DiGraph<String, ()>,
            indices: &mut HashMap<String, NodeIndex>,
            name: &str,
        ) -> NodeIndex {
            match indices.get(name) {
                Some(&idx) => idx,
                None => {
                    let idx = graph.add_node(name.to_string());
                    indices.insert(name.to_string(), idx);
                    idx
                }
            }
        }

        for class in classes {
            let derived = intern(&mut graph, &mut node_indices, &class.name);
            for base in &class.bases {
                let base_idx = intern(&mut graph, &mut node_indices, base);
                // Duplicate declarations can repeat an edge
                if !graph.contains_edge(base_idx, derived) {
                    graph.add_edge(base_idx, derived, ());
                }
            }
            decls.insert(class.name.clone(), class.clone());
        }

        Self {
            graph,
            node_indices,
            decls,
        }
    }

    /// Number of known names (declared classes plus bare base references)
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether a name was declared as a class (not just referenced)
    pub fn is_declared(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Declaration for a name, if any. Last declaration wins for
    /// duplicate names.
    pub fn decl(&self, name: &str) -> Option<&ClassDecl> {
        self.decls.get(name)
    }

    /// All names with a node in the graph, including bare base references
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All classes this one transitively derives from
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        self.closure(name, Direction::Incoming)
    }

    /// All classes that transitively derive from this one
    pub fn descendants(&self, name: &str) -> Vec<String> {
        self.closure(name, Direction::Outgoing)
    }

    /// Classes that directly list `name` among their bases, in source order
    pub fn direct_children(&self, name: &str) -> Vec<String> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };
        let mut children: Vec<String> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect();
        // petgraph yields neighbors newest-edge-first
        children.reverse();
        children
    }

    /// Full relationship view for one class
    pub fn view(&self, name: &str) -> ClassGraphView {
        ClassGraphView {
            ancestors: self.ancestors(name),
            descendants: self.descendants(name),
            direct_children: self.direct_children(name),
        }
    }

    /// Deduplicated transitive closure in one direction, excluding the
    /// start node. Explicit worklist with an owned visited set, so cyclic
    /// or diamond-shaped hierarchies terminate instead of recursing
    /// forever.
    fn closure(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&start) = self.node_indices.get(name) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut stack = vec![start];

        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            if idx != start {
                if let Some(node_name) = self.graph.node_weight(idx) {
                    result.push(node_name.clone());
                }
            }
            // petgraph yields neighbors newest-edge-first; pushing in that
            // order leaves the source-order neighbor on top of the stack
            for next in self.graph.neighbors_directed(idx, direction) {
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }

        result
    }
}
