use std::collections::HashMap;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::{Automaton, State};

impl Automaton {
    /// One node per state, labeled with its number and its role
    /// (`->` initial, `*` final), one edge per transition. Epsilon edges are
    /// labeled `ε`.
    pub fn to_graph(&self) -> DiGraph<String, String> {
        let mut graph: DiGraph<String, String> = DiGraph::new();
        let mut state_to_index: HashMap<State, NodeIndex> = HashMap::new();

        for s in self.states() {
            let mut label = String::new();
            if self.initials().contains(&s) {
                label.push_str("->");
            }
            label.push_str(&s.to_string());
            if self.finals().contains(&s) {
                label.push('*');
            }
            state_to_index.insert(s, graph.add_node(label));
        }

        for t in self.transitions() {
            let label = t.label().map_or_else(|| "ε".to_string(), |c| c.to_string());
            graph.add_edge(state_to_index[&t.start()], state_to_index[&t.end()], label);
        }

        graph
    }

    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.to_graph()))
    }
}

#[cfg(test)]
mod dot_tests {
    use crate::Automaton;

    #[test]
    fn graph_mirrors_automaton() {
        let a = Automaton::builder("L")
            .initial(0)
            .final_state(1)
            .transition(0, 'a', 1)
            .epsilon(1, 0)
            .build();

        let graph = a.to_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);

        let mut nodes: Vec<&String> = graph.node_weights().collect();
        nodes.sort();
        assert_eq!(nodes, vec!["->0", "1*"]);

        let mut edges: Vec<&String> = graph.edge_weights().collect();
        edges.sort();
        assert_eq!(edges, vec!["a", "ε"]);
    }

    #[test]
    fn dot_output_is_a_digraph() {
        let a = Automaton::builder("L").initial(0).transition(0, 'x', 0).build();
        let dot = a.to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"x\""));
    }
}
