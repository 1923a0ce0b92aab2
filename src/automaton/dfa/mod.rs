use std::fmt::{Debug, Display};

use hashbrown::HashMap;
use itertools::Itertools;
use node::DfaNode;
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{Alphabet, Language, Letter};

pub mod node;
pub mod run;
pub mod swap;

/// A deterministic finite automaton over symbols of type `S` with named
/// states.
///
/// States are registered under unique names and stored as graph nodes, the
/// transitions as symbol-labeled edges between them. The transition table is
/// allowed to stay partial: a missing (state, symbol) entry means there is no
/// defined move, which is different from the symbol not being part of the
/// alphabet at all.
///
/// Built incrementally through the validated mutators, then queried through
/// [`Dfa::run`], [`Language::accepts`] or derived with [`Dfa::swap`].
#[derive(Clone)]
pub struct Dfa<S: Letter> {
    alphabet: Vec<S>,
    graph: DiGraph<DfaNode, S>,
    states: HashMap<String, NodeIndex<u32>>,
    start: Option<NodeIndex<u32>>,
}

impl<S: Letter> Dfa<S> {
    pub fn new() -> Self {
        Dfa {
            alphabet: Vec::new(),
            graph: DiGraph::new(),
            states: HashMap::new(),
            start: None,
        }
    }

    pub fn with_alphabet(alphabet: Vec<S>) -> Self {
        let mut dfa = Dfa::new();
        for symbol in alphabet {
            dfa.add_symbol(symbol);
        }
        dfa
    }

    /// Adds `symbol` to the alphabet if it is not already a member.
    /// Returns whether the symbol was newly added. Repeating a symbol is not
    /// an error.
    pub fn add_symbol(&mut self, symbol: S) -> bool {
        if self.alphabet.contains(&symbol) {
            return false;
        }

        self.alphabet.push(symbol);
        true
    }

    /// Registers a new state with no transitions under `name`.
    /// Fails if the name is already taken. An existing state and its
    /// transitions are never overwritten.
    pub fn add_state(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();

        if self.states.contains_key(&name) {
            tracing::debug!("state {:?} is already registered", name);
            return false;
        }

        let index = self.graph.add_node(DfaNode::new(name.clone()));
        self.states.insert(name, index);
        true
    }

    /// Designates the named state as the start state.
    /// Fails and leaves any prior start state unchanged if the name is not
    /// registered.
    pub fn set_start(&mut self, name: &str) -> bool {
        match self.states.get(name) {
            Some(index) => {
                self.start = Some(*index);
                true
            }
            None => {
                tracing::debug!("cannot set unknown state {:?} as start state", name);
                false
            }
        }
    }

    /// Marks the named state as a final state.
    /// Fails if the name is not registered.
    pub fn set_final(&mut self, name: &str) -> bool {
        match self.states.get(name) {
            Some(index) => {
                self.graph[*index].accepting = true;
                true
            }
            None => {
                tracing::debug!("cannot set unknown state {:?} as final state", name);
                false
            }
        }
    }

    pub fn is_start(&self, name: &str) -> bool {
        match (self.start, self.states.get(name)) {
            (Some(start), Some(index)) => start == *index,
            _ => false,
        }
    }

    pub fn is_final(&self, name: &str) -> bool {
        self.states
            .get(name)
            .is_some_and(|index| self.graph[*index].accepting)
    }

    /// Records the transition `from --symbol--> to`.
    /// Fails without mutating anything unless both endpoint states are
    /// registered and the symbol is in the alphabet. Re-adding a transition
    /// for an already defined `(from, symbol)` pair overwrites the
    /// destination: the last write wins.
    pub fn add_transition(&mut self, from: &str, to: &str, symbol: S) -> bool {
        let (Some(&from_index), Some(&to_index)) = (self.states.get(from), self.states.get(to))
        else {
            tracing::debug!("transition endpoints {:?} -> {:?} are not registered", from, to);
            return false;
        };

        if !self.alphabet.contains(&symbol) {
            tracing::debug!("transition symbol {:?} is not in the alphabet", symbol);
            return false;
        }

        if let Some(edge) = self.find_transition(from_index, &symbol) {
            self.graph.remove_edge(edge);
        }

        self.graph.add_edge(from_index, to_index, symbol);
        true
    }

    /// The destination of the move defined for `(from, symbol)`, or [None]
    /// if the state is unknown or the entry is undefined.
    pub fn lookup(&self, from: &str, symbol: &S) -> Option<&str> {
        let index = *self.states.get(from)?;
        let edge = self.find_transition(index, symbol)?;
        let (_, target) = self.graph.edge_endpoints(edge)?;

        Some(self.graph[target].name())
    }

    fn find_transition(&self, from: NodeIndex<u32>, symbol: &S) -> Option<EdgeIndex<u32>> {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.id())
    }

    pub fn get_state(&self, name: &str) -> Option<&DfaNode> {
        self.states.get(name).map(|index| &self.graph[*index])
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    /// State names in registration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|node| node.name())
    }

    pub fn start_state(&self) -> Option<&str> {
        self.start.map(|index| self.graph[index].name())
    }

    /// Final state names in sorted order.
    pub fn final_states(&self) -> Vec<&str> {
        let mut finals = self
            .graph
            .node_weights()
            .filter(|node| node.accepting)
            .map(|node| node.name())
            .collect_vec();
        finals.sort_unstable();

        finals
    }

    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        let final_states = self.final_states();

        dot.push_str(&format!(
            "node [shape = doublecircle]; {};\n",
            final_states.iter().map(|name| format!("\"{}\"", name)).join(" ")
        ));
        dot.push_str("node [shape = circle];\n");

        if let Some(start) = self.start_state() {
            dot.push_str(&format!("START -> \"{}\";\n", start));
        }

        for edge in self.graph.edge_references() {
            dot.push_str(&format!(
                "\"{}\" -> \"{}\" [ label=\"{:?}\" ];\n",
                self.graph[edge.source()].name(),
                self.graph[edge.target()].name(),
                edge.weight()
            ));
        }

        dot.push_str("}\n");

        dot
    }
}

impl<S: Letter> Default for Dfa<S> {
    fn default() -> Self {
        Dfa::new()
    }
}

impl<S: Letter> Alphabet for Dfa<S> {
    type Letter = S;

    fn alphabet(&self) -> &[S] {
        &self.alphabet
    }
}

impl<S: Letter> Language for Dfa<S> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> bool
    where
        S: 'a,
    {
        self.run(input).is_accepted()
    }
}

/// The canonical 5-tuple dump: state set, alphabet, transition grid, start
/// state, sorted final states. One grid row per state in registration order,
/// one column per symbol in alphabet insertion order, `-` for undefined
/// moves. Deterministic for identical automaton content.
impl<S: Letter + Display> Display for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Q = {{ {} }}", self.state_names().join(" "))?;
        writeln!(f, "Sigma = {{ {} }}", self.alphabet.iter().join(" "))?;
        writeln!(f, "delta =")?;
        writeln!(f, "\t{}", self.alphabet.iter().join(" "))?;

        for node in self.graph.node_weights() {
            let row = self
                .alphabet
                .iter()
                .map(|symbol| self.lookup(node.name(), symbol).unwrap_or("-"))
                .join(" ");
            writeln!(f, "{}\t{}", node.name(), row)?;
        }

        writeln!(f, "q0 = {}", self.start_state().unwrap_or("-"))?;
        write!(f, "F = {{ {} }}", self.final_states().join(" "))
    }
}

impl<S: Letter> Debug for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dfa")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("states", &self.state_names().collect_vec())
            .field("start", &self.start_state())
            .field("final_states", &self.final_states())
            .field(
                "transitions",
                &self
                    .graph
                    .edge_references()
                    .map(|edge| {
                        format!(
                            "{} --- {:?} --> {}",
                            self.graph[edge.source()].name(),
                            edge.weight(),
                            self.graph[edge.target()].name()
                        )
                    })
                    .collect_vec(),
            )
            .finish()
    }
}
