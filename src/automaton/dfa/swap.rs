use petgraph::visit::EdgeRef;
use thiserror::Error;

use crate::automaton::{Letter, dfa::Dfa};

/// Error returned when a swap names a symbol that is not in the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError<S: Letter> {
    #[error("symbol {0:?} is not in the alphabet")]
    SymbolNotInAlphabet(S),
}

impl<S: Letter> Dfa<S> {
    /// Derives a new automaton with the transition roles of `a` and `b`
    /// exchanged in every state.
    ///
    /// The result has the same alphabet, states, start state and final
    /// states, but every transition labeled `a` is relabeled to `b` and vice
    /// versa. A state with only one of the two entries defined keeps the
    /// other entry undefined, the hole moves to the other symbol with it.
    ///
    /// The graph, the name registry and the alphabet of the result are
    /// rebuilt from scratch and every relabeled entry is read from the
    /// untouched source table, so the two automata share no mutable storage
    /// and the exchange never reads an entry it has already written.
    ///
    /// `swap(x, x)` returns an identical copy. Applying the same swap twice
    /// reconstructs the original transition table.
    pub fn swap(&self, a: &S, b: &S) -> Result<Dfa<S>, SwapError<S>> {
        if !self.alphabet.contains(a) {
            return Err(SwapError::SymbolNotInAlphabet(a.clone()));
        }
        if !self.alphabet.contains(b) {
            return Err(SwapError::SymbolNotInAlphabet(b.clone()));
        }

        tracing::debug!("swapping the transition roles of {:?} and {:?}", a, b);

        let mut swapped = Dfa::new();
        swapped.alphabet = self.alphabet.clone();

        // Nodes are re-added in registration order, so the fresh indices
        // coincide with the source indices and edge endpoints can be carried
        // over directly.
        for node in self.graph.node_indices() {
            let new_node = swapped.graph.add_node(self.graph[node].clone());
            swapped
                .states
                .insert(self.graph[node].name().to_owned(), new_node);

            if Some(node) == self.start {
                swapped.start = Some(new_node);
            }
        }

        for edge in self.graph.edge_references() {
            let label = if edge.weight() == a {
                b.clone()
            } else if edge.weight() == b {
                a.clone()
            } else {
                edge.weight().clone()
            };

            swapped.graph.add_edge(edge.source(), edge.target(), label);
        }

        Ok(swapped)
    }
}
