use petgraph::{Direction, visit::EdgeRef};

use crate::automaton::{Letter, dfa::Dfa};

/// The outcome of running an input word through a DFA.
///
/// Rejection keeps its cause: a word can fail because a symbol is not part
/// of the alphabet, because the current state has no move defined for it, or
/// because the run ends in a non-final state. [`crate::automaton::Language::accepts`]
/// collapses all of these to `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<S: Letter> {
    /// The run consumed the whole word and ended in a final state.
    Accepted,
    /// The run consumed the whole word and ended in a non-final state.
    Rejected,
    /// A symbol of the word is not a member of the alphabet.
    OutOfAlphabet(S),
    /// The current state has no transition defined for the next symbol.
    NoTransition { state: String, symbol: S },
    /// No start state has been designated.
    NotInitialized,
}

impl<S: Letter> RunOutcome<S> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RunOutcome::Accepted)
    }
}

impl<S: Letter> Dfa<S> {
    /// Runs `input` through the automaton, starting at the start state and
    /// following one transition per symbol.
    ///
    /// The word is consumed left to right and the run stops at the first
    /// failure. The empty word performs zero steps, so it is accepted iff
    /// the start state is final.
    pub fn run<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> RunOutcome<S>
    where
        S: 'a,
    {
        let Some(start) = self.start else {
            tracing::debug!("running a word on an automaton without a start state");
            return RunOutcome::NotInitialized;
        };

        let mut current = start;
        for symbol in input {
            if !self.alphabet.contains(symbol) {
                tracing::trace!("symbol {:?} is not in the alphabet, rejecting", symbol);
                return RunOutcome::OutOfAlphabet(symbol.clone());
            }

            let next = self
                .graph
                .edges_directed(current, Direction::Outgoing)
                .find(|edge| edge.weight() == symbol)
                .map(|edge| edge.target());

            match next {
                Some(state) => current = state,
                None => {
                    tracing::trace!(
                        "state {:?} has no transition for {:?}, rejecting",
                        self.graph[current].name(),
                        symbol
                    );
                    return RunOutcome::NoTransition {
                        state: self.graph[current].name().to_owned(),
                        symbol: symbol.clone(),
                    };
                }
            }
        }

        if self.graph[current].accepting {
            RunOutcome::Accepted
        } else {
            RunOutcome::Rejected
        }
    }
}
