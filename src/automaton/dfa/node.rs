/// A named state in a DFA.
///
/// One concrete record per state: identity plus the accepting flag. The
/// outgoing transitions live as labeled edges in the owning graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DfaNode {
    pub name: String,
    pub accepting: bool,
}

impl DfaNode {
    pub fn new(name: impl Into<String>) -> Self {
        DfaNode {
            name: name.into(),
            accepting: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
