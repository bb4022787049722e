use crate::reference::Ref;
use crate::utils::{pairing3, MyHash};

/// An internal BDD node: `(variable, low, high)`.
///
/// The terminal node has `variable = 0`. For every other node the children are
/// either the terminal or nodes with a strictly larger variable, and `high` is
/// never negated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub variable: u32,
    pub low: Ref,
    pub high: Ref,
}

impl Node {
    pub const fn new(variable: u32, low: Ref, high: Ref) -> Self {
        Self {
            variable,
            low,
            high,
        }
    }

    /// The terminal node stored at index 1.
    ///
    /// Its children point to itself so that traversals ignoring the sign never leave it.
    pub const fn terminal() -> Self {
        Self::new(0, Ref::positive(1), Ref::positive(1))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::terminal()
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        // Bucket selection only looks at node identity, not the sign of `low`.
        pairing3(
            self.variable as u64,
            self.low.index() as u64,
            self.high.index() as u64,
        )
    }
}
