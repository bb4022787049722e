//! Debug helpers for inspecting the node storage.

use std::fmt::{Display, Formatter};

use crate::bdd::Bdd;
use crate::reference::Ref;

/// Raw `(v, low, high)` contents of a storage slot.
///
/// The terminal is reported as `(0, 0, 0)`: its children are not meaningful.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Triplet {
    pub v: u32,
    pub low: i32,
    pub high: i32,
}

impl Display for Triplet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.v, self.low, self.high)
    }
}

impl Bdd {
    /// Triplet of the node at `index`, or `None` if the slot is free.
    pub fn triplet(&self, index: usize) -> Option<Triplet> {
        let storage = self.storage.borrow();
        if index == 0 || index >= storage.capacity() || !storage.is_occupied(index) {
            return None;
        }
        if index == self.one.index() {
            return Some(Triplet { v: 0, low: 0, high: 0 });
        }
        let node = storage.value(index);
        Some(Triplet {
            v: node.variable,
            low: node.low.get(),
            high: node.high.get(),
        })
    }

    /// Nested `(v, high, low)` rendering of `node`, with the terminals written as `1` and `0`.
    ///
    /// Complement edges are resolved, and shared subgraphs are printed repeatedly.
    pub fn to_bracket_string(&self, node: Ref) -> String {
        let mut out = String::new();
        self.write_bracket(node, &mut out);
        out
    }

    fn write_bracket(&self, node: Ref, out: &mut String) {
        if self.is_terminal(node) {
            out.push(if self.is_one(node) { '1' } else { '0' });
            return;
        }
        out.push_str(&format!("({}, ", self.variable(node.index())));
        self.write_bracket(self.high_node(node), out);
        out.push_str(", ");
        self.write_bracket(self.low_node(node), out);
        out.push(')');
    }

    /// Lengths of all collision chains of the unique table.
    pub fn chains(&self) -> Vec<usize> {
        self.storage.borrow().chains().collect()
    }

    pub fn max_chain(&self) -> usize {
        self.chains().into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::config::BddConfig;

    #[test]
    fn test_to_bracket_string() {
        let bdd = Bdd::default();

        assert_eq!(bdd.to_bracket_string(bdd.one), "1");
        assert_eq!(bdd.to_bracket_string(bdd.zero), "0");

        let x = bdd.mk_var(1);
        assert_eq!(bdd.to_bracket_string(x), "(1, 1, 0)");
        assert_eq!(bdd.to_bracket_string(-x), "(1, 0, 1)");

        let y = bdd.mk_var(2);
        assert_eq!(bdd.to_bracket_string(bdd.apply_and(x, y)), "(1, (2, 1, 0), 0)");
        assert_eq!(bdd.to_bracket_string(bdd.apply_or(-x, y)), "(1, (2, 1, 0), 1)");
        assert_eq!(
            bdd.to_bracket_string(bdd.apply_xor(x, y)),
            "(1, (2, 0, 1), (2, 1, 0))"
        );
    }

    #[test]
    fn test_triplet() {
        let bdd = Bdd::default();

        assert_eq!(bdd.triplet(0), None);
        assert_eq!(bdd.triplet(1), Some(Triplet { v: 0, low: 0, high: 0 }));

        let x = bdd.mk_var(3);
        assert_eq!(
            bdd.triplet(x.index()),
            Some(Triplet { v: 3, low: -1, high: 1 })
        );
        assert_eq!(bdd.triplet(x.index()).map(|t| t.to_string()), Some("(3, -1, 1)".to_string()));
        assert_eq!(bdd.triplet(x.index() + 1), None);
    }

    #[test]
    fn test_chains() {
        let bdd = Bdd::with_config(BddConfig::new(10).with_buckets_bits(1));

        assert_eq!(bdd.max_chain(), 0);
        for v in 1..=6 {
            bdd.mk_var(v);
        }
        let chains = bdd.chains();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains.iter().sum::<usize>(), 6);
        assert!(bdd.max_chain() >= 3);
    }
}
