//! The [`Bdd`] engine: node storage, canonicalizing constructor and the ITE algebra.
//!
//! Functions are represented by signed [`Ref`]s into a fixed-capacity [`Storage`].
//! The engine keeps the following invariants for every internal node `(v, low, high)`:
//!
//! - children are the terminal or have a variable strictly greater than `v`;
//! - `high` is never negated (complement edges live on `low` and on references);
//! - `low != high`;
//! - at most one node exists per triple, which makes equality of functions
//!   equality of references.
//!
//! All operations take `&self`; the mutable state (storage, caches, pinned roots)
//! sits behind [`RefCell`]s, so a `Bdd` must not be shared between threads.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Debug;

use log::debug;

use crate::cache::{Cache, CacheStats};
use crate::config::BddConfig;
use crate::error::CapacityError;
use crate::node::Node;
use crate::reference::Ref;
use crate::storage::Storage;

/// Engine-wide operation caches. Call-scoped caches (compose, exists, ...) live elsewhere.
pub(crate) struct Caches {
    pub(crate) ite: Cache<(Ref, Ref, Ref), Ref>,
    pub(crate) and: Cache<(Ref, Ref), Ref>,
    pub(crate) or: Cache<(Ref, Ref), Ref>,
    pub(crate) xor: Cache<(Ref, Ref), Ref>,
    pub(crate) size: Cache<Ref, u64>,
}

impl Caches {
    fn new(bits: usize) -> Self {
        let capacity = 1 << bits;
        Self {
            ite: Cache::with_capacity("ITE", capacity),
            and: Cache::with_capacity("AND", capacity),
            or: Cache::with_capacity("OR", capacity),
            xor: Cache::with_capacity("XOR", capacity),
            size: Cache::with_capacity("SIZE", capacity),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.ite.clear();
        self.and.clear();
        self.or.clear();
        self.xor.clear();
        self.size.clear();
    }

    fn stats(&self) -> Vec<CacheStats> {
        vec![
            self.ite.stats(),
            self.and.stats(),
            self.or.stats(),
            self.xor.stats(),
            self.size.stats(),
        ]
    }
}

pub struct Bdd {
    pub(crate) storage: RefCell<Storage<Node>>,
    pub(crate) caches: RefCell<Caches>,
    pub(crate) non_garbage: RefCell<HashSet<Ref>>,
    pub zero: Ref,
    pub one: Ref,
}

impl Bdd {
    /// Create an engine with `2^storage_bits` node slots.
    pub fn new(storage_bits: usize) -> Self {
        Self::with_config(BddConfig::new(storage_bits))
    }

    pub fn with_config(config: BddConfig) -> Self {
        config.validate();

        let mut storage = Storage::new(config.storage_bits, config.buckets_bits);

        // The terminal node is not part of the unique table.
        let one = storage
            .try_add(Node::terminal())
            .unwrap_or_else(|e| panic!("{}", e));
        assert_eq!(one, 1, "Terminal node must be stored at index 1");
        let one = Ref::positive(one as u32);
        let zero = -one;

        Self {
            storage: RefCell::new(storage),
            caches: RefCell::new(Caches::new(config.cache_bits)),
            non_garbage: RefCell::new(HashSet::new()),
            zero,
            one,
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(20)
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("capacity", &storage.capacity())
            .field("size", &storage.size())
            .field("real_size", &storage.real_size())
            .field("buckets", &storage.num_buckets())
            .finish()
    }
}

// Statistics
impl Bdd {
    /// Total number of slots, including the reserved slot 0 and the terminal.
    pub fn capacity(&self) -> usize {
        self.storage.borrow().capacity()
    }
    /// Index of the last slot ever allocated.
    pub fn storage_size(&self) -> usize {
        self.storage.borrow().size()
    }
    /// Number of live nodes, including the terminal.
    pub fn real_size(&self) -> usize {
        self.storage.borrow().real_size()
    }

    pub fn cache_hits(&self) -> usize {
        self.named_cache_stats().iter().map(|s| s.hits).sum()
    }
    pub fn cache_misses(&self) -> usize {
        self.named_cache_stats().iter().map(|s| s.misses).sum()
    }
    pub fn named_cache_stats(&self) -> Vec<CacheStats> {
        self.caches.borrow().stats()
    }
}

// Node access
impl Bdd {
    pub fn variable(&self, index: usize) -> u32 {
        self.storage.borrow().value(index).variable
    }
    pub fn low(&self, index: usize) -> Ref {
        self.storage.borrow().value(index).low
    }
    pub fn high(&self, index: usize) -> Ref {
        self.storage.borrow().value(index).high
    }
    pub fn next(&self, index: usize) -> usize {
        self.storage.borrow().next(index)
    }

    /// Low child of `node`, with the sign of `node` pushed down.
    pub fn low_node(&self, node: Ref) -> Ref {
        self.low(node.index()).negate_if(node.is_negated())
    }
    /// High child of `node`, with the sign of `node` pushed down.
    pub fn high_node(&self, node: Ref) -> Ref {
        self.high(node.index()).negate_if(node.is_negated())
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.index() == self.one.index()
    }
}

impl Bdd {
    /// Canonicalizing node constructor.
    ///
    /// Requires `v > 0` and both children to be terminal or labelled with a variable
    /// greater than `v`. Returns [`CapacityError`] when a new node does not fit.
    pub fn try_mk_node(&self, v: u32, low: Ref, high: Ref) -> Result<Ref, CapacityError> {
        assert_ne!(v, 0, "Variable index should not be zero");

        // Handle canonicity
        if high.is_negated() {
            debug!("mk: restoring canonicity");
            return Ok(-self.try_mk_node(v, -low, -high)?);
        }

        // Handle duplicates
        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            return Ok(low);
        }

        {
            let storage = self.storage.borrow();
            for child in [low, high] {
                let w = storage.value(child.index()).variable;
                assert!(
                    w == 0 || w > v,
                    "Variable ordering violated: child {} has variable {}, parent has variable {}",
                    child,
                    w,
                    v
                );
            }
        }

        let i = self.storage.borrow_mut().try_put(Node::new(v, low, high))?;
        Ok(Ref::positive(i as u32))
    }

    /// Like [`Bdd::try_mk_node`], but exhausting the storage is fatal.
    pub fn mk_node(&self, v: u32, low: Ref, high: Ref) -> Ref {
        debug!("mk(v = {}, low = {}, high = {})", v, low, high);
        self.try_mk_node(v, low, high)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Create the function of a single literal: `x_v` for `v > 0`, `~x_|v|` for `v < 0`.
    pub fn mk_var(&self, v: i32) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        if v < 0 {
            -self.mk_var(-v)
        } else {
            self.mk_node(v as u32, self.zero, self.one)
        }
    }

    /// Literals ordered bottom-up (largest variable first) with repeats removed,
    /// or `None` if some variable occurs with both signs.
    fn sorted_literals(literals: impl IntoIterator<Item = i32>) -> Option<Vec<i32>> {
        let mut literals = literals.into_iter().collect::<Vec<_>>();
        for &lit in &literals {
            assert_ne!(lit, 0, "Variable index should not be zero");
        }
        literals.sort_unstable_by_key(|&lit| (std::cmp::Reverse(lit.unsigned_abs()), lit));
        literals.dedup();
        if literals.windows(2).any(|w| w[0] == -w[1]) {
            return None;
        }
        Some(literals)
    }

    /// Conjunction of literals, built bottom-up without the apply machinery.
    ///
    /// Repeated literals are ignored. A variable occurring with both signs gives `zero`.
    pub fn cube(&self, literals: impl IntoIterator<Item = i32>) -> Ref {
        let Some(literals) = Self::sorted_literals(literals) else {
            debug!("cube: complementary literals");
            return self.zero;
        };
        debug!("cube(literals = {:?})", literals);
        let mut current = self.one;
        for lit in literals {
            let v = lit.unsigned_abs();
            current = if lit < 0 {
                self.mk_node(v, current, self.zero)
            } else {
                self.mk_node(v, self.zero, current)
            };
        }
        current
    }

    /// Disjunction of literals. A variable occurring with both signs gives `one`.
    pub fn clause(&self, literals: impl IntoIterator<Item = i32>) -> Ref {
        let Some(literals) = Self::sorted_literals(literals) else {
            debug!("clause: complementary literals");
            return self.one;
        };
        debug!("clause(literals = {:?})", literals);
        let mut current = self.zero;
        for lit in literals {
            let v = lit.unsigned_abs();
            current = if lit < 0 {
                self.mk_node(v, self.one, current)
            } else {
                self.mk_node(v, current, self.one)
            };
        }
        current
    }

    /// One clause per literal list.
    pub fn axioms<I>(&self, clauses: impl IntoIterator<Item = I>) -> Vec<Ref>
    where
        I: IntoIterator<Item = i32>,
    {
        clauses.into_iter().map(|c| self.clause(c)).collect()
    }

    /// Cofactors of `node` with respect to `v`, which must not be below the top variable.
    pub fn top_cofactors(&self, node: Ref, v: u32) -> (Ref, Ref) {
        assert_ne!(v, 0, "Variable index should not be zero");

        let i = node.index();
        if self.is_terminal(node) || v < self.variable(i) {
            return (node, node);
        }
        assert_eq!(v, self.variable(i));
        (self.low_node(node), self.high_node(node))
    }

    /// Smallest variable among the non-terminal arguments.
    pub(crate) fn top_variable(&self, nodes: &[Ref]) -> u32 {
        nodes
            .iter()
            .filter(|&&n| !self.is_terminal(n))
            .map(|n| self.variable(n.index()))
            .min()
            .unwrap_or(0)
    }
}

// ITE and the binary apply algorithms
impl Bdd {
    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(x, y, z) = (x ∧ y) ∨ (¬x ∧ z)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.mk_var(1);
    /// let y = bdd.mk_var(2);
    /// let z = bdd.mk_var(3);
    /// let f = bdd.apply_ite(x, y, z);
    /// assert_eq!(f, bdd.mk_node(1, z, y));
    /// let x_and_y = bdd.apply_and(x, y);
    /// let not_x_and_z = bdd.apply_and(-x, z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Ref {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);

        // ite(1,G,H) => G
        if self.is_one(f) {
            return g;
        }
        // ite(0,G,H) => H
        if self.is_zero(f) {
            return h;
        }

        // ite(F,1,H) == ite(F,F,H) == F ∨ H
        if self.is_one(g) || f == g {
            debug!("ite(F,1,H) => F ∨ H");
            return self.apply_or(f, h);
        }
        // ite(F,0,H) == ite(F,~F,H) == ~F ∧ H
        if self.is_zero(g) || f == -g {
            debug!("ite(F,0,H) => ~F ∧ H");
            return self.apply_and(-f, h);
        }
        // ite(F,G,0) == ite(F,G,F) == F ∧ G
        if self.is_zero(h) || f == h {
            debug!("ite(F,G,0) => F ∧ G");
            return self.apply_and(f, g);
        }
        // ite(F,G,1) == ite(F,G,~F) == ~F ∨ G
        if self.is_one(h) || f == -h {
            debug!("ite(F,G,1) => ~F ∨ G");
            return self.apply_or(-f, g);
        }
        // ite(F,G,G) => G
        if g == h {
            return g;
        }
        // ite(F,G,~G) == F <-> G == F ^ ~G
        if g == -h {
            debug!("ite(F,G,~G) => F ^ H");
            return self.apply_xor(f, h);
        }

        // From here on, there are no constants.
        debug_assert!(!self.is_terminal(f));
        debug_assert!(!self.is_terminal(g));
        debug_assert!(!self.is_terminal(h));

        let (mut f, mut g, mut h) = (f, g, h);

        // ite(~F,G,H) => ite(F,H,G)
        if f.is_negated() {
            f = -f;
            std::mem::swap(&mut g, &mut h);
        }
        // ite(F,~G,H) => ~ite(F,G,~H)
        let mut n = false;
        if g.is_negated() {
            n = true;
            g = -g;
            h = -h;
        }

        let key = (f, g, h);
        let cached = self.caches.borrow_mut().ite.get(&key);
        if let Some(res) = cached {
            debug!("cache: apply_ite{:?} -> {}", key, res);
            return res.negate_if(n);
        }

        let m = self.top_variable(&[f, g, h]);
        debug!("min variable = {}", m);

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let t = self.apply_ite(f1, g1, h1);
        let e = self.apply_ite(f0, g0, h0);

        let res = self.mk_node(m, e, t);
        debug!("computed: apply_ite{:?} -> {}", key, res);
        self.caches.borrow_mut().ite.insert(key, res);

        res.negate_if(n)
    }

    /// Bryant's apply: recurse on the cofactors w.r.t. the top variable of `u` and `v`.
    fn apply_binary(&self, u: Ref, v: Ref, op: fn(&Self, Ref, Ref) -> Ref) -> Ref {
        debug_assert!(!self.is_terminal(u));
        debug_assert!(!self.is_terminal(v));

        let m = self.top_variable(&[u, v]);
        let (u0, u1) = self.top_cofactors(u, m);
        let (v0, v1) = self.top_cofactors(v, m);
        let w0 = op(self, u0, v0);
        let w1 = op(self, u1, v1);
        self.mk_node(m, w0, w1)
    }

    /// Commutative operations share one cache entry for `(u, v)` and `(v, u)`.
    fn commutative_key(u: Ref, v: Ref) -> (Ref, Ref) {
        if u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        -f
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_and(u = {}, v = {})", u, v);

        if self.is_zero(u) || self.is_zero(v) {
            return self.zero;
        }
        if self.is_one(u) {
            return v;
        }
        if self.is_one(v) {
            return u;
        }
        if u == v {
            return u;
        }
        if u == -v {
            return self.zero;
        }

        let key = Self::commutative_key(u, v);
        let cached = self.caches.borrow_mut().and.get(&key);
        if let Some(res) = cached {
            return res;
        }
        let res = self.apply_binary(u, v, Self::apply_and);
        self.caches.borrow_mut().and.insert(key, res);
        res
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_or(u = {}, v = {})", u, v);

        if self.is_one(u) || self.is_one(v) {
            return self.one;
        }
        if self.is_zero(u) {
            return v;
        }
        if self.is_zero(v) {
            return u;
        }
        if u == v {
            return u;
        }
        if u == -v {
            return self.one;
        }

        let key = Self::commutative_key(u, v);
        let cached = self.caches.borrow_mut().or.get(&key);
        if let Some(res) = cached {
            return res;
        }
        let res = self.apply_binary(u, v, Self::apply_or);
        self.caches.borrow_mut().or.insert(key, res);
        res
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_xor(u = {}, v = {})", u, v);

        if self.is_one(u) {
            return -v;
        }
        if self.is_one(v) {
            return -u;
        }
        if self.is_zero(u) {
            return v;
        }
        if self.is_zero(v) {
            return u;
        }
        if u == v {
            return self.zero;
        }
        if u == -v {
            return self.one;
        }

        let key = Self::commutative_key(u, v);
        let cached = self.caches.borrow_mut().xor.get(&key);
        if let Some(res) = cached {
            return res;
        }
        let res = self.apply_binary(u, v, Self::apply_xor);
        self.caches.borrow_mut().xor.insert(key, res);
        res
    }

    pub fn apply_eq(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_eq(u = {}, v = {})", u, v);
        -self.apply_xor(u, v)
    }

    pub fn apply_imply(&self, u: Ref, v: Ref) -> Ref {
        debug!("apply_imply(u = {}, v = {})", u, v);
        self.apply_or(-u, v)
    }

    /// Left fold of [`Bdd::apply_and`].
    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = self.one;
        for node in nodes {
            res = self.apply_and(res, node);
        }
        res
    }

    /// Left fold of [`Bdd::apply_or`].
    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        let mut res = self.zero;
        for node in nodes {
            res = self.apply_or(res, node);
        }
        res
    }

    /// Conjunction of all `nodes`, always joining the two smallest BDDs first.
    pub fn cojoin_tree(&self, nodes: impl IntoIterator<Item = Ref>) -> Ref {
        use std::cmp::Reverse;
        use std::collections::BinaryHeap;

        let mut queue: BinaryHeap<Reverse<(u64, Ref)>> = nodes
            .into_iter()
            .map(|node| Reverse((self.size(node), node)))
            .collect();

        loop {
            let Some(Reverse((_, a))) = queue.pop() else {
                return self.one;
            };
            let Some(Reverse((_, b))) = queue.pop() else {
                return a;
            };
            let r = self.apply_and(a, b);
            queue.push(Reverse((self.size(r), r)));
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_var() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);

        assert_eq!(bdd.variable(x.index()), 1);
        assert_eq!(bdd.high_node(x), bdd.one);
        assert_eq!(bdd.low_node(x), bdd.zero);
    }

    #[test]
    fn test_not_var() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let not_x = bdd.mk_var(-1);

        assert_eq!(not_x, -x);
        assert_eq!(bdd.variable(not_x.index()), 1);
        assert_eq!(bdd.high_node(not_x), bdd.zero);
        assert_eq!(bdd.low_node(not_x), bdd.one);
    }

    #[test]
    fn test_terminal() {
        let bdd = Bdd::default();

        assert!(bdd.is_terminal(bdd.zero));
        assert!(bdd.is_zero(bdd.zero));
        assert!(!bdd.is_one(bdd.zero));

        assert!(bdd.is_terminal(bdd.one));
        assert!(!bdd.is_zero(bdd.one));
        assert!(bdd.is_one(bdd.one));

        assert_eq!(bdd.one.get(), 1);
        assert_eq!(bdd.zero.get(), -1);
        assert_eq!(bdd.variable(bdd.one.index()), 0);
        assert_eq!(bdd.real_size(), 1);
    }

    #[test]
    fn test_mk_node_idempotent() {
        let bdd = Bdd::default();

        let x3 = bdd.mk_var(3);
        let a = bdd.mk_node(2, x3, -x3);
        let b = bdd.mk_node(2, x3, -x3);
        assert_eq!(a, b);
        let size = bdd.storage_size();
        bdd.mk_node(2, x3, -x3);
        assert_eq!(bdd.storage_size(), size);
    }

    #[test]
    fn test_mk_node_complement_canonicity() {
        let bdd = Bdd::default();

        let x3 = bdd.mk_var(3);
        let g1 = bdd.mk_node(2, x3, -x3);
        let g2 = bdd.mk_node(2, -x3, x3);
        assert_eq!(g1, -g2);
        assert!(!bdd.high(g1.index()).is_negated());

        let f = bdd.mk_node(1, g2, g1);
        assert!(!bdd.high(f.index()).is_negated());
        assert_eq!(bdd.high_node(f), g1);
        assert_eq!(bdd.low_node(f), g2);
    }

    #[test]
    fn test_mk_node_redundant() {
        let bdd = Bdd::default();

        let x2 = bdd.mk_var(2);
        assert_eq!(bdd.mk_node(1, x2, x2), x2);
        assert_eq!(bdd.mk_node(1, bdd.one, bdd.one), bdd.one);
    }

    #[test]
    #[should_panic(expected = "Variable ordering violated")]
    fn test_mk_node_ordering_violation() {
        let bdd = Bdd::default();
        let x1 = bdd.mk_var(1);
        bdd.mk_node(2, bdd.zero, x1);
    }

    #[test]
    #[should_panic(expected = "Variable index should not be zero")]
    fn test_mk_var_zero() {
        let bdd = Bdd::default();
        bdd.mk_var(0);
    }

    #[test]
    #[should_panic(expected = "Storage is full")]
    fn test_storage_full() {
        let bdd = Bdd::new(2);
        bdd.mk_var(1);
        bdd.mk_var(2);
        bdd.mk_var(3);
    }

    #[test]
    fn test_try_mk_node_reports_capacity() {
        let bdd = Bdd::new(2);
        bdd.mk_var(1);
        bdd.mk_var(2);
        assert_eq!(
            bdd.try_mk_node(3, bdd.zero, bdd.one),
            Err(CapacityError::StorageFull { capacity: 4 })
        );
        // Existing nodes are still found.
        assert_eq!(bdd.try_mk_node(1, bdd.zero, bdd.one), Ok(bdd.mk_var(1)));
    }

    #[test]
    fn test_cube() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let x3 = bdd.mk_var(3);

        let f = bdd.apply_and(bdd.apply_and(x1, x2), x3);
        assert_eq!(f, bdd.cube([1, 2, 3]));
        assert_eq!(f, bdd.cube([3, 1, 2]));

        let f = bdd.apply_and(bdd.apply_and(x1, -x2), -x3);
        assert_eq!(f, bdd.cube([1, -2, -3]));
        assert_eq!(bdd.cube([]), bdd.one);
    }

    #[test]
    fn test_clause() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let x3 = bdd.mk_var(3);

        let f = bdd.apply_or(bdd.apply_or(x1, x2), x3);
        assert_eq!(f, bdd.clause([1, 2, 3]));

        let f = bdd.apply_or(bdd.apply_or(x1, -x2), -x3);
        assert_eq!(f, bdd.clause([-3, 1, -2]));
        assert_eq!(bdd.clause([]), bdd.zero);
    }

    #[test]
    fn test_cube_with_repeated_literals() {
        let bdd = Bdd::default();

        assert_eq!(bdd.cube([1, 2, 1]), bdd.cube([1, 2]));
        assert_eq!(bdd.cube([-3, 2, -3, -3]), bdd.cube([2, -3]));
        assert_eq!(bdd.cube([1, -1]), bdd.zero);
        assert_eq!(bdd.cube([2, 1, 3, -2]), bdd.zero);
    }

    #[test]
    fn test_clause_with_repeated_literals() {
        let bdd = Bdd::default();

        assert_eq!(bdd.clause([3, 3]), bdd.mk_var(3));
        assert_eq!(bdd.clause([-1, 2, -1]), bdd.clause([-1, 2]));
        assert_eq!(bdd.clause([4, -4]), bdd.one);
        assert_eq!(bdd.clause([1, -2, 2]), bdd.one);

        let axioms = bdd.axioms([vec![1, 1], vec![2, -2]]);
        assert_eq!(axioms, vec![bdd.mk_var(1), bdd.one]);
    }

    #[test]
    fn test_axioms() {
        let bdd = Bdd::default();

        let clauses = bdd.axioms([vec![1, 2], vec![-1], vec![-2, 3]]);
        assert_eq!(clauses.len(), 3);
        let f = bdd.apply_and_many(clauses.iter().copied());
        assert_eq!(f, bdd.cube([-1, 2, 3]));
        assert_eq!(bdd.cojoin_tree(clauses), f);
    }

    #[test]
    fn test_de_morgan() {
        let bdd = Bdd::default();

        let x = bdd.mk_var(1);
        let y = bdd.mk_var(2);

        assert_eq!(-bdd.apply_and(x, y), bdd.apply_or(-x, -y));
        assert_eq!(-bdd.apply_or(x, y), bdd.apply_and(-x, -y));
    }

    #[test]
    fn test_complement_laws() {
        let bdd = Bdd::default();

        let f = bdd.apply_xor(bdd.mk_var(1), bdd.apply_and(bdd.mk_var(2), bdd.mk_var(3)));
        assert_eq!(-(-f), f);
        assert_eq!(bdd.apply_and(f, -f), bdd.zero);
        assert_eq!(bdd.apply_or(f, -f), bdd.one);
        assert_eq!(bdd.apply_xor(f, f), bdd.zero);
        assert_eq!(bdd.apply_xor(f, -f), bdd.one);
        assert_eq!(bdd.apply_eq(f, f), bdd.one);
    }

    #[test]
    fn test_apply_ite() {
        let bdd = Bdd::default();

        let g = bdd.mk_var(2);
        let h = bdd.mk_var(3);
        assert_eq!(bdd.apply_ite(bdd.one, g, h), g);
        assert_eq!(bdd.apply_ite(bdd.zero, g, h), h);

        let f = bdd.mk_node(1, bdd.one, h);
        assert_eq!(bdd.apply_ite(f, f, h), bdd.apply_or(f, h));
        assert_eq!(bdd.apply_ite(f, g, f), bdd.apply_and(f, g));
        assert_eq!(bdd.apply_ite(f, -g, bdd.one), -bdd.apply_and(f, g));
        assert_eq!(bdd.apply_ite(f, bdd.zero, -h), -bdd.apply_or(f, h));
        assert_eq!(bdd.apply_ite(f, g, g), g);
        assert_eq!(bdd.apply_ite(f, bdd.one, bdd.zero), f);
        assert_eq!(bdd.apply_ite(f, bdd.zero, bdd.one), -f);
        assert_eq!(bdd.apply_ite(f, g, -g), bdd.apply_eq(f, g));

        let f = bdd.mk_var(6);
        let g = bdd.mk_var(7);
        let h = bdd.mk_var(8);
        assert_eq!(bdd.apply_ite(-f, -g, -h), bdd.mk_node(6, -g, -h));
    }

    #[test]
    fn test_ite_distinguishes_conditions_with_same_top_variable() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let g = bdd.mk_var(3);
        let h = bdd.mk_var(4);

        let a = bdd.apply_ite(x1, g, h);
        let f = bdd.apply_and(x1, x2);
        let b = bdd.apply_ite(f, g, h);
        assert_ne!(a, b);
        let expected = bdd.apply_or(bdd.apply_and(f, g), bdd.apply_and(-f, h));
        assert_eq!(b, expected);
    }

    #[test]
    fn test_negation_in_ite_cache() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let x3 = bdd.mk_var(3);

        let f = bdd.apply_ite(x1, -x2, x3);
        let g = bdd.apply_ite(x1, -x2, x3);
        assert_eq!(f, g);
        let h = bdd.apply_ite(x1, x2, -x3);
        assert_eq!(h, -f);
    }

    #[test]
    fn test_equivalence_scenario() {
        let bdd = Bdd::default();

        let y = bdd.mk_var(1);
        let x1 = bdd.mk_var(2);
        let x2 = bdd.mk_var(3);
        let t = bdd.apply_and(x1, x2);
        let f = bdd.apply_eq(y, t);
        let cube23 = bdd.cube([2, 3]);
        let g = bdd.apply_and(f, cube23);
        assert_eq!(g, bdd.cube([1, 2, 3]));
    }

    #[test]
    fn test_cache_counters() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        bdd.apply_and(x1, x2);
        let misses = bdd.cache_misses();
        assert!(misses > 0);
        bdd.apply_and(x2, x1);
        assert!(bdd.cache_hits() > 0);
        let names: Vec<String> = bdd.named_cache_stats().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["ITE", "AND", "OR", "XOR", "SIZE"]);
    }
}
