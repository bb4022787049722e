//! Minimal And-Inverter Graph and its translation into BDDs.
//!
//! Nodes are numbered from 1 in creation order. An AND gate can only refer to
//! nodes created before it, so creation order is a topological order.

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Not;

use log::{debug, info};

use crate::bdd::Bdd;
use crate::reference::Ref;

/// A possibly negated edge to an AIG node, packed AIGER-style as `id << 1 | negated`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct AigRef(u32);

impl AigRef {
    pub const fn new(id: u32, negated: bool) -> Self {
        assert!(id != 0, "AIG node id should not be zero");
        Self(id << 1 | negated as u32)
    }

    pub const fn id(self) -> u32 {
        self.0 >> 1
    }

    pub const fn is_negated(self) -> bool {
        self.0 & 1 != 0
    }
}

impl Not for AigRef {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0 ^ 1)
    }
}

impl Display for AigRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_negated() {
            write!(f, "!")?;
        }
        write!(f, "n{}", self.id())
    }
}

impl Debug for AigRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AigNode {
    Input,
    And { left: AigRef, right: AigRef },
}

#[derive(Debug, Default, Clone)]
pub struct Aig {
    nodes: Vec<AigNode>,
    /// Layer of every node: 0 for inputs, `1 + max(children)` for gates.
    levels: Vec<usize>,
    inputs: Vec<u32>,
    outputs: Vec<AigRef>,
}

impl Aig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn inputs(&self) -> &[u32] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[AigRef] {
        &self.outputs
    }

    pub fn node(&self, id: u32) -> AigNode {
        assert!(
            id >= 1 && id as usize <= self.nodes.len(),
            "Unknown AIG node {}",
            id
        );
        self.nodes[id as usize - 1]
    }

    fn push(&mut self, node: AigNode, level: usize) -> AigRef {
        self.nodes.push(node);
        self.levels.push(level);
        AigRef::new(self.nodes.len() as u32, false)
    }

    pub fn add_input(&mut self) -> AigRef {
        let r = self.push(AigNode::Input, 0);
        self.inputs.push(r.id());
        r
    }

    pub fn add_and(&mut self, left: AigRef, right: AigRef) -> AigRef {
        let level = 1 + self.level(left.id()).max(self.level(right.id()));
        self.push(AigNode::And { left, right }, level)
    }

    pub fn add_or(&mut self, left: AigRef, right: AigRef) -> AigRef {
        !self.add_and(!left, !right)
    }

    pub fn add_xor(&mut self, left: AigRef, right: AigRef) -> AigRef {
        let a = self.add_and(left, !right);
        let b = self.add_and(!left, right);
        self.add_or(a, b)
    }

    pub fn add_output(&mut self, output: AigRef) {
        self.node(output.id());
        self.outputs.push(output);
    }

    /// A new output that is true iff `a` and `b` disagree.
    pub fn add_miter(&mut self, a: AigRef, b: AigRef) -> AigRef {
        let m = self.add_xor(a, b);
        self.add_output(m);
        m
    }

    fn level(&self, id: u32) -> usize {
        self.node(id);
        self.levels[id as usize - 1]
    }

    /// Node ids grouped by layer; layer 0 holds the inputs, gates only depend on earlier layers.
    pub fn layers(&self) -> Vec<Vec<u32>> {
        let depth = self.levels.iter().copied().max().map_or(0, |d| d + 1);
        let mut layers = vec![Vec::new(); depth];
        for (i, &level) in self.levels.iter().enumerate() {
            layers[level].push(i as u32 + 1);
        }
        layers
    }

    /// Values of all nodes, indexed by `id - 1`, for the given input values.
    pub fn eval(&self, input_values: &[bool]) -> Vec<bool> {
        assert_eq!(input_values.len(), self.inputs.len(), "Wrong number of input values");
        let mut values = vec![false; self.nodes.len()];
        let mut inputs = input_values.iter();
        for (i, node) in self.nodes.iter().enumerate() {
            let value = match *node {
                AigNode::Input => inputs.next().copied().unwrap_or_default(),
                AigNode::And { left, right } => {
                    let edge = |r: AigRef| values[r.id() as usize - 1] ^ r.is_negated();
                    edge(left) && edge(right)
                }
            };
            values[i] = value;
        }
        values
    }
}

impl Bdd {
    /// Build a BDD for every AIG node, layer by layer.
    ///
    /// The `k`-th input becomes variable `k`. When `gc_threshold` is set, garbage is
    /// collected after each layer in which the number of live nodes exceeds it; the
    /// nodes built so far are the roots.
    pub fn build_aig(&self, aig: &Aig, gc_threshold: Option<usize>) -> HashMap<u32, Ref> {
        let mut id2node: HashMap<u32, Ref> = HashMap::with_capacity(aig.size());

        for (k, &id) in aig.inputs().iter().enumerate() {
            let node = self.mk_var(k as i32 + 1);
            debug!("id2node[{}] = {} for input x{}", id, node, k + 1);
            id2node.insert(id, node);
        }

        let resolve = |id2node: &HashMap<u32, Ref>, r: AigRef| -> Ref {
            let node = match id2node.get(&r.id()) {
                Some(&node) => node,
                None => panic!("AIG node {} is used before it is built", r.id()),
            };
            node.negate_if(r.is_negated())
        };

        let layers = aig.layers();
        for (layer_id, layer) in layers.iter().enumerate().skip(1) {
            for &id in layer {
                let AigNode::And { left, right } = aig.node(id) else {
                    unreachable!("only inputs are in layer 0");
                };
                let node = self.apply_and(resolve(&id2node, left), resolve(&id2node, right));
                debug!("id2node[{}] = {} (size = {})", id, node, self.size(node));
                id2node.insert(id, node);
            }

            info!(
                "Built layer {}/{} of size {}, real_size = {}",
                layer_id,
                layers.len() - 1,
                layer.len(),
                self.real_size()
            );

            if let Some(threshold) = gc_threshold {
                if self.real_size() > threshold {
                    let roots: Vec<Ref> = id2node.values().copied().collect();
                    self.collect_garbage(&roots);
                }
            }
        }

        id2node
    }

    /// BDDs of the AIG outputs, in output order.
    pub fn aig_outputs(&self, aig: &Aig, id2node: &HashMap<u32, Ref>) -> Vec<Ref> {
        aig.outputs()
            .iter()
            .map(|r| match id2node.get(&r.id()) {
                Some(&node) => node.negate_if(r.is_negated()),
                None => panic!("AIG output {} was not built", r),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    /// Two-bit ripple-carry adder `a + b`, as sum bits and the carry.
    fn adder(aig: &mut Aig, a: &[AigRef], b: &[AigRef]) -> Vec<AigRef> {
        let mut outputs = Vec::new();
        let mut carry: Option<AigRef> = None;
        for (&x, &y) in a.iter().zip(b) {
            let s = aig.add_xor(x, y);
            let c = aig.add_and(x, y);
            match carry {
                None => {
                    outputs.push(s);
                    carry = Some(c);
                }
                Some(cin) => {
                    outputs.push(aig.add_xor(s, cin));
                    let t = aig.add_and(s, cin);
                    carry = Some(aig.add_or(c, t));
                }
            }
        }
        outputs.extend(carry);
        outputs
    }

    #[test]
    fn test_aig_ref() {
        let r = AigRef::new(5, false);
        assert_eq!(r.id(), 5);
        assert!(!r.is_negated());
        assert!((!r).is_negated());
        assert_eq!(!!r, r);
        assert_eq!(format!("{}", !r), "!n5");
    }

    #[test]
    fn test_layers() {
        let mut aig = Aig::new();
        let x = aig.add_input();
        let y = aig.add_input();
        let g1 = aig.add_and(x, !y);
        let g2 = aig.add_and(g1, y);
        let g3 = aig.add_and(!x, y);
        aig.add_output(g2);
        assert_eq!(
            aig.layers(),
            vec![vec![1, 2], vec![g1.id(), g3.id()], vec![g2.id()]]
        );
        assert!(Aig::new().layers().is_empty());
    }

    #[test]
    fn test_build_matches_eval() {
        let mut aig = Aig::new();
        let a: Vec<AigRef> = (0..2).map(|_| aig.add_input()).collect();
        let b: Vec<AigRef> = (0..2).map(|_| aig.add_input()).collect();
        for out in adder(&mut aig, &a, &b) {
            aig.add_output(out);
        }

        let bdd = Bdd::default();
        let id2node = bdd.build_aig(&aig, None);
        let outputs = bdd.aig_outputs(&aig, &id2node);
        assert_eq!(outputs.len(), 3);

        for bits in 0..16u32 {
            let inputs: Vec<bool> = (0..4).map(|i| bits & (1 << i) != 0).collect();
            let values = aig.eval(&inputs);
            for (r, &f) in aig.outputs().iter().zip(&outputs) {
                let expected = values[r.id() as usize - 1] ^ r.is_negated();
                assert_eq!(bdd.eval(f, &inputs), expected, "inputs = {:?}", inputs);
            }
        }
    }

    #[test]
    fn test_miter_of_equivalent_circuits() {
        let mut aig = Aig::new();
        let a: Vec<AigRef> = (0..2).map(|_| aig.add_input()).collect();
        let b: Vec<AigRef> = (0..2).map(|_| aig.add_input()).collect();
        let ab = adder(&mut aig, &a, &b);
        let ba = adder(&mut aig, &b, &a);
        let miters: Vec<AigRef> = ab.iter().zip(&ba).map(|(&x, &y)| aig.add_miter(x, y)).collect();
        let any = miters[1..].iter().fold(miters[0], |acc, &m| aig.add_or(acc, m));

        let bdd = Bdd::default();
        let id2node = bdd.build_aig(&aig, Some(1));
        assert!(bdd.is_zero(id2node[&any.id()].negate_if(any.is_negated())));
    }

    #[test]
    fn test_miter_of_different_circuits() {
        let mut aig = Aig::new();
        let x = aig.add_input();
        let y = aig.add_input();
        let f = aig.add_and(x, y);
        let g = aig.add_or(x, y);
        let m = aig.add_miter(f, g);

        let bdd = Bdd::default();
        let id2node = bdd.build_aig(&aig, None);
        let outputs = bdd.aig_outputs(&aig, &id2node);
        assert_eq!(outputs, vec![bdd.apply_xor(bdd.mk_var(1), bdd.mk_var(2))]);
        assert_eq!(outputs[0], id2node[&m.id()].negate_if(m.is_negated()));
        assert_eq!(bdd.one_sat(outputs[0], 2), vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_gc_between_layers_keeps_results() {
        let mut aig = Aig::new();
        let xs: Vec<AigRef> = (0..6).map(|_| aig.add_input()).collect();
        let mut acc = xs[0];
        for &x in &xs[1..] {
            acc = aig.add_xor(acc, x);
        }
        aig.add_output(acc);

        let with_gc = Bdd::default();
        let without_gc = Bdd::default();
        let a = with_gc.aig_outputs(&aig, &with_gc.build_aig(&aig, Some(0)));
        let b = without_gc.aig_outputs(&aig, &without_gc.build_aig(&aig, None));
        assert_eq!(with_gc.size(a[0]), without_gc.size(b[0]));
        assert_eq!(with_gc.sat_count(a[0], 6), without_gc.sat_count(b[0], 6));
        assert!(with_gc.real_size() <= without_gc.real_size());
    }
}
