use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Returns one satisfying assignment of `node` over variables `1..=n`.
    ///
    /// Element `v - 1` holds the value of variable `v`, or `None` if the variable is
    /// not on the chosen path. High branches are preferred. The result is empty iff
    /// `node` is the constant false function.
    pub fn one_sat(&self, node: Ref, n: usize) -> Vec<Option<bool>> {
        let mut model = vec![None; n];
        if self.one_sat_(node, &mut model) {
            model
        } else {
            Vec::new()
        }
    }

    fn one_sat_(&self, node: Ref, model: &mut [Option<bool>]) -> bool {
        if self.is_terminal(node) {
            return self.is_one(node);
        }

        let v = self.variable(node.index()) as usize;
        assert!(v <= model.len(), "Variable {} is out of range 1..={}", v, model.len());

        model[v - 1] = Some(true);
        if self.one_sat_(self.high_node(node), model) {
            return true;
        }
        model[v - 1] = Some(false);
        if self.one_sat_(self.low_node(node), model) {
            return true;
        }
        model[v - 1] = None;
        false
    }

    /// Number of satisfying assignments of `node` over `num_vars` variables.
    pub fn sat_count(&self, node: Ref, num_vars: usize) -> BigUint {
        let mut cache = HashMap::new();
        let max = BigUint::from(1u32) << num_vars;
        self.sat_count_(node, &max, &mut cache)
    }

    fn sat_count_(&self, node: Ref, max: &BigUint, cache: &mut HashMap<Ref, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::ZERO;
        } else if self.is_one(node) {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        // Each child covers half of the assignments, whichever variables it skips.
        let count_low = self.sat_count_(self.low(node.index()), max, cache);
        let count_high = self.sat_count_(self.high(node.index()), max, cache);
        let count: BigUint = (count_low + count_high) >> 1;
        let count = if node.is_negated() { max - count } else { count };

        cache.insert(node, count.clone());
        count
    }

    /// Value of `node` under `assignment`, where `assignment[v - 1]` is the value of variable `v`.
    pub fn eval(&self, node: Ref, assignment: &[bool]) -> bool {
        let mut current = node;
        while !self.is_terminal(current) {
            let v = self.variable(current.index()) as usize;
            current = if assignment[v - 1] {
                self.high_node(current)
            } else {
                self.low_node(current)
            };
        }
        self.is_one(current)
    }
}
