//! Compilation of pseudo-Boolean constraints `Σ cᵢ·[litᵢ] ▷ rhs` into BDDs.
//!
//! Literals are processed in the given order by branch-and-bound: `sum` is the weight
//! of the literals taken so far and `material_left` the weight still available.
//! A branch is decided as soon as the bound is met (or can no longer be met) whatever
//! the remaining literals are, so the number of distinct `(index, sum)` states stays small.

use log::debug;

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::reference::Ref;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Relation {
    GreaterOrEqual,
    LessOrEqual,
}

struct Constraint<'a> {
    coeffs: &'a [i64],
    literals: &'a [i32],
    rhs: i64,
    relation: Relation,
}

impl Constraint<'_> {
    /// Decide the constraint on a partial path, if the remaining literals cannot change the outcome.
    fn decide(&self, sum: i64, material_left: i64) -> Option<bool> {
        match self.relation {
            Relation::GreaterOrEqual => {
                if sum >= self.rhs {
                    Some(true)
                } else if sum + material_left < self.rhs {
                    Some(false)
                } else {
                    None
                }
            }
            Relation::LessOrEqual => {
                if sum + material_left <= self.rhs {
                    Some(true)
                } else if sum > self.rhs {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

impl Bdd {
    /// BDD of `Σ coeffs[i]·[literals[i]] ≥ rhs`. Coefficients must be non-negative.
    pub fn pseudo_boolean_greater_than_or_equal(
        &self,
        coeffs: &[i64],
        literals: &[i32],
        rhs: i64,
    ) -> Ref {
        self.pseudo_boolean(Constraint {
            coeffs,
            literals,
            rhs,
            relation: Relation::GreaterOrEqual,
        })
    }

    /// BDD of `Σ coeffs[i]·[literals[i]] ≤ rhs`. Coefficients must be non-negative.
    pub fn pseudo_boolean_less_than_or_equal(
        &self,
        coeffs: &[i64],
        literals: &[i32],
        rhs: i64,
    ) -> Ref {
        self.pseudo_boolean(Constraint {
            coeffs,
            literals,
            rhs,
            relation: Relation::LessOrEqual,
        })
    }

    fn pseudo_boolean(&self, constraint: Constraint<'_>) -> Ref {
        assert_eq!(
            constraint.coeffs.len(),
            constraint.literals.len(),
            "Coefficients and literals must have the same length"
        );
        for (&c, &lit) in constraint.coeffs.iter().zip(constraint.literals) {
            assert!(c >= 0, "Coefficient {} is negative", c);
            assert_ne!(lit, 0, "Variable index should not be zero");
        }

        let name = match constraint.relation {
            Relation::GreaterOrEqual => "GTE",
            Relation::LessOrEqual => "LTE",
        };
        let mut cache = Cache::new(name);
        let material: i64 = constraint.coeffs.iter().sum();
        let res = self.pseudo_boolean_(&constraint, 0, 0, material, &mut cache);
        debug!(
            "pseudo_boolean({:?}, rhs = {}) -> {}, {}",
            constraint.relation,
            constraint.rhs,
            res,
            cache.stats()
        );
        res
    }

    fn pseudo_boolean_(
        &self,
        constraint: &Constraint<'_>,
        index: usize,
        sum: i64,
        material_left: i64,
        cache: &mut Cache<(usize, i64), Ref>,
    ) -> Ref {
        match constraint.decide(sum, material_left) {
            Some(true) => return self.one,
            Some(false) => return self.zero,
            None => {}
        }
        // With no literals left the constraint is always decided.
        debug_assert!(index < constraint.literals.len());

        let key = (index, sum);
        if let Some(res) = cache.get(&key) {
            return res;
        }

        let c = constraint.coeffs[index];
        let left = material_left - c;
        let take = self.pseudo_boolean_(constraint, index + 1, sum + c, left, cache);
        let skip = self.pseudo_boolean_(constraint, index + 1, sum, left, cache);
        let x = self.mk_var(constraint.literals[index]);
        let res = self.apply_ite(x, take, skip);

        cache.insert(key, res);
        res
    }
}
