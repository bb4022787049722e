//! Variable substitution: `f[v := g]` and cofactoring by constants.
//!
//! Every public entry point allocates its own cache: the meaning of a cached
//! `(f, g)` pair depends on the substituted variable.

use std::collections::HashMap;

use log::debug;

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::reference::Ref;

impl Bdd {
    /// Functional composition `f[v := g]`.
    pub fn compose(&self, f: Ref, v: u32, g: Ref) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        let mut cache = Cache::new(format!("COMPOSE({})", v));
        let res = self.compose_(f, v, g, &mut cache);
        debug!("compose(f = {}, v = {}, g = {}) -> {}, {}", f, v, g, res, cache.stats());
        res
    }

    fn compose_(&self, f: Ref, v: u32, g: Ref, cache: &mut Cache<(Ref, Ref), Ref>) -> Ref {
        if self.is_terminal(f) {
            return f;
        }

        let i = self.variable(f.index());
        if v < i {
            // 'f' does not depend on 'v'
            return f;
        }

        let key = (f, g);
        if let Some(res) = cache.get(&key) {
            return res;
        }

        let res = if v == i {
            self.apply_ite(g, self.high_node(f), self.low_node(f))
        } else {
            let m = self.top_variable(&[f, g]);
            let (f0, f1) = self.top_cofactors(f, m);
            let (g0, g1) = self.top_cofactors(g, m);
            let h0 = self.compose_(f0, v, g0, cache);
            let h1 = self.compose_(f1, v, g1, cache);
            self.mk_node(m, h0, h1)
        };

        cache.insert(key, res);
        res
    }

    /// Substitution `f[v := g]`, computed as `ite(g, f|v=1, f|v=0)`.
    ///
    /// Same function as [`Bdd::compose`]; cheaper when `g` is large and `f` depends on `v` near the bottom.
    pub fn substitute(&self, f: Ref, v: u32, g: Ref) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        let mut cache = Cache::new(format!("SUBSTITUTE({})", v));
        let f1 = self.restrict_(f, v, self.one, &mut cache);
        let f0 = self.restrict_(f, v, self.zero, &mut cache);
        let res = self.apply_ite(g, f1, f0);
        debug!("substitute(f = {}, v = {}, g = {}) -> {}, {}", f, v, g, res, cache.stats());
        res
    }

    /// Cofactor `f|v<-b`.
    pub fn restrict(&self, f: Ref, v: u32, b: bool) -> Ref {
        assert_ne!(v, 0, "Variable index should not be zero");
        let mut cache = Cache::new(format!("RESTRICT({})", v));
        let value = if b { self.one } else { self.zero };
        self.restrict_(f, v, value, &mut cache)
    }

    /// `value` is a terminal; it is part of the key so both cofactors can share a cache.
    fn restrict_(&self, f: Ref, v: u32, value: Ref, cache: &mut Cache<(Ref, Ref), Ref>) -> Ref {
        debug_assert!(self.is_terminal(value));

        if self.is_terminal(f) {
            return f;
        }

        let i = self.variable(f.index());
        if v < i {
            return f;
        }
        if v == i {
            return if self.is_one(value) {
                self.high_node(f)
            } else {
                self.low_node(f)
            };
        }

        let key = (f, value);
        if let Some(res) = cache.get(&key) {
            return res;
        }

        let low = self.restrict_(self.low_node(f), v, value, cache);
        let high = self.restrict_(self.high_node(f), v, value, cache);
        let res = self.mk_node(i, low, high);
        cache.insert(key, res);
        res
    }

    /// Cofactor by several variables at once.
    pub fn restrict_multi(&self, f: Ref, values: &HashMap<u32, bool>) -> Ref {
        if values.is_empty() {
            return f;
        }
        let mut cache = Cache::new("RESTRICT_MULTI");
        let res = self.restrict_multi_(f, values, &mut cache);
        debug!("restrict_multi(f = {}) -> {}, {}", f, res, cache.stats());
        res
    }

    /// Results are cached per regular node: restricting `~f` is `~(f restricted)`.
    fn restrict_multi_(
        &self,
        f: Ref,
        values: &HashMap<u32, bool>,
        cache: &mut Cache<Ref, Ref>,
    ) -> Ref {
        if self.is_terminal(f) {
            return f;
        }
        let node = f.regular();

        let res = match cache.get(&node) {
            Some(res) => res,
            None => {
                let v = self.variable(node.index());
                let (low, high) = (self.low_node(node), self.high_node(node));
                let res = match values.get(&v) {
                    Some(&value) => {
                        let child = if value { high } else { low };
                        self.restrict_multi_(child, values, cache)
                    }
                    None => {
                        let low = self.restrict_multi_(low, values, cache);
                        let high = self.restrict_multi_(high, values, cache);
                        self.mk_node(v, low, high)
                    }
                };
                cache.insert(node, res);
                res
            }
        };
        res.negate_if(f.is_negated())
    }
}
