//! Quantifier elimination and the relational product.

use log::debug;

use crate::bdd::Bdd;
use crate::cache::Cache;
use crate::reference::Ref;

fn sorted_vars(vars: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut vars: Vec<u32> = vars.into_iter().collect();
    for &v in &vars {
        assert_ne!(v, 0, "Variable index should not be zero");
    }
    vars.sort_unstable();
    vars.dedup();
    vars
}

impl Bdd {
    /// Existential quantification `∃ vars. f`.
    pub fn exists(&self, f: Ref, vars: impl IntoIterator<Item = u32>) -> Ref {
        let vars = sorted_vars(vars);
        let mut cache = Cache::new(format!("EXISTS({:?})", vars));
        let res = self.exists_(f, 0, &vars, &mut cache);
        debug!("exists(f = {}, vars = {:?}) -> {}, {}", f, vars, res, cache.stats());
        res
    }

    pub fn exists_var(&self, f: Ref, v: u32) -> Ref {
        self.exists(f, [v])
    }

    /// Universal quantification `∀ vars. f = ¬∃ vars. ¬f`.
    pub fn forall(&self, f: Ref, vars: impl IntoIterator<Item = u32>) -> Ref {
        -self.exists(-f, vars)
    }

    /// `vars` is sorted; `vars[..j]` are known to lie above `node`.
    fn exists_(&self, node: Ref, j: usize, vars: &[u32], cache: &mut Cache<Ref, Ref>) -> Ref {
        if self.is_terminal(node) {
            return node;
        }

        let v = self.variable(node.index());

        // Skip quantified variables that cannot occur below this node.
        let mut m = j;
        while m < vars.len() && vars[m] < v {
            m += 1;
        }
        if m == vars.len() {
            return node;
        }

        if let Some(res) = cache.get(&node) {
            return res;
        }

        let r0 = self.exists_(self.low_node(node), m, vars, cache);
        let r1 = self.exists_(self.high_node(node), m, vars, cache);

        let res = if vars[m] == v {
            self.apply_or(r0, r1)
        } else {
            self.mk_node(v, r0, r1)
        };
        cache.insert(node, res);
        res
    }

    /// Relational product `∃ vars. (f ∧ g)`, without building `f ∧ g` first.
    pub fn rel_product(&self, f: Ref, g: Ref, vars: impl IntoIterator<Item = u32>) -> Ref {
        let vars = sorted_vars(vars);
        let mut cache = Cache::new(format!("RELPROD({:?})", vars));
        let mut exists_cache = Cache::new(format!("EXISTS({:?})", vars));
        let res = self.rel_product_(f, g, &vars, &mut cache, &mut exists_cache);
        debug!(
            "rel_product(f = {}, g = {}, vars = {:?}) -> {}, {}, {}",
            f,
            g,
            vars,
            res,
            cache.stats(),
            exists_cache.stats()
        );
        res
    }

    fn rel_product_(
        &self,
        f: Ref,
        g: Ref,
        vars: &[u32],
        cache: &mut Cache<(Ref, Ref), Ref>,
        exists_cache: &mut Cache<Ref, Ref>,
    ) -> Ref {
        if self.is_zero(f) || self.is_zero(g) || f == -g {
            return self.zero;
        }
        if self.is_one(f) {
            return self.exists_(g, 0, vars, exists_cache);
        }
        if self.is_one(g) || f == g {
            return self.exists_(f, 0, vars, exists_cache);
        }

        let key = if f <= g { (f, g) } else { (g, f) };
        if let Some(res) = cache.get(&key) {
            return res;
        }

        let m = self.top_variable(&[f, g]);
        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let h0 = self.rel_product_(f0, g0, vars, cache, exists_cache);

        let res = if vars.binary_search(&m).is_ok() {
            if self.is_one(h0) {
                self.one
            } else {
                let h1 = self.rel_product_(f1, g1, vars, cache, exists_cache);
                self.apply_or(h0, h1)
            }
        } else {
            let h1 = self.rel_product_(f1, g1, vars, cache, exists_cache);
            self.mk_node(m, h0, h1)
        };

        cache.insert(key, res);
        res
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_exists() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);
        let x3 = bdd.mk_var(3);

        // f = ~x1~x2x3 + x1~x3 + x1x2
        let c1 = bdd.cube([-1, -2, 3]);
        let c2 = bdd.apply_and(x1, -x3);
        let c3 = bdd.apply_and(x1, x2);
        let f = bdd.apply_or_many([c1, c2, c3]);

        // ∃x3. f = x1 + ~x2
        assert_eq!(bdd.exists_var(f, 3), bdd.apply_or(x1, -x2));
        // ∃x1. f = 1
        assert_eq!(bdd.exists_var(f, 1), bdd.one);
        // ∃x2. (~x1 ∧ x2) = ~x1
        assert_eq!(bdd.exists_var(bdd.apply_and(-x1, x2), 2), -x1);
    }

    #[test]
    fn test_exists_many_and_unused() {
        let bdd = Bdd::default();

        let f = bdd.cube([1, -2, 3, 4]);
        assert_eq!(bdd.exists(f, [2, 4]), bdd.cube([1, 3]));
        assert_eq!(bdd.exists(f, [4, 2, 2]), bdd.cube([1, 3]));
        assert_eq!(bdd.exists(f, [5, 6]), f);
        assert_eq!(bdd.exists(f, []), f);
        assert_eq!(bdd.exists(f, [1, 2, 3, 4]), bdd.one);
        assert_eq!(bdd.exists(bdd.zero, [1]), bdd.zero);
    }

    #[test]
    fn test_forall() {
        let bdd = Bdd::default();

        let x1 = bdd.mk_var(1);
        let x2 = bdd.mk_var(2);

        let f = bdd.apply_or(x1, x2);
        assert_eq!(bdd.forall(f, [2]), x1);
        assert_eq!(bdd.forall(f, [1, 2]), bdd.zero);
        assert_eq!(bdd.forall(bdd.apply_or(x1, -x1), [1]), bdd.one);
    }

    #[test]
    fn test_rel_product() {
        let bdd = Bdd::default();

        let x: Vec<Ref> = (1..=4).map(|v| bdd.mk_var(v)).collect();
        let f = bdd.apply_xor(x[0], x[1]);
        let g = bdd.apply_or(bdd.apply_and(x[1], x[2]), x[3]);

        for vars in [vec![], vec![1], vec![2], vec![2, 4], vec![1, 2, 3, 4], vec![3]] {
            let expected = bdd.exists(bdd.apply_and(f, g), vars.clone());
            assert_eq!(bdd.rel_product(f, g, vars.clone()), expected, "vars = {:?}", vars);
        }
    }

    #[test]
    fn test_rel_product_terminals() {
        let bdd = Bdd::default();

        let f = bdd.apply_and(bdd.mk_var(1), bdd.mk_var(2));
        assert_eq!(bdd.rel_product(f, bdd.zero, [1]), bdd.zero);
        assert_eq!(bdd.rel_product(f, -f, [1]), bdd.zero);
        assert_eq!(bdd.rel_product(f, bdd.one, [1]), bdd.mk_var(2));
        assert_eq!(bdd.rel_product(bdd.one, f, [2]), bdd.mk_var(1));
        assert_eq!(bdd.rel_product(f, f, [1, 2]), bdd.one);
    }
}
