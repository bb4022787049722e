//! Reachability and mark-and-sweep garbage collection.
//!
//! A node survives [`Bdd::collect_garbage`] iff it is reachable from the given roots
//! or from the pinned set. Engine caches are cleared on every collection, since their
//! entries may point to reclaimed slots.

use std::collections::HashSet;

use log::{debug, info};

use crate::bdd::Bdd;
use crate::reference::Ref;

impl Bdd {
    /// Indices of all nodes reachable from `nodes`, ignoring signs. Always contains the terminal.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<usize> {
        let terminal = self.one.index();
        let mut visited = HashSet::from([terminal]);
        let mut stack: Vec<usize> = nodes
            .into_iter()
            .map(Ref::index)
            .filter(|&i| i != terminal)
            .collect();

        let storage = self.storage.borrow();
        while let Some(i) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            let node = storage.value(i);
            stack.extend(
                [node.low.index(), node.high.index()]
                    .into_iter()
                    .filter(|j| !visited.contains(j)),
            );
        }

        visited
    }

    /// Number of nodes in the BDD rooted at `f`, including the terminal.
    pub fn size(&self, f: Ref) -> u64 {
        let cached = self.caches.borrow_mut().size.get(&f);
        if let Some(size) = cached {
            debug!("cache: size({}) -> {}", f, size);
            return size;
        }
        let size = self.descendants([f]).len() as u64;
        debug!("computed: size({}) -> {}", f, size);
        self.caches.borrow_mut().size.insert(f, size);
        size
    }

    /// Keep `node` alive across all subsequent collections, until [`Bdd::unpin`].
    pub fn pin(&self, node: Ref) {
        self.non_garbage.borrow_mut().insert(node);
    }

    pub fn unpin(&self, node: Ref) -> bool {
        self.non_garbage.borrow_mut().remove(&node)
    }

    pub fn pinned(&self) -> Vec<Ref> {
        self.non_garbage.borrow().iter().copied().collect()
    }

    /// Drop every node not reachable from `roots` or the pinned set.
    ///
    /// References to dropped nodes become dangling; their slots are handed out again
    /// by later allocations.
    pub fn collect_garbage(&self, roots: &[Ref]) {
        debug!("Collecting garbage...");
        let before = self.real_size();

        self.caches.borrow_mut().clear();

        let pinned = self.pinned();
        let alive = self.descendants(roots.iter().chain(&pinned).copied());
        debug!("Alive nodes: {}", alive.len());

        let mut storage = self.storage.borrow_mut();
        for i in 0..storage.num_buckets() {
            let mut index = storage.bucket(i);
            if index == 0 {
                continue;
            }

            debug!("Cleaning bucket #{} pointing to {}", i, index);

            while index != 0 && !alive.contains(&index) {
                let next = storage.next(index);
                debug!("Dropping {}, next = {}", index, next);
                storage.drop(index);
                index = next;
            }

            if storage.bucket(i) != index {
                debug!("Relinking bucket #{} to {}", i, index);
                storage.set_bucket(i, index);
            }

            let mut prev = index;
            while prev != 0 {
                let mut cur = storage.next(prev);
                while cur != 0 && !alive.contains(&cur) {
                    let next = storage.next(cur);
                    debug!("Dropping {}, prev = {}, next = {}", cur, prev, next);
                    storage.drop(cur);
                    cur = next;
                }
                if storage.next(prev) != cur {
                    debug!("Relinking next({}) from {} to {}", prev, storage.next(prev), cur);
                    storage.set_next(prev, cur);
                }
                prev = cur;
            }
        }

        info!(
            "GC: {} -> {} nodes ({} roots, {} pinned)",
            before,
            storage.real_size(),
            roots.len(),
            pinned.len()
        );
    }
}
