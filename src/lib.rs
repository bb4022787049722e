//! # nexus-bdd: Reduced Ordered Binary Decision Diagrams
//!
//! **`nexus-bdd`** is a BDD engine for combinational equivalence checking: circuits
//! given as And-Inverter Graphs are translated into canonical BDDs, and two outputs
//! are equivalent iff their miter is the constant zero.
//!
//! ## Representation
//!
//! - All operations go through the [`Bdd`][crate::bdd::Bdd] manager, which hash-conses
//!   nodes so that equal functions get equal [`Ref`][crate::reference::Ref]s.
//! - A `Ref` is a signed node index. The sign is a complement edge, so negation is free.
//! - Variables are 1-indexed (0 is reserved for the terminal node), like in DIMACS.
//! - Nodes live in a fixed-capacity storage allocated once, at construction.
//!   Unreachable nodes are reclaimed by an explicit [`collect_garbage`][crate::bdd::Bdd::collect_garbage] call.
//!
//! ## Basic Usage
//!
//! ```rust
//! use nexus_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//!
//! let x1 = bdd.mk_var(1);
//! let x2 = bdd.mk_var(2);
//!
//! // f = x1 AND (NOT x2)
//! let f = bdd.apply_and(x1, -x2);
//! assert!(!bdd.is_zero(f));
//! assert!(!bdd.is_one(f));
//! assert_eq!(f, bdd.cube([1, -2]));
//!
//! assert!(bdd.eval(f, &[true, false]));
//! assert_eq!(bdd.one_sat(f, 2), vec![Some(true), Some(false)]);
//!
//! // Only `f` survives the collection.
//! bdd.collect_garbage(&[f]);
//! assert_eq!(bdd.real_size(), bdd.size(f) as usize);
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: the manager, the canonicalizing node constructor and the ITE algebra.
//! - **[`compose`]**, **[`quant`]**, **[`pb`]**: substitution, quantification and pseudo-Boolean constraints.
//! - **[`gc`]**: reachability, node counting and garbage collection.
//! - **[`sat`]**: satisfying assignments and model counting.
//! - **[`aig`]**: And-Inverter Graphs and their translation into BDDs.

pub mod aig;
pub mod bdd;
pub mod cache;
pub mod compose;
pub mod config;
pub mod debug;
pub mod error;
pub mod gc;
pub mod node;
pub mod pb;
pub mod quant;
pub mod reference;
pub mod sat;
pub mod storage;
pub mod utils;
