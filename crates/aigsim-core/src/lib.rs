//! Sequential bit-parallel simulator for And-Inverter Graphs.
//!
//! This crate is the computational engine an inductive equivalence/
//! invariant prover drives: given a read-only [`aig::Circuit`] it
//! propagates randomized or user-supplied valuation vectors over a
//! configurable number of time frames, packing many independent
//! simulation patterns into `u32` words. It does not construct,
//! structurally hash, or topologically order AIGs -- that's the
//! caller's job; this crate only ever walks the orders it's handed.

pub mod aig;
pub mod arena;
pub mod assign;
pub mod cex;
pub mod dump;
pub mod error;
pub mod eval;
pub mod observe;
pub mod rng;
pub mod session;

#[cfg(test)]
pub(crate) mod testaig;

pub use aig::{Circuit, Fanin, NodeId};
pub use arena::Arena;
pub use cex::{CombModel, Witness};
pub use error::SimError;
pub use rng::SimRng;
pub use session::{simulate_comb, simulate_seq, Session};
