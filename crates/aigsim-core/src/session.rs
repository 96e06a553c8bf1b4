//! Frame driver and session lifecycle (C5, C8).
//!
//! A [`Session`] owns exactly one [`Arena`] pinned to one [`Circuit`]
//! for its whole lifetime -- there is a single constructor path, no
//! grow, and the arena is never shared between concurrent sessions.

use crate::aig::Circuit;
use crate::arena::Arena;
use crate::assign;
use crate::eval::{self, Scratch};
use crate::observe;
use crate::rng::SimRng;

/// Owns the simulation arena and drives evaluation across frames for
/// one circuit. Never shared across threads: every method takes
/// `&mut self`, and there is no `Sync` impl.
pub struct Session {
    arena: Arena,
    scratch: Scratch,
    /// Set by [`Session::simulate_seq`] / [`Session::resimulate_seq`]:
    /// true iff any true PO has a non-zero bit in the scanned range.
    pub non_const_out: bool,
}

impl Session {
    /// Allocates a zero-initialized session over `circuit`.
    pub fn allocate<C: Circuit>(circuit: &C, num_pref: usize, num_frames: usize, words_per_frame: usize) -> Self {
        Self {
            arena: Arena::allocate(circuit.num_objects(), num_pref, num_frames, words_per_frame),
            scratch: Scratch::new(words_per_frame),
            non_const_out: false,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Zeroes the data slab, preserving geometry.
    pub fn clean(&mut self) {
        self.arena.clean();
    }

    /// `fInit`: seeds true PIs with fresh random data and, if `init`,
    /// pins every latch-output to constant 0; otherwise latch-outputs
    /// get random data too (uninitialized/combinational simulation).
    ///
    /// Preconditions for `init = true`: `circuit.num_regs() > 0` and
    /// `circuit.num_regs() < circuit.num_pi()`.
    pub fn initialize<C: Circuit>(&mut self, circuit: &C, rng: &mut dyn SimRng, init: bool) {
        if init {
            assert!(circuit.num_regs() > 0, "sequential init requires at least one latch");
            assert!(circuit.num_regs() < circuit.num_pi(), "a circuit with only latches has no true PI");
            for &pi in circuit.true_pis() {
                assign::assign_random(circuit, &mut self.arena, rng, pi);
            }
            for &lo in circuit.los() {
                assign::assign_const(circuit, &mut self.arena, lo, false, 0);
            }
        } else {
            for &pi in circuit.pis() {
                assign::assign_random(circuit, &mut self.arena, rng, pi);
            }
        }
    }

    /// Seeds true PIs with fresh random data, then stitches the
    /// previous round's final latch-input state into frame 0 of each
    /// latch-output. Used between consecutive rounds of sequential
    /// simulation.
    pub fn reinitialize<C: Circuit>(&mut self, circuit: &C, rng: &mut dyn SimRng) {
        assert!(circuit.num_regs() > 0, "reinitialize requires at least one latch");
        assert!(circuit.num_regs() < circuit.num_pi(), "a circuit with only latches has no true PI");
        for &pi in circuit.true_pis() {
            assign::assign_random(circuit, &mut self.arena, rng, pi);
        }
        for &(li, lo) in circuit.li_lo_pairs() {
            eval::transfer_first(&mut self.arena, li, lo);
        }
    }

    /// Drives every frame: evaluates internal ANDs, propagates into
    /// POs and latch-inputs, then transfers latches into the next
    /// frame's latch-outputs (skipped on the final frame).
    pub fn simulate_one<C: Circuit>(&mut self, circuit: &C) {
        let num_frames = self.arena.num_frames();
        for f in 0..num_frames {
            for &id in circuit.nodes_topo() {
                eval::simulate_node(circuit, &mut self.arena, &mut self.scratch, id, f);
            }
            for &po in circuit.pos() {
                eval::copy_fanin(circuit, &mut self.arena, &mut self.scratch, po, f);
            }
            if f + 1 < num_frames {
                for &(li, lo) in circuit.li_lo_pairs() {
                    eval::transfer_next(&mut self.arena, li, lo, f);
                }
            }
        }
    }

    /// Single-frame convenience: evaluate frame 0, populate
    /// latch-inputs only (not true POs -- that's `simulate_one`'s
    /// job), then transfer latches to frame 0's latch-outputs for the
    /// next external step.
    pub fn simulate_one_frame<C: Circuit>(&mut self, circuit: &C) {
        for &id in circuit.nodes_topo() {
            eval::simulate_node(circuit, &mut self.arena, &mut self.scratch, id, 0);
        }
        for &li in circuit.lis() {
            eval::copy_fanin(circuit, &mut self.arena, &mut self.scratch, li, 0);
        }
        for &(li, lo) in circuit.li_lo_pairs() {
            eval::transfer_first(&mut self.arena, li, lo);
        }
    }

    /// True iff any true PO has a non-zero bit in the scanned range.
    pub fn check_non_const_outputs<C: Circuit>(&self, circuit: &C) -> bool {
        observe::check_non_const_outputs(circuit, &self.arena)
    }
}

/// Allocates, initializes as uninitialized/combinational, and runs one
/// round of simulation over `circuit`.
pub fn simulate_comb<C: Circuit>(circuit: &C, rng: &mut dyn SimRng, words_per_frame: usize) -> Session {
    let mut session = Session::allocate(circuit, 0, 1, words_per_frame);
    session.initialize(circuit, rng, false);
    session.simulate_one(circuit);
    session
}

/// Allocates, initializes as sequential (latches pinned to 0), runs
/// one round of simulation, and records whether any true PO went
/// non-zero.
pub fn simulate_seq<C: Circuit>(
    circuit: &C,
    rng: &mut dyn SimRng,
    num_pref: usize,
    num_frames: usize,
    words_per_frame: usize,
) -> Session {
    log::debug!(
        "simulate_seq: num_pref={num_pref} num_frames={num_frames} words_per_frame={words_per_frame}"
    );
    let mut session = Session::allocate(circuit, num_pref, num_frames, words_per_frame);
    session.initialize(circuit, rng, true);
    session.simulate_one(circuit);
    session.non_const_out = session.check_non_const_outputs(circuit);
    log::trace!("simulate_seq: non_const_out={}", session.non_const_out);
    session
}

impl Session {
    /// Runs the next round of sequential simulation: reinitializes
    /// (fresh random true PIs, latch state carried over from the
    /// previous round's final frame), simulates, and re-checks
    /// non-const outputs.
    pub fn resimulate_seq<C: Circuit>(&mut self, circuit: &C, rng: &mut dyn SimRng) {
        self.reinitialize(circuit, rng);
        self.simulate_one(circuit);
        self.non_const_out = self.check_non_const_outputs(circuit);
        log::trace!("resimulate_seq: non_const_out={}", self.non_const_out);
    }
}
