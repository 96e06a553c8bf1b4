//! Counter-example builder (C7).
//!
//! Locates the earliest failing output bit, reconstructs the exact
//! PI/latch valuation that produces it, and self-validates the result
//! by a deterministic single-pattern replay. A replay mismatch is
//! logged and turned into `None` rather than panicking: per spec.md
//! §7 it's a normal "no witness produced" outcome for the caller, not
//! a programmer error.

use aigsim_util::word;

use crate::aig::{Circuit, NodeId};
use crate::arena::Arena;
use crate::assign;
use crate::observe;
use crate::session::Session;

/// A self-describing sequential counter-example: the failing PO, the
/// frame it first fires at, and the exact valuation (initial latch
/// state plus per-frame PI bits) that reproduces it. Independent of
/// the arena that produced it, and `serde`-derived so an outer driver
/// can stash one alongside the rest of its run configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Witness {
    pub i_po: usize,
    pub i_frame: usize,
    pub n_regs: usize,
    pub n_pis: usize,
    pub n_bits: usize,
    bits: Vec<u32>,
}

impl Witness {
    fn zeroed(i_po: usize, i_frame: usize, n_regs: usize, n_pis: usize) -> Self {
        let n_bits = n_regs + n_pis * (i_frame + 1);
        Self { i_po, i_frame, n_regs, n_pis, n_bits, bits: vec![0u32; word::word_num(n_bits)] }
    }

    pub fn get(&self, bit: usize) -> bool {
        word::has_bit(&self.bits, bit)
    }

    fn set(&mut self, bit: usize) {
        word::set_bit(&mut self.bits, bit);
    }

    /// Initial latch-output bit `k` (always 0 for initialized runs
    /// reached through [`get_counter_example`]).
    pub fn reg(&self, k: usize) -> bool {
        self.get(k)
    }

    /// True-PI bit `k` of frame `f`.
    pub fn pi(&self, f: usize, k: usize) -> bool {
        self.get(self.n_regs + self.n_pis * f + k)
    }

    /// Raw view of the packed bit buffer, for a caller that wants to
    /// dump or hash the witness without going through `serde`.
    pub fn as_bytes(&self) -> &[u8] {
        word::as_bytes(&self.bits)
    }
}

/// A combinational witness: one boolean per PI plus the id of the PO
/// it drives non-zero. Produced by [`check_output`]; consumed by
/// [`copy_counter_example`] to re-key into a sequential [`Witness`].
pub struct CombModel {
    pub pi_values: Vec<bool>,
    pub po: NodeId,
}

/// Scans `arena.words(node)` from word 0 (no prefix skip -- counter-
/// example extraction must catch a failure in any frame, including
/// the prefix) for the first non-zero word, returning its word index
/// and lowest set bit.
fn first_nonzero(arena: &Arena, node: NodeId) -> Option<(usize, usize)> {
    arena.words(node).iter().enumerate().find(|&(_, &w)| w != 0).map(|(i, &w)| (i, word::first_set_bit(w)))
}

/// Combinational path: scan every PO (true outputs and latch-inputs
/// alike, matching the unrolled-frames AIG this is meant for) for the
/// first one whose fanin carries a non-zero bit; reconstruct the
/// pattern that produces it.
pub fn check_output<C: Circuit>(circuit: &C, arena: &Arena) -> Option<CombModel> {
    for &po in circuit.pos() {
        let fanin = circuit.fanin0(po).node;
        if let Some((i, k)) = first_nonzero(arena, fanin) {
            let best_pat = i * word::WORD_BITS + k;
            let pi_values = circuit.pis().iter().map(|&pi| word::has_bit(arena.words(pi), best_pat)).collect();
            return Some(CombModel { pi_values, po });
        }
    }
    log::trace!("check_output: no PO carries a non-zero bit");
    None
}

/// Sequential path. Precondition: `session.non_const_out` is true.
/// Locates the first true PO with a non-zero bit outside the prefix,
/// then the earliest failing word/bit overall, builds the witness,
/// and self-validates it with [`run_counter_example`].
pub fn get_counter_example<C: Circuit>(circuit: &C, session: &Session) -> Option<Witness> {
    assert!(session.non_const_out, "get_counter_example called with no recorded failure");

    let arena = session.arena();
    let mut found = None;
    for (i_po, &po) in circuit.true_pos().iter().enumerate() {
        if observe::is_zero(arena, po) {
            continue;
        }
        let (i, k) = first_nonzero(arena, po).expect("non-const PO must have a non-zero word");
        let wpf = arena.words_per_frame();
        let i_frame = i / wpf;
        let i_bit = word::WORD_BITS * (i % wpf) + k;
        found = Some((i_po, i_frame, i_bit));
        break;
    }
    let (i_po, i_frame, i_bit) = match found {
        Some(f) => f,
        None => {
            log::trace!("get_counter_example: no true PO failed within the scanned range");
            return None;
        }
    };

    let mut witness = Witness::zeroed(i_po, i_frame, circuit.num_regs(), circuit.num_true_pi());
    for (k, &lo) in circuit.los().iter().enumerate() {
        if word::has_bit(arena.words_frame(lo, 0), i_bit) {
            witness.set(k);
        }
    }
    for f in 0..=i_frame {
        for (k, &pi) in circuit.true_pis().iter().enumerate() {
            if word::has_bit(arena.words_frame(pi, f), i_bit) {
                witness.set(witness.n_regs + witness.n_pis * f + k);
            }
        }
    }

    if run_counter_example(circuit, &witness) {
        Some(witness)
    } else {
        log::error!("get_counter_example: counter-example is invalid");
        None
    }
}

/// Replays `witness` through a fresh single-pattern session over
/// `witness.i_frame + 1` frames and reports whether the claimed PO
/// goes non-zero at that frame.
pub fn run_counter_example<C: Circuit>(circuit: &C, witness: &Witness) -> bool {
    let mut arena = Arena::allocate(circuit.num_objects(), 0, witness.i_frame + 1, 1);
    seed_witness(circuit, &mut arena, witness);
    simulate_single_pattern(circuit, &mut arena, witness.i_frame + 1);
    !observe::is_zero(&arena, circuit.true_pos()[witness.i_po])
}

/// Same seeding and simulation as [`run_counter_example`], but reports
/// the index of the first true PO that goes non-zero, if any.
pub fn find_output_counter_example<C: Circuit>(circuit: &C, witness: &Witness) -> Option<usize> {
    let mut arena = Arena::allocate(circuit.num_objects(), 0, witness.i_frame + 1, 1);
    seed_witness(circuit, &mut arena, witness);
    simulate_single_pattern(circuit, &mut arena, witness.i_frame + 1);
    circuit.true_pos().iter().position(|&po| !observe::is_zero(&arena, po))
}

fn seed_witness<C: Circuit>(circuit: &C, arena: &mut Arena, witness: &Witness) {
    for (k, &lo) in circuit.los().iter().enumerate() {
        assign::assign_const(circuit, arena, lo, witness.reg(k), 0);
    }
    for f in 0..=witness.i_frame {
        for (k, &pi) in circuit.true_pis().iter().enumerate() {
            assign::assign_const(circuit, arena, pi, witness.pi(f, k), f);
        }
    }
}

fn simulate_single_pattern<C: Circuit>(circuit: &C, arena: &mut Arena, num_frames: usize) {
    let mut scratch = crate::eval::Scratch::new(1);
    for f in 0..num_frames {
        for &id in circuit.nodes_topo() {
            crate::eval::simulate_node(circuit, arena, &mut scratch, id, f);
        }
        for &po in circuit.pos() {
            crate::eval::copy_fanin(circuit, arena, &mut scratch, po, f);
        }
        if f + 1 < num_frames {
            for &(li, lo) in circuit.li_lo_pairs() {
                crate::eval::transfer_next(arena, li, lo, f);
            }
        }
    }
}

/// Converts a combinational witness over the unrolled `frames` AIG
/// into a sequential witness over `circuit`, re-keying PIs through
/// the true-PI stride and locating the failing PO by id-matching
/// against `frames`. Self-validates by replay.
pub fn copy_counter_example<C: Circuit, F: Circuit>(circuit: &C, frames: &F, model: &CombModel) -> Option<Witness> {
    assert!(circuit.num_regs() > 0);
    assert_eq!(frames.num_regs(), 0, "the unrolled frames AIG must be combinational");

    let n_true_pis = circuit.num_true_pi();
    let n_true_pos = circuit.num_true_po();
    let n_frames = frames.num_pi() / n_true_pis;
    assert_eq!(n_true_pis * n_frames, frames.num_pi());
    assert_eq!(n_true_pos * n_frames, frames.num_po());

    let (match_index, _) = frames.pos().iter().enumerate().find(|&(_, &po)| po == model.po)?;
    let i_po = match_index % n_true_pos;
    let i_frame = match_index / n_true_pos;

    let mut witness = Witness::zeroed(i_po, i_frame, circuit.num_regs(), n_true_pis);
    for (i, &value) in model.pi_values.iter().enumerate() {
        let bit = witness.n_regs + i;
        if value {
            witness.set(bit);
        }
        if bit == witness.n_bits - 1 {
            break;
        }
    }

    if run_counter_example(circuit, &witness) {
        Some(witness)
    } else {
        log::error!("copy_counter_example: counter-example is invalid");
        None
    }
}

/// Builds a witness with all-zero data bits for a PO that is
/// trivially true at a known global output index `i_frame_out`
/// (`= i_frame * num_true_po + i_po`).
pub fn triv_counter_example<C: Circuit>(circuit: &C, i_frame_out: usize) -> Witness {
    assert!(circuit.num_regs() > 0);
    let n_true_pos = circuit.num_true_po();
    let i_po = i_frame_out % n_true_pos;
    let i_frame = i_frame_out / n_true_pos;
    Witness::zeroed(i_po, i_frame, circuit.num_regs(), circuit.num_true_pi())
}

/// Widens the register section of `witness` to `n_regs_new` (new
/// registers take value 0), copying the PI section verbatim.
pub fn dup_counter_example(witness: &Witness, n_regs_new: usize) -> Witness {
    let mut out = Witness::zeroed(witness.i_po, witness.i_frame, n_regs_new, witness.n_pis);
    for i in witness.n_regs..witness.n_bits {
        if witness.get(i) {
            out.set(out.n_regs + i - witness.n_regs);
        }
    }
    out
}
