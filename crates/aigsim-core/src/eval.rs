//! Bit-parallel node evaluation.
//!
//! `simulate_node` is the hot loop: one dispatch on the three polarity
//! bits per node, then a straight-line loop over the frame's words. The
//! eight cases fold the node's own phase bit into the expression instead
//! of XOR-ing it on afterwards, matching how the source canonicalizes
//! constant propagation at evaluation time rather than at construction.

use crate::aig::Circuit;
use crate::arena::Arena;
use crate::aig::NodeId;

/// Reusable scratch buffers so `simulate_node` never allocates in the
/// hot path; sized once to `words_per_frame` and reused for every node
/// and every frame of a session.
#[derive(Default)]
pub struct Scratch {
    a0: Vec<u32>,
    a1: Vec<u32>,
}

impl Scratch {
    pub fn new(words_per_frame: usize) -> Self {
        Self {
            a0: vec![0; words_per_frame],
            a1: vec![0; words_per_frame],
        }
    }
}

/// Evaluates internal AND node `id` at `frame` from its two fanins'
/// already-populated windows at the same frame.
pub fn simulate_node<C: Circuit>(
    circuit: &C,
    arena: &mut Arena,
    scratch: &mut Scratch,
    id: NodeId,
    frame: usize,
) {
    debug_assert!(circuit.is_and(id), "simulate_node: not an AND node");

    let fanin0 = circuit.fanin0(id);
    let fanin1 = circuit.fanin1(id);
    let phi0 = circuit.phase(fanin0.node) ^ fanin0.inverted;
    let phi1 = circuit.phase(fanin1.node) ^ fanin1.inverted;
    let p = circuit.phase(id);

    let wpf = arena.words_per_frame();
    scratch.a0.copy_from_slice(arena.words_frame(fanin0.node, frame));
    scratch.a1.copy_from_slice(arena.words_frame(fanin1.node, frame));
    let a0 = &scratch.a0[..wpf];
    let a1 = &scratch.a1[..wpf];
    let out = arena.words_frame_mut(id, frame);

    match (phi0, phi1, p) {
        (true, true, true) => {
            for i in 0..wpf {
                out[i] = a0[i] | a1[i];
            }
        }
        (true, true, false) => {
            for i in 0..wpf {
                out[i] = !(a0[i] | a1[i]);
            }
        }
        (true, false, true) => {
            for i in 0..wpf {
                out[i] = a0[i] | !a1[i];
            }
        }
        (true, false, false) => {
            for i in 0..wpf {
                out[i] = !a0[i] & a1[i];
            }
        }
        (false, true, true) => {
            for i in 0..wpf {
                out[i] = !a0[i] | a1[i];
            }
        }
        (false, true, false) => {
            for i in 0..wpf {
                out[i] = a0[i] & !a1[i];
            }
        }
        (false, false, true) => {
            for i in 0..wpf {
                out[i] = !(a0[i] & a1[i]);
            }
        }
        (false, false, false) => {
            for i in 0..wpf {
                out[i] = a0[i] & a1[i];
            }
        }
    }
}

/// Copies `id`'s (a PO or latch-input) window from its single fanin,
/// inverting if the edge is. The node's own phase bit plays no part
/// here: POs carry no constant-propagation fold.
pub fn copy_fanin<C: Circuit>(
    circuit: &C,
    arena: &mut Arena,
    scratch: &mut Scratch,
    id: NodeId,
    frame: usize,
) {
    debug_assert!(circuit.is_po(id), "copy_fanin: not a PO-style node");

    let fanin0 = circuit.fanin0(id);
    let phi0 = circuit.phase(fanin0.node) ^ fanin0.inverted;

    let wpf = arena.words_per_frame();
    scratch.a0.copy_from_slice(arena.words_frame(fanin0.node, frame));
    let a0 = &scratch.a0[..wpf];
    let out = arena.words_frame_mut(id, frame);

    if phi0 {
        for i in 0..wpf {
            out[i] = !a0[i];
        }
    } else {
        out.copy_from_slice(a0);
    }
}

/// Copies `li`'s window at `frame` into `lo`'s window at `frame + 1`.
/// Precondition: `frame < arena.num_frames() - 1`.
pub fn transfer_next(arena: &mut Arena, li: NodeId, lo: NodeId, frame: usize) {
    debug_assert!(frame + 1 < arena.num_frames());
    let wpf = arena.words_per_frame();
    let mut tmp = vec![0u32; wpf];
    tmp.copy_from_slice(arena.words_frame(li, frame));
    arena.words_frame_mut(lo, frame + 1).copy_from_slice(&tmp);
}

/// Copies `li`'s window at the last frame into `lo`'s frame-0 window.
/// Used to stitch consecutive sequential simulation rounds together.
pub fn transfer_first(arena: &mut Arena, li: NodeId, lo: NodeId) {
    let last = arena.num_frames() - 1;
    let wpf = arena.words_per_frame();
    let mut tmp = vec![0u32; wpf];
    tmp.copy_from_slice(arena.words_frame(li, last));
    arena.words_frame_mut(lo, 0).copy_from_slice(&tmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aig::Fanin;
    use crate::testaig::NetworkBuilder;
    use aigsim_util::word;

    /// Every `(phi0, phi1, p)` combination of the eight-case dispatch must
    /// agree, bit for bit, with the fold `p XOR ((a0 XOR c0) AND (a1 XOR c1))`
    /// computed independently, per spec.md's testable property #3.
    #[test]
    fn and_node_matches_reference_fold_for_every_polarity_combo() {
        for fanin0_phase in [false, true] {
            for fanin1_phase in [false, true] {
                for c0 in [false, true] {
                    for c1 in [false, true] {
                        for p in [false, true] {
                            let mut b = NetworkBuilder::new();
                            let x0 = b.true_pi();
                            let x1 = b.true_pi();
                            // Fold the requested node-phase onto each PI
                            // through an intermediate buffer AND, since PIs
                            // themselves carry no phase in this builder.
                            let a0 = b.and(Fanin::new(x0, false), Fanin::new(x0, false), fanin0_phase);
                            let a1 = b.and(Fanin::new(x1, false), Fanin::new(x1, false), fanin1_phase);
                            let and_id = b.and(Fanin::new(a0, c0), Fanin::new(a1, c1), p);
                            let net = b.build();

                            let mut arena = Arena::allocate(net.num_objects(), 0, 1, 1);
                            arena.words_frame_mut(x0, 0)[0] = 0xa5a5_a5a5;
                            arena.words_frame_mut(x1, 0)[0] = 0x5a5a_5a5a;

                            let mut scratch = Scratch::new(1);
                            for &id in net.nodes_topo() {
                                simulate_node(&net, &mut arena, &mut scratch, id, 0);
                            }

                            for bit in 0..32 {
                                let a0_raw = word::has_bit(arena.words_frame(x0, 0), bit);
                                let a1_raw = word::has_bit(arena.words_frame(x1, 0), bit);
                                let a0_val = fanin0_phase ^ a0_raw;
                                let a1_val = fanin1_phase ^ a1_raw;
                                let expect = p ^ ((a0_val ^ c0) & (a1_val ^ c1));
                                let got = word::has_bit(arena.words_frame(and_id, 0), bit);
                                assert_eq!(
                                    got, expect,
                                    "phi0={fanin0_phase} phi1={fanin1_phase} c0={c0} c1={c1} p={p} bit={bit}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
