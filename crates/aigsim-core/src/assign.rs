//! PI assignment.
//!
//! Every function here fills some subset of a PI node's window. Callers
//! compose these: [`assign_random`] clears the reference bit itself,
//! while [`assign_random_frame`] leaves that to whoever's driving the
//! composition (see [`crate::session::Session::reinitialize`]).

use aigsim_util::word;

use crate::aig::{Circuit, NodeId};
use crate::arena::Arena;
use crate::rng::SimRng;

fn require_pi<C: Circuit>(circuit: &C, pi: NodeId) {
    assert!(circuit.is_pi(pi), "PI assignment called on a non-PI node");
}

/// Fills every word of `pi` with fresh random words, then forces bit 0
/// of word 0 of every frame to 0 -- the reference pattern.
pub fn assign_random<C: Circuit>(circuit: &C, arena: &mut Arena, rng: &mut dyn SimRng, pi: NodeId) {
    require_pi(circuit, pi);
    let wpf = arena.words_per_frame();
    let num_frames = arena.num_frames();
    let words = arena.words_mut(pi);
    for w in words.iter_mut() {
        *w = rng.next_word();
    }
    for f in 0..num_frames {
        words[f * wpf] <<= 1;
    }
}

/// Fills only frame `f`'s window with fresh random words. Does not touch
/// the reference bit.
pub fn assign_random_frame<C: Circuit>(
    circuit: &C,
    arena: &mut Arena,
    rng: &mut dyn SimRng,
    pi: NodeId,
    frame: usize,
) {
    require_pi(circuit, pi);
    for w in arena.words_frame_mut(pi, frame).iter_mut() {
        *w = rng.next_word();
    }
}

/// Sets frame `f`'s window to all-zero (`bit = false`) or all-one
/// (`bit = true`).
pub fn assign_const<C: Circuit>(circuit: &C, arena: &mut Arena, pi: NodeId, bit: bool, frame: usize) {
    require_pi(circuit, pi);
    let fill = if bit { u32::MAX } else { 0 };
    for w in arena.words_frame_mut(pi, frame).iter_mut() {
        *w = fill;
    }
}

/// Writes one specific word at `(pi, frame, word_idx)`.
pub fn set_word<C: Circuit>(
    circuit: &C,
    arena: &mut Arena,
    pi: NodeId,
    word_idx: usize,
    value: u32,
    frame: usize,
) {
    require_pi(circuit, pi);
    arena.words_frame_mut(pi, frame)[word_idx] = value;
}

/// Seeds every PI from a packed valuation `pat`, then (single-frame
/// sessions only) perturbs bits `1..=N` of the arena into distance-1
/// patterns of the base valuation.
///
/// `pat`'s single-frame layout is `num_true_pi * num_frames` bits of PI
/// values followed by `num_regs` bits of initial latch state.
/// Multi-frame sessions use the same layout but the distance-1 fan-out
/// is controlled by `use_dist1`, off by default to match the reference
/// implementation (which ships the equivalent flag permanently disabled;
/// see the design notes for why it's exposed here instead of removed).
pub fn assign_dist1<C: Circuit>(circuit: &C, arena: &mut Arena, pat: &[u32], use_dist1: bool) {
    assert!(arena.num_frames() > 0);

    if arena.num_frames() == 1 {
        for (i, &pi) in circuit.pis().iter().enumerate() {
            assign_const(circuit, arena, pi, word::has_bit(pat, i), 0);
        }
        let limit = circuit.num_pi().min(arena.words_per_frame() * word::WORD_BITS - 1);
        for (i, &pi) in circuit.pis().iter().take(limit).enumerate() {
            word::xor_bit(arena.words_mut(pi), i + 1);
        }
        return;
    }

    let num_true_pi = circuit.num_true_pi();
    let num_frames = arena.num_frames();
    for f in 0..num_frames {
        for (i, &pi) in circuit.true_pis().iter().enumerate() {
            assign_const(circuit, arena, pi, word::has_bit(pat, num_true_pi * f + i), f);
        }
    }
    for (k, &lo) in circuit.los().iter().enumerate() {
        assign_const(circuit, arena, lo, word::has_bit(pat, num_true_pi * num_frames + k), 0);
    }

    if use_dist1 {
        let limit = num_true_pi.min(arena.words_per_frame() * word::WORD_BITS - 1);
        let last = num_frames - 1;
        for (i, &pi) in circuit.true_pis().iter().take(limit).enumerate() {
            word::xor_bit(arena.words_frame_mut(pi, last), i + 1);
        }
    }
}

/// Seeds PIs from `pat` at frame 0 only, perturbs bits `1..=N` of frame
/// 0, then fills frames `>= 1` with fresh random words.
pub fn assign_dist1_plus<C: Circuit>(
    circuit: &C,
    arena: &mut Arena,
    rng: &mut dyn SimRng,
    pat: &[u32],
) {
    assert!(arena.num_frames() > 0);

    for (i, &pi) in circuit.pis().iter().enumerate() {
        assign_const(circuit, arena, pi, word::has_bit(pat, i), 0);
    }

    let limit = circuit.num_true_pi().min(arena.words_per_frame() * word::WORD_BITS - 1);
    for (i, &pi) in circuit.true_pis().iter().take(limit).enumerate() {
        word::xor_bit(arena.words_frame_mut(pi, 0), i + 1);
    }

    for f in 1..arena.num_frames() {
        for &pi in circuit.true_pis() {
            assign_random_frame(circuit, arena, rng, pi, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testaig::Network;
    use crate::rng::seeded;

    #[test]
    fn assign_random_clears_reference_bit() {
        let net = Network::single_pi();
        let mut arena = Arena::allocate(net.num_objects(), 0, 3, 2);
        let mut rng = seeded(7);
        assign_random(&net, &mut arena, &mut rng, net.true_pis()[0]);
        for f in 0..arena.num_frames() {
            assert!(!word::has_bit(arena.words_frame(net.true_pis()[0], f), 0));
        }
    }

    #[test]
    fn assign_const_fills_frame() {
        let net = Network::single_pi();
        let mut arena = Arena::allocate(net.num_objects(), 0, 1, 2);
        let pi = net.true_pis()[0];
        assign_const(&net, &mut arena, pi, true, 0);
        assert!(arena.words_frame(pi, 0).iter().all(|&w| w == u32::MAX));
        assign_const(&net, &mut arena, pi, false, 0);
        assert!(arena.words_frame(pi, 0).iter().all(|&w| w == 0));
    }

    #[test]
    fn assign_dist1_seeds_one_perturbation_bit_per_pi() {
        use crate::eval::{self, Scratch};

        let n = 4;
        let net = Network::and_of_all(n);
        let mut arena = Arena::allocate(net.num_objects(), 0, 1, 1);
        let pat = vec![0u32; word::word_num(n)];
        assign_dist1(&net, &mut arena, &pat, false);

        for (i, &pi) in net.true_pis().iter().enumerate() {
            assert!(!word::has_bit(arena.words_frame(pi, 0), 0));
            assert!(word::has_bit(arena.words_frame(pi, 0), i + 1));
        }

        let mut scratch = Scratch::new(1);
        for &id in net.nodes_topo() {
            eval::simulate_node(&net, &mut arena, &mut scratch, id, 0);
        }
        for &po in net.pos() {
            eval::copy_fanin(&net, &mut arena, &mut scratch, po, 0);
        }

        let po = net.true_pos()[0];
        for bit in 0..=n {
            assert!(!word::has_bit(arena.words_frame(po, 0), bit));
        }
    }
}
