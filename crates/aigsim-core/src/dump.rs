//! Witness file I/O (ambient, see SPEC_FULL.md §6.1).
//!
//! One text line per frame `0..=i_frame`, `num_true_pi` ASCII `'0'`/
//! `'1'` characters in true-PI iteration order, no separators,
//! newline terminated, append-only. Latch-outputs are dumped as all
//! zeros: the replay session driving this write always seeds them to
//! constant 0 rather than from the witness's own register bits,
//! matching the reference implementation's write path.

use std::io::Write;

use crate::aig::Circuit;
use crate::arena::Arena;
use crate::assign;
use crate::cex::Witness;
use crate::eval::{self, Scratch};
use crate::observe;

/// A single-pattern bit is always all-zero or all-one words after
/// [`assign::assign_const`] seeding propagates through the AND
/// network, so reading word 0 as a boolean is exact.
fn bit_value(arena: &Arena, pi: crate::aig::NodeId, frame: usize) -> bool {
    arena.words_frame(pi, frame)[0] != 0
}

/// Replays `witness` and appends one line per frame of true-PI bits
/// to `out`. Returns whether replay reproduced the claimed failure.
pub fn write_counter_example<C: Circuit, W: Write>(
    out: &mut W,
    circuit: &C,
    witness: &Witness,
) -> std::io::Result<bool> {
    let num_frames = witness.i_frame + 1;
    let mut arena = Arena::allocate(circuit.num_objects(), 0, num_frames, 1);

    for &lo in circuit.los() {
        assign::assign_const(circuit, &mut arena, lo, false, 0);
    }
    for f in 0..num_frames {
        for (k, &pi) in circuit.true_pis().iter().enumerate() {
            assign::assign_const(circuit, &mut arena, pi, witness.pi(f, k), f);
        }
    }

    let mut scratch = Scratch::new(1);
    for f in 0..num_frames {
        for &id in circuit.nodes_topo() {
            eval::simulate_node(circuit, &mut arena, &mut scratch, id, f);
        }
        for &po in circuit.pos() {
            eval::copy_fanin(circuit, &mut arena, &mut scratch, po, f);
        }
        if f + 1 < num_frames {
            for &(li, lo) in circuit.li_lo_pairs() {
                eval::transfer_next(&mut arena, li, lo, f);
            }
        }
    }

    let fired = !observe::is_zero(&arena, circuit.true_pos()[witness.i_po]);

    for f in 0..num_frames {
        let mut line = String::with_capacity(circuit.num_true_pi() + 1);
        for &pi in circuit.true_pis() {
            line.push(if bit_value(&arena, pi, f) { '1' } else { '0' });
        }
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }

    Ok(fired)
}
