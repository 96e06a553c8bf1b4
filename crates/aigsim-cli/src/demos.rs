//! A small catalog of demo circuits exercising the end-to-end
//! scenarios this simulator is built around (see SPEC_FULL.md §8).

use aigsim_core::Fanin;

use crate::circuit::{Network, NetworkBuilder};

/// One true PI `x0`, one PO = `x0`.
pub fn buffer() -> Network {
    let mut b = NetworkBuilder::new();
    let x0 = b.true_pi();
    b.true_po(Fanin::new(x0, false));
    b.build()
}

/// One true PI `x0`, one PO = NOT `x0`.
pub fn inverter() -> Network {
    let mut b = NetworkBuilder::new();
    let x0 = b.true_pi();
    b.true_po(Fanin::new(x0, true));
    b.build()
}

/// One true PI `x0`, one latch with `Li = x0`, one PO = `Lo`.
pub fn latch_passthrough() -> Network {
    let mut b = NetworkBuilder::new();
    let x0 = b.true_pi();
    let (_li, lo) = b.latch(Fanin::new(x0, false));
    b.true_po(Fanin::new(lo, false));
    b.build()
}

/// `PO = Lo AND x0`, latch initialized to 0, `Li = x0 OR Lo`: fires
/// the PO one or more steps after `x0` first goes high.
pub fn ramp_latch() -> Network {
    let mut b = NetworkBuilder::new();
    let x0 = b.true_pi();
    let lo = b.reserve_lo();
    let nand = b.and(Fanin::new(x0, true), Fanin::new(lo, true), false);
    let (_li, _lo) = b.close_latch(lo, Fanin::new(nand, true));
    let and_out = b.and(Fanin::new(lo, false), Fanin::new(x0, false), false);
    b.true_po(Fanin::new(and_out, false));
    b.build()
}

/// `n` true PIs, one PO = AND of all of them.
pub fn and_of_all(n: usize) -> Network {
    let mut b = NetworkBuilder::new();
    let pis: Vec<_> = (0..n).map(|_| b.true_pi()).collect();
    let mut acc = pis[0];
    for &pi in &pis[1..] {
        acc = b.and(Fanin::new(acc, false), Fanin::new(pi, false), false);
    }
    b.true_po(Fanin::new(acc, false));
    b.build()
}

/// One true PI, one PO structurally tied to constant 0 (`x0 AND NOT x0`).
pub fn const_zero() -> Network {
    let mut b = NetworkBuilder::new();
    let x0 = b.true_pi();
    let zero = b.and(Fanin::new(x0, false), Fanin::new(x0, true), false);
    b.true_po(Fanin::new(zero, false));
    b.build()
}
