//! The contract the simulator expects from an AIG manager.
//!
//! Everything in this module describes a read-only view onto somebody
//! else's graph: construction, structural hashing and topological
//! ordering all happen upstream. The simulator only ever walks the
//! orders the manager hands it.

use std::fmt;

/// A stable, dense identifier for one object (PI, PO, latch or internal
/// AND node) in the circuit. Valid values are `0..circuit.num_objects()`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

/// One incoming edge of an AND node or PO-style node (PO / latch-input):
/// the node it reads from, and whether that edge carries an inversion.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fanin {
    pub node: NodeId,
    pub inverted: bool,
}

impl Fanin {
    pub fn new(node: NodeId, inverted: bool) -> Self {
        Self { node, inverted }
    }
}

/// Read-only view of an And-Inverter Graph, as provided by the AIG
/// manager. The simulator never mutates anything behind this trait and
/// never infers structure (latch pairing, topological order) that isn't
/// handed to it explicitly.
pub trait Circuit {
    /// One past the largest valid [`NodeId`].
    fn num_objects(&self) -> usize;

    /// Total primary inputs, true inputs plus latch-outputs.
    fn num_pi(&self) -> usize;

    /// Total primary outputs, true outputs plus latch-inputs.
    fn num_po(&self) -> usize;

    /// Number of latches. `num_regs() < num_pi()` whenever there is at
    /// least one true input.
    fn num_regs(&self) -> usize;

    fn num_true_pi(&self) -> usize {
        self.num_pi() - self.num_regs()
    }

    fn num_true_po(&self) -> usize {
        self.num_po() - self.num_regs()
    }

    fn is_pi(&self, id: NodeId) -> bool;

    /// True for both true POs and latch-inputs: anything that is
    /// simulated by copying (possibly inverting) a single fanin.
    fn is_po(&self, id: NodeId) -> bool;

    fn is_and(&self, id: NodeId) -> bool;

    /// The node-level phase bit used to fold constant propagation into
    /// the bit-level semantics. Meaningless for PI nodes.
    fn phase(&self, id: NodeId) -> bool;

    /// First fanin. Valid for AND nodes and PO-style nodes.
    fn fanin0(&self, id: NodeId) -> Fanin;

    /// Second fanin. Valid only for AND nodes.
    fn fanin1(&self, id: NodeId) -> Fanin;

    /// Internal AND nodes in topological order (every fanin of a node
    /// appears before the node itself).
    fn nodes_topo(&self) -> &[NodeId];

    /// True (non-latch) primary inputs, in registered order.
    fn true_pis(&self) -> &[NodeId];

    /// Latch-outputs, in registered order, matched index-for-index with
    /// [`Circuit::lis`].
    fn los(&self) -> &[NodeId];

    /// Latch-inputs, in registered order, matched with [`Circuit::los`].
    fn lis(&self) -> &[NodeId];

    /// True (non-latch) primary outputs, in registered order.
    fn true_pos(&self) -> &[NodeId];

    /// `(Li, Lo)` pairs in matched, registered order. Pairing must never
    /// be inferred from `NodeId` arithmetic; this is the only source of
    /// truth for it.
    fn li_lo_pairs(&self) -> &[(NodeId, NodeId)];

    /// All PIs: true inputs followed by latch-outputs.
    fn pis(&self) -> &[NodeId];

    /// All POs: true outputs followed by latch-inputs.
    fn pos(&self) -> &[NodeId];
}
