//! In-memory [`Circuit`] test double.
//!
//! Nothing in this module ships to a real caller -- `aigsim-core` only
//! ever consumes the [`Circuit`] trait, never implements it. This is
//! the small, deliberately naive implementor the crate's own tests
//! build AIGs with, standing in for a real AIG manager.

use crate::aig::{Circuit, Fanin, NodeId};

#[derive(Clone, Copy, Debug, Default)]
enum Kind {
    #[default]
    Pi,
    Po,
    And,
}

#[derive(Clone, Copy, Debug, Default)]
struct NodeData {
    kind: Kind,
    phase: bool,
    fanin0: Fanin,
    fanin1: Fanin,
}

/// A fully-built test circuit. Construct one through [`NetworkBuilder`].
#[derive(Default)]
pub struct Network {
    nodes: Vec<NodeData>,
    topo: Vec<NodeId>,
    true_pis: Vec<NodeId>,
    los: Vec<NodeId>,
    lis: Vec<NodeId>,
    true_pos: Vec<NodeId>,
    pis: Vec<NodeId>,
    pos: Vec<NodeId>,
    li_lo_pairs: Vec<(NodeId, NodeId)>,
}

impl Circuit for Network {
    fn num_objects(&self) -> usize {
        self.nodes.len()
    }

    fn num_pi(&self) -> usize {
        self.pis.len()
    }

    fn num_po(&self) -> usize {
        self.pos.len()
    }

    fn num_regs(&self) -> usize {
        self.los.len()
    }

    fn is_pi(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()].kind, Kind::Pi)
    }

    fn is_po(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()].kind, Kind::Po)
    }

    fn is_and(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()].kind, Kind::And)
    }

    fn phase(&self, id: NodeId) -> bool {
        self.nodes[id.index()].phase
    }

    fn fanin0(&self, id: NodeId) -> Fanin {
        self.nodes[id.index()].fanin0
    }

    fn fanin1(&self, id: NodeId) -> Fanin {
        self.nodes[id.index()].fanin1
    }

    fn nodes_topo(&self) -> &[NodeId] {
        &self.topo
    }

    fn true_pis(&self) -> &[NodeId] {
        &self.true_pis
    }

    fn los(&self) -> &[NodeId] {
        &self.los
    }

    fn lis(&self) -> &[NodeId] {
        &self.lis
    }

    fn true_pos(&self) -> &[NodeId] {
        &self.true_pos
    }

    fn li_lo_pairs(&self) -> &[(NodeId, NodeId)] {
        &self.li_lo_pairs
    }

    fn pis(&self) -> &[NodeId] {
        &self.pis
    }

    fn pos(&self) -> &[NodeId] {
        &self.pos
    }
}

impl Network {
    /// One true PI, nothing else. Handy for exercising PI assignment
    /// in isolation.
    pub fn single_pi() -> Self {
        let mut b = NetworkBuilder::new();
        b.true_pi();
        b.build()
    }

    /// One true PI `x0`, one PO = `x0` (a pure buffer).
    pub fn buffer() -> Self {
        let mut b = NetworkBuilder::new();
        let x0 = b.true_pi();
        b.true_po(Fanin::new(x0, false));
        b.build()
    }

    /// One true PI `x0`, one PO = NOT `x0`.
    pub fn inverter() -> Self {
        let mut b = NetworkBuilder::new();
        let x0 = b.true_pi();
        b.true_po(Fanin::new(x0, true));
        b.build()
    }

    /// One true PI `x0`, one latch with `Li = x0`, one PO = `Lo`.
    pub fn latch_passthrough() -> Self {
        let mut b = NetworkBuilder::new();
        let x0 = b.true_pi();
        let (_li, lo) = b.latch(Fanin::new(x0, false));
        b.true_po(Fanin::new(lo, false));
        b.build()
    }

    /// One true PI `x0`, one PO whose fanin is the constant-0 node
    /// (phase = 0, no inversion): a trivially constant-0 output.
    pub fn const_zero_po() -> Self {
        let mut b = NetworkBuilder::new();
        let x0 = b.true_pi();
        let zero = b.and(Fanin::new(x0, false), Fanin::new(x0, true), false);
        b.true_po(Fanin::new(zero, false));
        b.build()
    }

    /// `PO = Lo AND x0`, latch initialized to 0 with `Li = x0 OR Lo`:
    /// a one-step ramp that eventually fires the PO.
    ///
    /// Every AND node here keeps `phase = false` and pushes any
    /// inversion onto the edges instead, so the eight-case evaluator
    /// dispatch collapses to plain AND-with-edge-inversion algebra
    /// (see the `eval` module tests for the general case).
    pub fn ramp_latch() -> Self {
        let mut b = NetworkBuilder::new();
        let x0 = b.true_pi();
        let lo = b.reserve_lo();
        // NOT x0 AND NOT lo
        let nand = b.and(Fanin::new(x0, true), Fanin::new(lo, true), false);
        // Li = NOT(NOT x0 AND NOT lo) = x0 OR lo
        let (_li, _lo) = b.close_latch(lo, Fanin::new(nand, true));
        let and_out = b.and(Fanin::new(lo, false), Fanin::new(x0, false), false);
        b.true_po(Fanin::new(and_out, false));
        b.build()
    }

    /// `n` true PIs, one PO = AND of all of them.
    pub fn and_of_all(n: usize) -> Self {
        let mut b = NetworkBuilder::new();
        let pis: Vec<_> = (0..n).map(|_| b.true_pi()).collect();
        let mut acc = pis[0];
        for &pi in &pis[1..] {
            acc = b.and(Fanin::new(acc, false), Fanin::new(pi, false), false);
        }
        b.true_po(Fanin::new(acc, false));
        b.build()
    }
}

/// Incrementally assembles a [`Network`]. Nodes must be added so that
/// every fanin is pushed before the node that reads it (the builder
/// does not reorder anything -- insertion order *is* topological
/// order, same contract [`Circuit::nodes_topo`] promises callers).
#[derive(Default)]
pub struct NetworkBuilder {
    net: Network,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.net.nodes.len() as u32);
        self.net.nodes.push(data);
        id
    }

    /// Adds a PI not registered as a true input or latch-output yet.
    /// Used internally by [`Self::latch`] to reserve the `Lo` slot
    /// before its `Li`'s fanin (which may read `Lo` itself) exists.
    pub fn reserve_lo(&mut self) -> NodeId {
        self.push(NodeData { kind: Kind::Pi, ..Default::default() })
    }

    pub fn true_pi(&mut self) -> NodeId {
        let id = self.push(NodeData { kind: Kind::Pi, ..Default::default() });
        self.net.true_pis.push(id);
        id
    }

    pub fn and(&mut self, fanin0: Fanin, fanin1: Fanin, phase: bool) -> NodeId {
        let id = self.push(NodeData { kind: Kind::And, phase, fanin0, fanin1 });
        self.net.topo.push(id);
        id
    }

    pub fn po(&mut self, fanin0: Fanin) -> NodeId {
        self.push(NodeData { kind: Kind::Po, fanin0, ..Default::default() })
    }

    pub fn true_po(&mut self, fanin0: Fanin) -> NodeId {
        let id = self.po(fanin0);
        self.net.true_pos.push(id);
        id
    }

    /// Registers a latch in one step: allocates `Lo`, then `Li` with
    /// the given fanin.
    pub fn latch(&mut self, li_fanin: Fanin) -> (NodeId, NodeId) {
        let lo = self.reserve_lo();
        self.close_latch(lo, li_fanin)
    }

    /// Completes a latch whose `Lo` was pre-reserved with
    /// [`Self::reserve_lo`] (needed when `Li`'s fanin cone reads `Lo`).
    pub fn close_latch(&mut self, lo: NodeId, li_fanin: Fanin) -> (NodeId, NodeId) {
        let li = self.po(li_fanin);
        self.net.los.push(lo);
        self.net.lis.push(li);
        self.net.li_lo_pairs.push((li, lo));
        (li, lo)
    }

    pub fn build(mut self) -> Network {
        self.net.pis = self.net.true_pis.iter().chain(self.net.los.iter()).copied().collect();
        self.net.pos = self.net.true_pos.iter().chain(self.net.lis.iter()).copied().collect();
        self.net
    }
}
