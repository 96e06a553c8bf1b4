//! A tiny in-memory [`Circuit`] builder for the demo netlists this CLI
//! ships. Not an AIGER parser -- AIGER parsing, structural hashing and
//! topological ordering belong to the AIG manager `aigsim-core`
//! deliberately treats as an external collaborator. This is the
//! production `Circuit` implementor a real driver would write for
//! itself; `aigsim-core` only ever consumes the trait.

use aigsim_core::{Circuit, Fanin, NodeId};

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

/// Incrementally assembles a [`Network`]. Fanins must be pushed before
/// the node that reads them: insertion order doubles as the
/// topological order `Circuit::nodes_topo` promises callers.
#[derive(Default)]
pub struct NetworkBuilder {
    net: Network,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from(self.net.nodes.len() as u32);
        self.net.nodes.push(data);
        id
    }

    /// Reserves a latch-output slot before its latch-input's fanin
    /// cone (which may read the output itself) is built.
    pub fn reserve_lo(&mut self) -> NodeId {
        self.push(NodeData { kind: Kind::Pi, ..Default::default() })
    }

    pub fn true_pi(&mut self) -> NodeId {
        let id = self.push(NodeData { kind: Kind::Pi, ..Default::default() });
        self.net.true_pis.push(id);
        id
    }

    /// Adds an AND node. Keep `phase = false` and push any inversion
    /// onto the edges unless you have a specific reason to fold an
    /// extra inversion into this node's own canonicalization.
    pub fn and(&mut self, fanin0: Fanin, fanin1: Fanin, phase: bool) -> NodeId {
        let id = self.push(NodeData { kind: Kind::And, phase, fanin0, fanin1 });
        self.net.topo.push(id);
        id
    }

    pub fn true_po(&mut self, fanin0: Fanin) -> NodeId {
        let id = self.push(NodeData { kind: Kind::Po, fanin0, ..Default::default() });
        self.net.true_pos.push(id);
        id
    }

    pub fn latch(&mut self, li_fanin: Fanin) -> (NodeId, NodeId) {
        let lo = self.reserve_lo();
        self.close_latch(lo, li_fanin)
    }

    pub fn close_latch(&mut self, lo: NodeId, li_fanin: Fanin) -> (NodeId, NodeId) {
        let li = self.push(NodeData { kind: Kind::Po, fanin0: li_fanin, ..Default::default() });
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
