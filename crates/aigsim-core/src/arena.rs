//! Node-indexed bit-packed simulation storage.
//!
//! The arena is one flat `Vec<u32>` addressed as `id * words_per_node +
//! frame * words_per_frame + word`. `NumObjects`, `NumFrames` and
//! `WordsPerFrame` are fixed at allocation; nothing here ever grows or
//! reallocates a single node's window.

use crate::aig::NodeId;

/// A contiguous, node-indexed slab of bit-parallel simulation data.
pub struct Arena {
    num_objects: usize,
    num_pref: usize,
    num_frames: usize,
    words_per_frame: usize,
    words_per_node: usize,
    words_pref: usize,
    data: Vec<u32>,
}

impl Arena {
    /// Allocates a zero-initialized arena. `num_pref` leading frames are
    /// excluded from most scanning predicates (see [`crate::observe`]);
    /// `num_frames` true simulation frames follow them.
    pub fn allocate(
        num_objects: usize,
        num_pref: usize,
        num_frames: usize,
        words_per_frame: usize,
    ) -> Self {
        assert!(num_frames >= 1, "a session needs at least one frame");
        assert!(words_per_frame >= 1, "a frame needs at least one word");

        let total_frames = num_pref + num_frames;
        let words_per_node = total_frames * words_per_frame;
        let words_pref = num_pref * words_per_frame;

        Self {
            num_objects,
            num_pref,
            num_frames: total_frames,
            words_per_frame,
            words_per_node,
            words_pref,
            data: vec![0u32; num_objects * words_per_node],
        }
    }

    pub fn num_objects(&self) -> usize {
        self.num_objects
    }

    /// Total simulated frames, including the prefix.
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn num_pref(&self) -> usize {
        self.num_pref
    }

    pub fn words_per_frame(&self) -> usize {
        self.words_per_frame
    }

    pub fn words_per_node(&self) -> usize {
        self.words_per_node
    }

    /// Word offset where the non-prefix range starts, within one node's
    /// window. Equivalence sampling scans `[words_pref(), words_per_node())`.
    pub fn words_pref(&self) -> usize {
        self.words_pref
    }

    #[inline]
    fn offset(&self, id: NodeId) -> usize {
        let idx = id.index();
        debug_assert!(idx < self.num_objects, "node id out of range");
        idx * self.words_per_node
    }

    /// This node's full window, spanning every frame.
    pub fn words(&self, id: NodeId) -> &[u32] {
        let start = self.offset(id);
        &self.data[start..start + self.words_per_node]
    }

    pub fn words_mut(&mut self, id: NodeId) -> &mut [u32] {
        let start = self.offset(id);
        &mut self.data[start..start + self.words_per_node]
    }

    /// This node's window for a single frame.
    pub fn words_frame(&self, id: NodeId, frame: usize) -> &[u32] {
        debug_assert!(frame < self.num_frames, "frame index out of range");
        let start = self.offset(id) + frame * self.words_per_frame;
        &self.data[start..start + self.words_per_frame]
    }

    pub fn words_frame_mut(&mut self, id: NodeId, frame: usize) -> &mut [u32] {
        debug_assert!(frame < self.num_frames, "frame index out of range");
        let start = self.offset(id) + frame * self.words_per_frame;
        &mut self.data[start..start + self.words_per_frame]
    }

    /// Zeroes every data word, preserving the arena's geometry.
    pub fn clean(&mut self) {
        self.data.fill(0);
    }

    /// Raw view of the whole slab, for diagnostic dumping (see
    /// [`crate::dump`]).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
