//! Errors returned by the caller-facing entry points.
//!
//! Every other contract violation in this crate -- wrong node kind,
//! out-of-range frame, calling a sequential-only entry point on an
//! uninitialized session -- stays on `assert!`/`debug_assert!`: these
//! are programmer errors reachable only by a caller who already holds
//! a `Circuit` and is driving it wrong, not recoverable conditions.
//! `hash_word`'s window-size precondition is the one exception: it is
//! reachable purely from caller-supplied arena geometry (`words_per_frame`,
//! `num_frames` picked by whoever allocated the session), so it gets a
//! `Result` instead of a panic.

#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("hash_word requires words_per_node <= 128, got {0}")]
    HashWindowTooWide(usize),
}
