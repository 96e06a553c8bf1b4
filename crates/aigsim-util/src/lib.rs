pub mod bit;
pub mod word;

pub use bit::{Bit, BitSet};
