//! Core utilities shared by every layer.

pub mod random;

pub use random::{RandomSource, SequenceRng, XorShift32};
