//! Spatial storage for the cave.

pub mod grid;
