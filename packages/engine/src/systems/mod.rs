//! Systems acting on the grid during a world pass.

pub mod behaviors;
