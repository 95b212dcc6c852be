use super::*;

mod tiles;
mod guard;
mod pointers;
