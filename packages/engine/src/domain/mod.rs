//! Domain data: element codes, level packs, settings, input and sound vocabularies.

pub mod config;
pub mod content;
pub mod elements;
pub mod input;
pub mod sound;
pub mod state;
