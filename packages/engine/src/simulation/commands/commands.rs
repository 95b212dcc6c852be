use crate::core::RandomSource;
use crate::domain::input::{Button, EventSource};

use super::EngineCore;

pub(super) fn press(engine: &mut EngineCore, button_id: u8) -> bool {
    forward(engine, button_id, true)
}

pub(super) fn release(engine: &mut EngineCore, button_id: u8) -> bool {
    forward(engine, button_id, false)
}

fn forward(engine: &mut EngineCore, button_id: u8, pressed: bool) -> bool {
    let Some(button) = Button::from_id(button_id) else {
        tracing::debug!(button_id, "unknown button ignored");
        return false;
    };
    engine.input.button(button, pressed);
    true
}

/// Swaps the event source, e.g. for a scripted replay.
pub(super) fn set_input(engine: &mut EngineCore, input: Box<dyn EventSource>) {
    engine.input = input;
}

pub(super) fn set_rng(engine: &mut EngineCore, rng: Box<dyn RandomSource>) {
    engine.rng = rng;
}
