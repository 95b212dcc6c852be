//! Input events consumed by player-controlled elements.
//!
//! The engine polls at most once per player step. Device capture lives outside
//! the crate; hosts forward virtual button transitions to a [`ControlLatch`]
//! or script events through an [`EventQueue`].

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Nop,
    Turn,
    Suicide,
    Fire,
    Go,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub command: Command,
    pub dir: Direction,
}

impl InputEvent {
    pub const NOP: InputEvent = InputEvent { command: Command::Nop, dir: Direction::None };

    pub fn go(dir: Direction) -> Self {
        Self { command: Command::Go, dir }
    }

    pub fn fire(dir: Direction) -> Self {
        Self { command: Command::Fire, dir }
    }

    pub fn turn(dir: Direction) -> Self {
        Self { command: Command::Turn, dir }
    }

    pub fn suicide() -> Self {
        Self { command: Command::Suicide, dir: Direction::None }
    }
}

/// Virtual buttons a host maps its devices onto.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    Fire = 4,
    Suicide = 5,
}

impl Button {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Button::Up),
            1 => Some(Button::Down),
            2 => Some(Button::Left),
            3 => Some(Button::Right),
            4 => Some(Button::Fire),
            5 => Some(Button::Suicide),
            _ => None,
        }
    }

    fn direction(self) -> Direction {
        match self {
            Button::Up => Direction::Up,
            Button::Down => Direction::Down,
            Button::Left => Direction::Left,
            Button::Right => Direction::Right,
            Button::Fire | Button::Suicide => Direction::None,
        }
    }
}

/// Source of player commands. Polling consumes the current event.
pub trait EventSource {
    fn poll(&mut self) -> InputEvent;

    /// Forwards a virtual button transition. Scripted sources ignore it.
    fn button(&mut self, _button: Button, _pressed: bool) {}
}

/// Scripted events, one per poll; `Nop` once drained.
#[derive(Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<InputEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::NOP)
    }
}

const DIRECTION_BUTTONS: [Button; 4] = [Button::Up, Button::Down, Button::Left, Button::Right];

/// Held-button latch.
///
/// A held direction is re-delivered on every poll. A direction pressed and
/// released between two polls is deferred and delivered exactly once; a
/// release after the event was noticed turns it into `Nop`.
pub struct ControlLatch {
    held: [bool; 6],
    event: InputEvent,
    deferred: bool,
    noticed: bool,
}

impl Default for ControlLatch {
    fn default() -> Self {
        Self {
            held: [false; 6],
            event: InputEvent::NOP,
            deferred: false,
            noticed: false,
        }
    }
}

impl ControlLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.update(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.update(button, false);
    }

    /// Current event without consuming it.
    pub fn peek(&self) -> InputEvent {
        self.event
    }

    fn is_held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    fn update(&mut self, button: Button, pressed: bool) {
        if self.is_held(button) == pressed {
            return;
        }
        self.held[button as usize] = pressed;

        if button == Button::Fire {
            match (pressed, self.event.command) {
                (true, Command::Go) => self.event.command = Command::Fire,
                (false, Command::Fire) => self.event.command = Command::Go,
                _ => {}
            }
            return;
        }

        let dir = if pressed && button.direction() != Direction::None {
            button.direction()
        } else {
            DIRECTION_BUTTONS
                .iter()
                .find(|b| self.is_held(**b))
                .map(|b| b.direction())
                .unwrap_or(Direction::None)
        };

        if dir != Direction::None {
            self.event.dir = dir;
            self.event.command = if self.is_held(Button::Fire) { Command::Fire } else { Command::Go };
            self.deferred = false;
            self.noticed = false;
        } else if pressed {
            // only Suicide reaches here
            self.event.command = Command::Suicide;
            self.deferred = false;
            self.noticed = true;
        } else if self.noticed {
            self.event.command = Command::Nop;
        } else {
            self.deferred = true;
        }
    }
}

impl EventSource for ControlLatch {
    fn poll(&mut self) -> InputEvent {
        let result = self.event;
        if self.deferred {
            self.event = InputEvent { command: Command::Nop, dir: result.dir };
            self.deferred = false;
        } else {
            self.noticed = true;
        }
        result
    }

    fn button(&mut self, button: Button, pressed: bool) {
        self.update(button, pressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_direction_repeats_until_released() {
        let mut latch = ControlLatch::new();
        latch.press(Button::Right);
        assert_eq!(latch.poll(), InputEvent::go(Direction::Right));
        assert_eq!(latch.poll(), InputEvent::go(Direction::Right));
        latch.release(Button::Right);
        assert_eq!(latch.poll().command, Command::Nop);
    }

    #[test]
    fn tap_between_polls_is_delivered_once() {
        let mut latch = ControlLatch::new();
        latch.press(Button::Left);
        latch.release(Button::Left);
        assert_eq!(latch.poll(), InputEvent::go(Direction::Left));
        assert_eq!(latch.poll(), InputEvent { command: Command::Nop, dir: Direction::Left });
    }

    #[test]
    fn fire_converts_go_and_back() {
        let mut latch = ControlLatch::new();
        latch.press(Button::Up);
        latch.press(Button::Fire);
        assert_eq!(latch.poll(), InputEvent::fire(Direction::Up));
        latch.release(Button::Fire);
        assert_eq!(latch.poll(), InputEvent::go(Direction::Up));
    }

    #[test]
    fn releasing_one_direction_falls_back_to_another_held() {
        let mut latch = ControlLatch::new();
        latch.press(Button::Down);
        latch.press(Button::Left);
        assert_eq!(latch.poll().dir, Direction::Left);
        latch.release(Button::Left);
        assert_eq!(latch.poll(), InputEvent::go(Direction::Down));
    }

    #[test]
    fn suicide_is_latched_until_released() {
        let mut latch = ControlLatch::new();
        latch.press(Button::Suicide);
        assert_eq!(latch.poll().command, Command::Suicide);
        latch.release(Button::Suicide);
        assert_eq!(latch.poll().command, Command::Nop);
    }

    #[test]
    fn queue_drains_then_reports_nop() {
        let mut queue: EventQueue = [InputEvent::go(Direction::Up)].into_iter().collect();
        assert_eq!(queue.poll(), InputEvent::go(Direction::Up));
        assert_eq!(queue.poll(), InputEvent::NOP);
    }
}
