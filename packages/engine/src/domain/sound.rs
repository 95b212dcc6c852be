/// Sound cues emitted by the simulation, in the order they happen.
///
/// The discriminants are stable; the wasm facade hands them to JS as bytes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    BlowUp = 0,
    Shoot = 1,
    Tap = 2,
    Teleport = 3,
    Screw = 4,
    Life = 5,
    Door = 6,
    Ammo = 7,
    Push = 8,
    Key = 9,
    Shot = 10,
    Enter = 11,
    Leave = 12,
    Launch = 13,
    Magnet = 14,
    Stamp = 15,
}

impl SoundCue {
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}
