use serde::{Deserialize, Serialize};

use crate::domain::content::PackError;

/// Tunables of a session; every field has the stock game value as default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub seed: u32,
    pub starting_lives: u32,
    /// Ticks per demolish half-cycle.
    pub demolish_ticks: u32,
    /// Ticks the background flash lasts after the ship powers up.
    pub flash_ticks: u32,
    /// Player steps before another shot is allowed.
    pub fire_cooldown: u32,
    /// Ticks per revealed or erased column.
    pub reveal_every: u32,
    /// Ticks per world pass.
    pub pass_every: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seed: 12345,
            starting_lives: 8,
            demolish_ticks: 48,
            flash_ticks: 3,
            fire_cooldown: 5,
            reveal_every: 4,
            pass_every: 7,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        let settings: EngineSettings =
            serde_json::from_str(json).map_err(|e| PackError::Settings(e.to_string()))?;
        Ok(settings.sanitized())
    }

    /// Cadences below one tick would stall the state machine.
    pub fn sanitized(mut self) -> Self {
        self.reveal_every = self.reveal_every.max(1);
        self.pass_every = self.pass_every.max(1);
        self.demolish_ticks = self.demolish_ticks.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json(r#"{"seed": 9, "startingLives": 3}"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.demolish_ticks, 48);
        assert_eq!(settings.pass_every, 7);
    }

    #[test]
    fn zero_cadence_is_raised_to_one() {
        let settings = EngineSettings::from_json(r#"{"passEvery": 0}"#).unwrap();
        assert_eq!(settings.pass_every, 1);
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        assert!(matches!(EngineSettings::from_json("[]"), Err(PackError::Settings(_))));
    }
}
