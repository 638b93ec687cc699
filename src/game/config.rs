//! Game configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, GameError};

/// How the winner is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// The last player holding cells wins.
    #[default]
    Elimination,
    /// After the turn limit the player with more cells wins.
    TurnLimitMajority,
}

/// Failure policy for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    /// No undo log and no checks; a failed move may leave partial state.
    None,
    /// No undo log; finished moves are checked for grid consistency.
    ValidateOnly,
    /// Every mutation is logged and a failed move is rolled back.
    #[default]
    LightUndo,
}

/// Configuration for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Win condition in force.
    pub win_condition: WinCondition,
    /// Turn limit for majority scoring, counted in individual moves.
    pub turn_limit: u32,
    /// Explosions leave opponent-owned neighbors untouched.
    pub stop_on_enemy: bool,
    /// Failure policy for moves.
    pub safety_level: SafetyLevel,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_condition: WinCondition::Elimination,
            turn_limit: 100,
            stop_on_enemy: false,
            safety_level: SafetyLevel::LightUndo,
        }
    }
}

impl GameConfig {
    /// Check that this configuration can drive a game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfiguration`] if the turn limit is zero.
    pub fn validate(self) -> EngineResult<()> {
        if self.turn_limit == 0 {
            return Err(GameError::InvalidConfiguration(
                "turn limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Decode and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfigParse`] for malformed JSON and
    /// [`GameError::InvalidConfiguration`] if the result fails validation.
    pub fn from_json(text: &str) -> EngineResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| GameError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, decode and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfigParse`] if the file cannot be read or
    /// decoded, and [`GameError::InvalidConfiguration`] if it fails validation.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::ConfigParse(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfigParse`] if serialization fails.
    pub fn to_json(self) -> EngineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| GameError::ConfigParse(e.to_string()))
    }
}
