//! Game results and per-player outcomes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TournamentError;
use crate::player::Color;

/// Result of a single game, from the board's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// "1-0"
    WhiteWins,
    /// "0-1"
    BlackWins,
    /// "1/2-1/2"
    Draw,
}

/// Outcome of a game for one side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl GameResult {
    pub const ALL: [GameResult; 3] = [GameResult::WhiteWins, GameResult::BlackWins, GameResult::Draw];

    /// Result literal as written on a score sheet
    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }

    /// Outcome for the player who had `color`
    pub fn for_side(self, color: Color) -> Outcome {
        match (self, color) {
            (GameResult::Draw, _) => Outcome::Draw,
            (GameResult::WhiteWins, Color::White) | (GameResult::BlackWins, Color::Black) => Outcome::Win,
            _ => Outcome::Loss,
        }
    }

    /// Same game seen with colours swapped
    pub fn mirrored(self) -> Self {
        match self {
            GameResult::WhiteWins => GameResult::BlackWins,
            GameResult::BlackWins => GameResult::WhiteWins,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

impl Outcome {
    /// Score contribution: win = 1, draw = 0.5, loss = 0
    pub fn points(self) -> f32 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// Result literal from this player's perspective ("1-0" means they won)
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "1-0",
            Outcome::Draw => "1/2-1/2",
            Outcome::Loss => "0-1",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-0" => Ok(GameResult::WhiteWins),
            "0-1" => Ok(GameResult::BlackWins),
            "1/2-1/2" => Ok(GameResult::Draw),
            other => Err(TournamentError::InvalidResult(other.to_string())),
        }
    }
}
