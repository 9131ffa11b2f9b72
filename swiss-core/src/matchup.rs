//! A single paired game and the commit of its result

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TournamentError};
use crate::player::{Color, Player, PlayerId};
use crate::result::GameResult;

/// One board of a round
///
/// Created unresolved. A result is set exactly once and then applied exactly
/// once; applying is the only way player scores ever change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Match {
    /// Board number within the round (1-based)
    pub board: usize,
    pub white: PlayerId,
    pub black: PlayerId,
    pub white_name: String,
    pub black_name: String,
    result: Option<GameResult>,
    committed: bool,
}

impl Match {
    pub fn new(board: usize, white: &Player, black: &Player) -> Self {
        Self {
            board,
            white: white.id,
            black: black.id,
            white_name: white.name.clone(),
            black_name: black.name.clone(),
            result: None,
            committed: false,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Store the result without touching either player
    pub fn set_result(&mut self, result: GameResult) -> Result<()> {
        if self.result.is_some() {
            return Err(TournamentError::MatchAlreadyResolved);
        }
        self.result = Some(result);
        Ok(())
    }

    /// Write the stored result into both players' histories.
    ///
    /// White records the result as-is, black records it with colours
    /// swapped. A second call is rejected so points are never counted twice.
    pub fn apply(&mut self, players: &mut [Player]) -> Result<()> {
        let result = self.result.ok_or(TournamentError::MatchUnresolved)?;
        if self.committed {
            return Err(TournamentError::MatchAlreadyCommitted);
        }

        // Look both up before writing so a bad id leaves everyone untouched
        let white_idx = index_of(players, self.white)?;
        let black_idx = index_of(players, self.black)?;

        players[white_idx].record_match(self.black, Color::White, result);
        players[black_idx].record_match(self.white, Color::Black, result);
        self.committed = true;
        Ok(())
    }

    /// `set_result` followed by `apply`
    pub fn resolve(&mut self, result: GameResult, players: &mut [Player]) -> Result<()> {
        self.set_result(result)?;
        self.apply(players)
    }

    /// "Ongoing" until a result is known, then the result literal
    pub fn status(&self) -> &'static str {
        match self.result {
            None => "Ongoing",
            Some(r) => r.as_str(),
        }
    }

    pub fn involves(&self, id: PlayerId) -> bool {
        self.white == id || self.black == id
    }

    /// Both ids with the lower one first, ignoring colour
    pub fn pair(&self) -> (PlayerId, PlayerId) {
        (self.white.min(self.black), self.white.max(self.black))
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (White) VS {} (Black): {}",
            self.white_name,
            self.black_name,
            self.status()
        )
    }
}

fn index_of(players: &[Player], id: PlayerId) -> Result<usize> {
    players
        .iter()
        .position(|p| p.id == id)
        .ok_or(TournamentError::UnknownPlayer(id))
}
