//! Players and their per-opponent match history

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::result::{GameResult, Outcome};

/// Stable identifier of a registered player
///
/// Assigned by the tournament in registration order and used as the key of
/// every match history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Piece colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// One entry in a player's history: the colour they had and how the game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub color: Color,
    pub result: GameResult,
}

impl MatchRecord {
    pub fn outcome(&self) -> Outcome {
        self.result.for_side(self.color)
    }

    pub fn points(&self) -> f32 {
        self.outcome().points()
    }
}

/// Tournament participant
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Pre-tournament rating; never changes while the tournament runs
    pub rating: i32,
    /// Running score, only ever written by `record_match`
    points: f32,
    matches: FxHashMap<PlayerId, MatchRecord>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, rating: i32) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
            points: 0.0,
            matches: FxHashMap::default(),
        }
    }

    pub fn points(&self) -> f32 {
        self.points
    }

    /// Store a finished game against `opponent` and score it.
    ///
    /// Callers are expected never to record the same opponent twice. If it
    /// happens anyway the old entry is replaced and its points withdrawn, so
    /// `points` always equals the sum over the history.
    pub(crate) fn record_match(&mut self, opponent: PlayerId, color: Color, result: GameResult) {
        let record = MatchRecord { color, result };
        if let Some(previous) = self.matches.insert(opponent, record) {
            tracing::debug!("{} already had a game against {}, replacing it", self.name, opponent);
            self.points -= previous.points();
        }
        self.points += record.points();
    }

    pub fn has_played(&self, opponent: PlayerId) -> bool {
        self.matches.contains_key(&opponent)
    }

    pub fn match_against(&self, opponent: PlayerId) -> Option<&MatchRecord> {
        self.matches.get(&opponent)
    }

    /// Opponents faced so far, in id order
    pub fn opponents(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.matches.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn games_played(&self) -> usize {
        self.matches.len()
    }

    /// Score recomputed from scratch out of the history
    pub fn score_from_history(&self) -> f32 {
        self.matches.values().map(MatchRecord::points).sum()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player() {
        let p = Player::new(PlayerId(0), "John1", 1900);
        assert_eq!(p.name, "John1");
        assert_eq!(p.rating, 1900);
        assert_eq!(p.points(), 0.0);
        assert_eq!(p.games_played(), 0);
        assert_eq!(p.to_string(), "John1");
    }

    #[test]
    fn test_record_win_as_white() {
        let mut p = Player::new(PlayerId(0), "a", 1500);
        p.record_match(PlayerId(1), Color::White, GameResult::WhiteWins);
        assert_eq!(p.points(), 1.0);
        assert!(p.has_played(PlayerId(1)));
        assert_eq!(p.match_against(PlayerId(1)).map(|m| m.outcome()), Some(Outcome::Win));
    }

    #[test]
    fn test_record_win_as_black() {
        let mut p = Player::new(PlayerId(0), "a", 1500);
        p.record_match(PlayerId(1), Color::Black, GameResult::BlackWins);
        assert_eq!(p.points(), 1.0);
    }

    #[test]
    fn test_record_loss_and_draw() {
        let mut p = Player::new(PlayerId(0), "a", 1500);
        p.record_match(PlayerId(1), Color::Black, GameResult::WhiteWins);
        assert_eq!(p.points(), 0.0);
        p.record_match(PlayerId(2), Color::White, GameResult::Draw);
        assert_eq!(p.points(), 0.5);
        assert_eq!(p.opponents(), vec![PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn test_rerecord_keeps_points_consistent() {
        let mut p = Player::new(PlayerId(0), "a", 1500);
        p.record_match(PlayerId(1), Color::White, GameResult::WhiteWins);
        p.record_match(PlayerId(1), Color::White, GameResult::Draw);
        assert_eq!(p.games_played(), 1);
        assert_eq!(p.points(), 0.5);
        assert_eq!(p.points(), p.score_from_history());
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
