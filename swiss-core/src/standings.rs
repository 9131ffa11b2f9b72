//! Standings - ranked view of the players
//!
//! Standings are recomputed from player state whenever they are needed and
//! never stored as a source of truth. Ordering is by points (descending),
//! then rating (descending). There is no further tie-break: players equal
//! on both keep their registration order (the sorts are stable).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};

/// One row of the standings table, as handed to presenters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position
    pub rank: usize,
    pub id: PlayerId,
    pub name: String,
    pub points: f32,
    pub rating: i32,
    pub games_played: usize,
}

/// Rank players by (points, rating), highest first
pub fn rank(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| compare(a, b));
    ranked
}

/// Rank players by rating alone (start of the tournament)
pub fn rank_by_rating(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| b.rating.cmp(&a.rating));
    ranked
}

/// Build presentation rows from the current player state
pub fn table(players: &[Player]) -> Vec<Standing> {
    rank(players)
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            id: p.id,
            name: p.name.clone(),
            points: p.points(),
            rating: p.rating,
            games_played: p.games_played(),
        })
        .collect()
}

fn compare(a: &Player, b: &Player) -> Ordering {
    b.points()
        .partial_cmp(&a.points())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.rating.cmp(&a.rating))
}
