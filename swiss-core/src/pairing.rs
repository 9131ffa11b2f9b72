//! Pairing engine - greedy nearest-neighbour Swiss pairing
//!
//! Walks the standings from the top. Each player not yet paired takes the
//! closest lower-ranked player they have not met: smallest points gap
//! first, smallest rating gap as the tie-break, first candidate in
//! standings order on a full tie. A player with no eligible opponent sits
//! the round out. No colour history is consulted; colours are drawn from
//! the supplied RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId};

/// A pair for the coming round with colours assigned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub white: PlayerId,
    pub black: PlayerId,
}

impl Pairing {
    /// Both ids with the lower one first, ignoring colour
    pub fn unordered(&self) -> (PlayerId, PlayerId) {
        (self.white.min(self.black), self.white.max(self.black))
    }
}

/// Output of one pairing pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundPairings {
    /// Pairs in the order they were formed (top of the standings first)
    pub pairings: Vec<Pairing>,
    /// Players left without an opponent, in standings order
    pub byes: Vec<PlayerId>,
}

impl RoundPairings {
    /// No pair could be formed: every possible game has been played
    pub fn is_exhausted(&self) -> bool {
        self.pairings.is_empty()
    }
}

/// Distance between two players: (points gap, rating gap)
#[derive(Clone, Copy, Debug, PartialEq)]
struct Distance {
    points: f32,
    rating: u32,
}

impl Distance {
    fn between(a: &Player, b: &Player) -> Self {
        Self {
            points: (a.points() - b.points()).abs(),
            rating: a.rating.abs_diff(b.rating),
        }
    }

    /// Strictly closer; a full tie is not closer
    fn closer_than(&self, other: &Distance) -> bool {
        self.points < other.points || (self.points == other.points && self.rating < other.rating)
    }
}

/// Pair one round from players already in standings order.
///
/// The ranked slice is not modified; the pass tracks who is taken in its
/// own visited list.
pub fn pair_round<R: Rng + ?Sized>(ranked: &[&Player], rng: &mut R) -> RoundPairings {
    let mut taken = vec![false; ranked.len()];
    let mut round = RoundPairings::default();

    for (i, player) in ranked.iter().enumerate() {
        if taken[i] {
            continue;
        }

        match closest_opponent(ranked, &taken, i) {
            Some(j) => {
                taken[i] = true;
                taken[j] = true;
                let opponent = ranked[j];
                tracing::debug!(
                    "Paired {} ({}, {}) with {} ({}, {})",
                    player.name,
                    player.points(),
                    player.rating,
                    opponent.name,
                    opponent.points(),
                    opponent.rating
                );
                round.pairings.push(assign_colors(player, opponent, rng));
            }
            None => {
                taken[i] = true;
                tracing::debug!("No eligible opponent for {}, sitting out", player.name);
                round.byes.push(player.id);
            }
        }
    }

    round
}

/// Index of the closest untaken, not-yet-met player ranked below `i`
fn closest_opponent(ranked: &[&Player], taken: &[bool], i: usize) -> Option<usize> {
    let player = ranked[i];
    let mut best: Option<(usize, Distance)> = None;

    for (j, candidate) in ranked.iter().enumerate().skip(i + 1) {
        if taken[j] || player.has_played(candidate.id) {
            continue;
        }

        let distance = Distance::between(player, candidate);
        match best {
            Some((_, current)) if !distance.closer_than(&current) => {}
            _ => best = Some((j, distance)),
        }
    }

    best.map(|(j, _)| j)
}

/// Coin flip: heads keeps the higher-ranked player on white
fn assign_colors<R: Rng + ?Sized>(higher: &Player, lower: &Player, rng: &mut R) -> Pairing {
    if rng.gen_bool(0.5) {
        Pairing { white: higher.id, black: lower.id }
    } else {
        Pairing { white: lower.id, black: higher.id }
    }
}
