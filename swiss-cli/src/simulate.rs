//! Random result simulation - stands in for real games
//!
//! Each board gets one of "1-0", "0-1", "1/2-1/2" with equal probability.

use rand::seq::SliceRandom;
use rand::Rng;

use swiss_core::{GameResult, Match, Tournament};

/// Pick a result uniformly at random
pub fn random_result<R: Rng + ?Sized>(rng: &mut R) -> GameResult {
    *GameResult::ALL
        .choose(rng)
        .unwrap_or(&GameResult::Draw)
}

/// Fill in a random result for every board of the current round
pub fn play_round<R: Rng + ?Sized>(tournament: &mut Tournament, rng: &mut R) -> swiss_core::Result<()> {
    let boards: Vec<usize> = tournament.pairings().iter().map(|m| m.board).collect();
    for board in boards {
        tournament.record_result(board, random_result(rng))?;
    }
    Ok(())
}

/// Pair and simulate rounds until the tournament ends.
///
/// `on_round` sees every finished round's boards. Returns the number of
/// rounds played.
pub fn play_out<R, F>(tournament: &mut Tournament, rng: &mut R, mut on_round: F) -> swiss_core::Result<usize>
where
    R: Rng + ?Sized,
    F: FnMut(usize, &[Match]),
{
    let mut played = 0;
    loop {
        if tournament.generate_pairings()?.is_empty() {
            return Ok(played);
        }
        play_round(tournament, rng)?;
        played += 1;
        on_round(tournament.round(), tournament.pairings());
    }
}
