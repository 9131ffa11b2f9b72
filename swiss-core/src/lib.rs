//! Swiss Core - Swiss-system tournament engine
//!
//! This crate provides the pairing and standings logic for a single
//! in-memory Swiss tournament:
//! - Players with per-opponent match history and running score
//! - Matches that commit results into both players' histories
//! - Standings ranked by (points, rating)
//! - Greedy nearest-neighbour pairing without rematches
//! - The tournament state machine driving rounds to exhaustion
//!
//! Rendering, roster I/O beyond JSON loading, and result simulation are left
//! to consumers (see the `swiss-cli` crate).

pub mod config;
pub mod error;
pub mod matchup;
pub mod pairing;
pub mod player;
pub mod presenter;
pub mod result;
pub mod roster;
pub mod standings;
pub mod tournament;

// Re-exports for convenient access
pub use config::TournamentConfig;
pub use error::{Result, TournamentError};
pub use matchup::Match;
pub use pairing::{pair_round, Pairing, RoundPairings};
pub use player::{Color, MatchRecord, Player, PlayerId};
pub use presenter::StandingsPresenter;
pub use result::{GameResult, Outcome};
pub use roster::{Roster, RosterEntry};
pub use standings::{rank, rank_by_rating, table, Standing};
pub use tournament::{RoundRecord, Tournament, TournamentState};
