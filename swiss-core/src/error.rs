//! Error type for tournament operations

use crate::player::PlayerId;

/// Errors raised by the tournament core
///
/// Apart from `InvalidResult`, every variant is a precondition violation:
/// the caller drove the tournament out of order and must fix its state
/// before trying again.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TournamentError {
    #[error("tournament already started; roster is frozen")]
    AlreadyStarted,

    #[error("tournament has not been started")]
    NotStarted,

    #[error("player already registered: {0}")]
    DuplicatePlayer(String),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("no match on board {0} this round")]
    NoSuchBoard(usize),

    #[error("invalid result {0:?} (expected 1-0, 0-1 or 1/2-1/2)")]
    InvalidResult(String),

    #[error("match already has a result")]
    MatchAlreadyResolved,

    #[error("match has no result to apply")]
    MatchUnresolved,

    #[error("match result already applied to players")]
    MatchAlreadyCommitted,

    #[error("current round still has {pending} unfinished match(es)")]
    RoundInProgress { pending: usize },
}

pub type Result<T> = std::result::Result<T, TournamentError>;
