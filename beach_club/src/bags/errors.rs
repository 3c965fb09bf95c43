//! Bags tournament error types.

use thiserror::Error;

/// Tournament errors
///
/// All of these are validation failures on caller input. None are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Entrant count other than 4 or 8
    #[error("Invalid tournament size: {0} (must be 4 or 8)")]
    InvalidSize(u8),

    /// Roster already holds every entrant
    #[error("Roster is full ({capacity} players)")]
    RosterFull { capacity: usize },

    /// Player name empty or whitespace
    #[error("Player name must not be empty")]
    InvalidName,

    /// Tried to start before the roster was filled
    #[error("Incomplete roster: need {needed}, have {current}")]
    IncompleteRoster { needed: usize, current: usize },

    /// No match with this id in the current round
    #[error("Match not found in current round: {0}")]
    MatchNotFound(String),

    /// Match already has a winner
    #[error("Match already decided: {0}")]
    MatchAlreadyDecided(String),

    /// Roster is locked once a bracket exists
    #[error("Tournament already started")]
    AlreadyStarted,
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
