//! Bags (cornhole) tournament module.
//!
//! This module provides a single-elimination bracket for 4 or 8 players:
//! - Roster building with validated names
//! - Random seeding of the opening round
//! - Scoring to 21 with clamped scores
//! - Round advancement and champion detection
//! - Snapshot persistence to a key-value store
//!
//! ## Example
//!
//! ```
//! use beach_club::bags::{Side, TournamentEngine};
//!
//! let mut engine = TournamentEngine::new();
//! let mut state = engine.create_roster(4).unwrap();
//! for name in ["Ann", "Bea", "Cid", "Dee"] {
//!     state = engine.add_player(&state, name).unwrap();
//! }
//! let state = engine.start_tournament(&state).unwrap();
//!
//! let state = engine.record_score(&state, "r0-m0", Side::Player1, 21).unwrap();
//! let state = engine.record_score(&state, "r0-m1", Side::Player2, 21).unwrap();
//! let state = engine.try_advance_round(&state);
//! assert_eq!(state.current_round, 1);
//! ```

pub mod engine;
pub mod errors;
pub mod models;
pub mod seeding;
pub mod snapshot;

pub use engine::TournamentEngine;
pub use errors::{TournamentError, TournamentResult};
pub use models::{EntrantCount, Match, Player, Score, Side, TARGET_SCORE, TournamentState};
pub use seeding::BracketSeeder;
pub use snapshot::{SNAPSHOT_KEY, TournamentSnapshots};
