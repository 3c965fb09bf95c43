//! # Beach Club
//!
//! Game and calendar logic for a beach club community app.
//!
//! ## Core Modules
//!
//! - [`bags`]: Single-elimination bags (cornhole) tournaments for 4 or 8
//!   players, as a pure state machine with snapshot persistence
//! - [`events`]: The unified event calendar merging the events API, the band
//!   schedule and scheduled bags tournaments behind a TTL cache
//! - [`store`]: String key-value stores (in memory or a JSON file)
//! - [`config`]: Environment-driven aggregator configuration
//!
//! ## Example
//!
//! ```
//! use beach_club::bags::TournamentEngine;
//!
//! let mut engine = TournamentEngine::new();
//! let mut state = engine.create_roster(4).unwrap();
//! for name in ["Ann", "Bea", "Cid", "Dee"] {
//!     state = engine.add_player(&state, name).unwrap();
//! }
//! let state = engine.start_tournament(&state).unwrap();
//! assert_eq!(state.current_matches().count(), 2);
//! ```

/// Bags tournament bracket engine.
pub mod bags;
pub use bags::{TournamentEngine, TournamentError, TournamentState};

/// Aggregator configuration.
pub mod config;
pub use config::{AggregatorConfig, ConfigError};

/// Unified event calendar.
pub mod events;
pub use events::{Event, UnifiedEventAggregator};

/// Persisted string stores.
pub mod store;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
