//! Unified event calendar.
//!
//! Events come from three places:
//! - **API**: the club's events endpoint (may be down)
//! - **Band schedule**: the compiled-in band guide, one event per listed date
//! - **Bags tournaments**: user-scheduled tournaments in the key-value store
//!
//! [`UnifiedEventAggregator`] normalizes them into [`Event`], caches the
//! result for a short TTL and answers "what's coming up" queries. A failing
//! source is logged and skipped; if nothing comes back at all, a handful of
//! demo events keep the calendar from being empty.
//!
//! ## Example
//!
//! ```
//! use beach_club::config::AggregatorConfig;
//! use beach_club::events::{BuiltinSchedule, NoApi, UnifiedEventAggregator};
//! use beach_club::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let aggregator = UnifiedEventAggregator::new(
//!         Arc::new(NoApi),
//!         Arc::new(BuiltinSchedule),
//!         Arc::new(MemoryStore::new()),
//!         AggregatorConfig::default(),
//!     );
//!
//!     for event in aggregator.get_upcoming(5).await {
//!         println!("{} {} {}", event.event_date, event.event_time, event.title);
//!     }
//! }
//! ```

pub mod aggregator;
pub mod cache;
pub mod demo;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod providers;

pub use aggregator::UnifiedEventAggregator;
pub use cache::{Clock, EventCache, ManualClock, SystemClock};
pub use errors::{EventError, EventResult, ProviderError, ProviderResult, ScheduleError};
pub use models::{
    Event, EventSource, EventType, NewEvent, NewTournamentEntry, RawApiEvent, RawId,
    ScheduleCategory, ScheduleEntry, StoredTournament,
};
pub use providers::{
    ApiEventProvider, BuiltinSchedule, InlineSchedule, NoApi, StaticScheduleProvider,
};
