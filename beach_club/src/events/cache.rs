//! Time source and TTL cache for aggregated events.

use super::models::Event;
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::sync::{Arc, Mutex};

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day for "upcoming" filtering
    fn today(&self) -> NaiveDate;
}

/// Wall clock; `today` follows the local time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock moved by hand, for tests and replays
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|guard| *guard).unwrap_or_else(|e| *e.into_inner())
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Last aggregation result with its fetch time
///
/// Valid while `now - fetched_at < ttl`.
#[derive(Debug, Clone)]
pub struct EventCache {
    events: Option<Arc<Vec<Event>>>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: Duration,
}

impl EventCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            events: None,
            fetched_at: None,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached events if still fresh at `now`
    pub fn get(&self, now: DateTime<Utc>) -> Option<Arc<Vec<Event>>> {
        match (&self.events, self.fetched_at) {
            (Some(events), Some(fetched_at)) if now - fetched_at < self.ttl => {
                Some(Arc::clone(events))
            }
            _ => None,
        }
    }

    pub fn set(&mut self, events: Arc<Vec<Event>>, now: DateTime<Utc>) {
        self.events = Some(events);
        self.fetched_at = Some(now);
    }

    pub fn invalidate(&mut self) {
        self.events = None;
        self.fetched_at = None;
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_none()
    }
}
