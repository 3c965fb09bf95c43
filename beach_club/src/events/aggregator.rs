//! Unified event aggregation across the API, the band schedule and the
//! stored bags tournaments.

use super::{
    cache::{Clock, EventCache, SystemClock},
    demo::demo_events,
    errors::{EventError, EventResult},
    models::{Event, NewEvent, NewTournamentEntry, RawApiEvent, RawId, StoredTournament},
    normalize::{from_api, from_schedule, from_store},
    providers::{ApiEventProvider, StaticScheduleProvider},
};
use crate::{config::AggregatorConfig, store::KeyValueStore};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Merges every event source into one date-sortable list
///
/// Reads never fail: a broken source contributes nothing and, when nothing
/// at all comes back, demo events are served instead.
pub struct UnifiedEventAggregator {
    api: Arc<dyn ApiEventProvider>,
    schedule: Arc<dyn StaticScheduleProvider>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: AggregatorConfig,
    cache: RwLock<EventCache>,
}

impl UnifiedEventAggregator {
    /// Create an aggregator using the system clock
    pub fn new(
        api: Arc<dyn ApiEventProvider>,
        schedule: Arc<dyn StaticScheduleProvider>,
        store: Arc<dyn KeyValueStore>,
        config: AggregatorConfig,
    ) -> Self {
        Self::with_clock(api, schedule, store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        api: Arc<dyn ApiEventProvider>,
        schedule: Arc<dyn StaticScheduleProvider>,
        store: Arc<dyn KeyValueStore>,
        config: AggregatorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = RwLock::new(EventCache::new(config.cache_ttl));
        Self {
            api,
            schedule,
            store,
            clock,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Every event, reusing the cache while it is fresh
    ///
    /// # Arguments
    ///
    /// * `force` - Skip the cache and reload all sources
    ///
    /// # Returns
    ///
    /// * `Arc<Vec<Event>>` - API events, then band events, then stored
    ///   tournaments; demo events if all three were empty
    pub async fn load_all(&self, force: bool) -> Arc<Vec<Event>> {
        if !force && let Some(events) = self.cache.read().await.get(self.clock.now()) {
            debug!("Using {} cached events", events.len());
            return events;
        }

        info!("Loading fresh events");
        let mut events = self.load_api_events().await;
        events.extend(self.load_band_events());
        events.extend(self.load_tournament_events());

        if events.is_empty() {
            info!("No events from any source, serving demo events");
            events = demo_events(self.clock.today());
        }

        let events = Arc::new(events);
        self.cache
            .write()
            .await
            .set(Arc::clone(&events), self.clock.now());
        info!("Total events loaded: {}", events.len());
        events
    }

    /// Alias of `load_all(false)`
    pub async fn get_all(&self) -> Arc<Vec<Event>> {
        self.load_all(false).await
    }

    /// Events dated today or later, soonest first
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of events returned
    pub async fn get_upcoming(&self, limit: usize) -> Vec<Event> {
        let events = self.load_all(false).await;
        let today = self.clock.today();

        let mut upcoming: Vec<Event> = events
            .iter()
            .filter(|e| e.event_date >= today)
            .cloned()
            .collect();
        // Stable, so same-day events keep load order
        upcoming.sort_by_key(|e| e.event_date);
        upcoming.truncate(limit);

        debug!("Returning {} upcoming events", upcoming.len());
        upcoming
    }

    /// Drop the cached events so the next read reloads
    pub async fn invalidate(&self) {
        self.cache.write().await.invalidate();
        debug!("Events cache cleared");
    }

    /// Create an event through the API
    ///
    /// # Errors
    ///
    /// Provider failures propagate; the cache is only cleared on success.
    pub async fn create_event(&self, event: NewEvent) -> EventResult<RawApiEvent> {
        let created = self.api.create_event(event).await?;
        self.invalidate().await;
        Ok(created)
    }

    /// Delete an API event
    pub async fn delete_event(&self, id: &str) -> EventResult<()> {
        self.api.delete_event(id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Schedule a bags tournament in the store
    ///
    /// The entry id is the creation time in milliseconds, bumped past any
    /// existing id so rapid creations never collide.
    ///
    /// # Errors
    ///
    /// * `InvalidEntry` - Blank name or size other than 4/8
    /// * `Store` / `Serialization` - Store unreadable or unwritable
    pub async fn add_tournament_entry(
        &self,
        entry: NewTournamentEntry,
    ) -> EventResult<StoredTournament> {
        if entry.name.trim().is_empty() {
            return Err(EventError::InvalidEntry("name must not be empty".to_string()));
        }
        if entry.size != 4 && entry.size != 8 {
            return Err(EventError::InvalidEntry(format!(
                "size must be 4 or 8, got {}",
                entry.size
            )));
        }

        let mut entries = self.read_raw_entries()?;
        let now = self.clock.now();
        let max_existing = entries
            .iter()
            .filter_map(|t| t.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(i64::MIN);
        let id = now.timestamp_millis().max(max_existing.saturating_add(1));

        let stored = StoredTournament {
            id: RawId::Number(id),
            name: entry.name.trim().to_string(),
            size: entry.size,
            date: Some(entry.date.format("%Y-%m-%d").to_string()),
            time: entry.time,
            description: entry.description,
            created_by: Some(entry.created_by.unwrap_or_else(|| "anonymous".to_string())),
            created_at: Some(now.to_rfc3339()),
            status: Some("upcoming".to_string()),
        };
        entries.push(serde_json::to_value(&stored)?);
        self.write_tournament_entries(&entries)?;
        self.invalidate().await;

        info!("Scheduled bags tournament {} ({})", stored.name, id);
        Ok(stored)
    }

    /// Remove a scheduled tournament
    ///
    /// Accepts either the raw entry id or the `tournament-<id>` event id.
    ///
    /// # Errors
    ///
    /// `EntryNotFound` when nothing matched
    pub async fn remove_tournament_entry(&self, id: &str) -> EventResult<()> {
        let raw_id = id.strip_prefix("tournament-").unwrap_or(id);
        let mut entries = self.read_raw_entries()?;
        let before = entries.len();
        entries.retain(|t| entry_id(t).as_deref() != Some(raw_id));

        if entries.len() == before {
            return Err(EventError::EntryNotFound(id.to_string()));
        }
        self.write_tournament_entries(&entries)?;
        self.invalidate().await;
        Ok(())
    }

    /// Scheduled tournaments as stored
    pub fn tournament_entries(&self) -> EventResult<Vec<StoredTournament>> {
        self.read_tournament_entries()
    }

    async fn load_api_events(&self) -> Vec<Event> {
        match self.api.fetch_all().await {
            Ok(raw) => {
                let events: Vec<Event> = raw.into_iter().filter_map(from_api).collect();
                info!("Loaded {} API events", events.len());
                events
            }
            Err(e) => {
                warn!("API events failed: {}", e);
                Vec::new()
            }
        }
    }

    fn load_band_events(&self) -> Vec<Event> {
        let categories = match self.schedule.fetch_all() {
            Ok(categories) => categories,
            Err(e) => {
                warn!("Band schedule failed: {}", e);
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for category in &categories {
            for band in &category.bands {
                match from_schedule(
                    category,
                    band,
                    self.config.reference_year,
                    self.config.strict_dates,
                ) {
                    Ok(band_events) => events.extend(band_events),
                    Err(e) => {
                        warn!("Band schedule rejected: {}", e);
                        return Vec::new();
                    }
                }
            }
        }
        info!("Loaded {} band events", events.len());
        events
    }

    fn load_tournament_events(&self) -> Vec<Event> {
        match self.read_tournament_entries() {
            Ok(entries) => {
                let events: Vec<Event> = entries.into_iter().filter_map(from_store).collect();
                info!("Loaded {} tournament events", events.len());
                events
            }
            Err(e) => {
                warn!("Tournament entries failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Stored entries that decode; the rest are logged and skipped
    fn read_tournament_entries(&self) -> EventResult<Vec<StoredTournament>> {
        let entries = self
            .read_raw_entries()?
            .into_iter()
            .filter_map(|raw| match serde_json::from_value(raw.clone()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable tournament entry {}: {}", raw, e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }

    /// The stored array as-is, so rewrites keep entries this version cannot read
    fn read_raw_entries(&self) -> EventResult<Vec<Value>> {
        match self.store.get(&self.config.tournaments_key)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write_tournament_entries(&self, entries: &[Value]) -> EventResult<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(&self.config.tournaments_key, &json)?;
        Ok(())
    }
}

/// Id of a raw stored entry, in the form `RawId` displays it
fn entry_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{
        cache::ManualClock,
        errors::{ProviderError, ProviderResult},
        models::{EventSource, ScheduleCategory},
        providers::{InlineSchedule, NoApi},
    };
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};

    struct FailingSchedule;

    impl StaticScheduleProvider for FailingSchedule {
        fn fetch_all(&self) -> ProviderResult<Vec<ScheduleCategory>> {
            Err(ProviderError::Decode("broken".to_string()))
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 7, 1, 15, 0, 0).unwrap(),
        ))
    }

    fn aggregator(store: Arc<MemoryStore>) -> UnifiedEventAggregator {
        UnifiedEventAggregator::with_clock(
            Arc::new(NoApi),
            Arc::new(FailingSchedule),
            store,
            AggregatorConfig::default(),
            clock(),
        )
    }

    fn entry(name: &str, date: NaiveDate) -> NewTournamentEntry {
        NewTournamentEntry {
            name: name.to_string(),
            size: 4,
            date,
            time: None,
            description: None,
            created_by: Some("admin@edgewater.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_empty_sources_yield_demo_events() {
        let agg = aggregator(Arc::new(MemoryStore::new()));
        let events = agg.load_all(false).await;
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.source == EventSource::Demo));
    }

    #[tokio::test]
    async fn test_add_and_remove_tournament_entry() {
        let store = Arc::new(MemoryStore::new());
        let agg = aggregator(store.clone());
        let date = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();

        let first = agg.add_tournament_entry(entry("Showdown", date)).await.unwrap();
        let second = agg.add_tournament_entry(entry("Rematch", date)).await.unwrap();
        assert_ne!(first.id, second.id);

        let events = agg.load_all(false).await;
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.source == EventSource::Bags));

        agg.remove_tournament_entry(&format!("tournament-{}", first.id))
            .await
            .unwrap();
        let events = agg.load_all(false).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Rematch");
    }

    #[tokio::test]
    async fn test_remove_unknown_entry() {
        let agg = aggregator(Arc::new(MemoryStore::new()));
        assert!(matches!(
            agg.remove_tournament_entry("tournament-99").await,
            Err(EventError::EntryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_entry_validation() {
        let agg = aggregator(Arc::new(MemoryStore::new()));
        let date = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();

        let mut bad_size = entry("Odd", date);
        bad_size.size = 6;
        assert!(matches!(
            agg.add_tournament_entry(bad_size).await,
            Err(EventError::InvalidEntry(_))
        ));
        assert!(matches!(
            agg.add_tournament_entry(entry("  ", date)).await,
            Err(EventError::InvalidEntry(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_store_degrades() {
        let store = Arc::new(MemoryStore::with_entries([("bags_tournaments", "{oops")]));
        let agg = aggregator(store);
        let events = agg.load_all(false).await;
        assert!(events.iter().all(|e| e.source == EventSource::Demo));
    }

    #[tokio::test]
    async fn test_strict_dates_drop_whole_schedule() {
        let schedule = InlineSchedule(vec![ScheduleCategory {
            id: "c".to_string(),
            name: "Cat".to_string(),
            bands: vec![crate::events::models::ScheduleEntry {
                name: "Band".to_string(),
                date: Some("July 5, Jully 6".to_string()),
                time: None,
                rating: 3,
                description: String::new(),
                tags: Vec::new(),
            }],
        }]);
        let config = AggregatorConfig {
            strict_dates: true,
            ..Default::default()
        };
        let agg = UnifiedEventAggregator::with_clock(
            Arc::new(NoApi),
            Arc::new(schedule.clone()),
            Arc::new(MemoryStore::new()),
            config,
            clock(),
        );
        let events = agg.load_all(false).await;
        assert!(events.iter().all(|e| e.source == EventSource::Demo));

        let lenient = UnifiedEventAggregator::with_clock(
            Arc::new(NoApi),
            Arc::new(schedule),
            Arc::new(MemoryStore::new()),
            AggregatorConfig::default(),
            clock(),
        );
        let events = lenient.load_all(false).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, EventSource::Band);
    }
}
