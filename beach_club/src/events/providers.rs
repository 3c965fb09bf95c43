//! Event source collaborators.

use super::{
    errors::{ProviderError, ProviderResult},
    models::{NewEvent, RawApiEvent, ScheduleCategory},
};
use async_trait::async_trait;
use serde::Deserialize;

/// Remote events API
#[async_trait]
pub trait ApiEventProvider: Send + Sync {
    /// Every event the API knows about
    async fn fetch_all(&self) -> ProviderResult<Vec<RawApiEvent>>;

    /// Create an event, returning the stored record
    async fn create_event(&self, event: NewEvent) -> ProviderResult<RawApiEvent>;

    /// Delete an event by API id
    async fn delete_event(&self, id: &str) -> ProviderResult<()>;
}

/// Provider used when no API is configured
///
/// Reads fail with `Unavailable`, which the aggregator degrades to an empty
/// contribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoApi;

#[async_trait]
impl ApiEventProvider for NoApi {
    async fn fetch_all(&self) -> ProviderResult<Vec<RawApiEvent>> {
        Err(ProviderError::Unavailable("no events API configured".to_string()))
    }

    async fn create_event(&self, _event: NewEvent) -> ProviderResult<RawApiEvent> {
        Err(ProviderError::Unavailable("no events API configured".to_string()))
    }

    async fn delete_event(&self, _id: &str) -> ProviderResult<()> {
        Err(ProviderError::Unavailable("no events API configured".to_string()))
    }
}

/// Fixed dataset of recurring performances
pub trait StaticScheduleProvider: Send + Sync {
    fn fetch_all(&self) -> ProviderResult<Vec<ScheduleCategory>>;
}

const BAND_GUIDE_JSON: &str = include_str!("../../data/band_guide.json");

#[derive(Deserialize)]
struct BandGuide {
    categories: Vec<ScheduleCategory>,
}

/// The compiled-in band guide
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSchedule;

impl StaticScheduleProvider for BuiltinSchedule {
    fn fetch_all(&self) -> ProviderResult<Vec<ScheduleCategory>> {
        let guide: BandGuide = serde_json::from_str(BAND_GUIDE_JSON)
            .map_err(|e| ProviderError::Decode(format!("band guide: {e}")))?;
        Ok(guide.categories)
    }
}

/// Schedule held in memory, mainly for tests
#[derive(Debug, Default, Clone)]
pub struct InlineSchedule(pub Vec<ScheduleCategory>);

impl StaticScheduleProvider for InlineSchedule {
    fn fetch_all(&self) -> ProviderResult<Vec<ScheduleCategory>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::normalize::from_schedule;

    #[test]
    fn test_builtin_schedule_parses() {
        let categories = BuiltinSchedule.fetch_all().unwrap();
        assert!(!categories.is_empty());

        let jirks = categories
            .iter()
            .flat_map(|c| c.bands.iter())
            .find(|b| b.name == "Brian Kirk & The Jirks")
            .expect("band present");
        assert_eq!(
            jirks.date.as_deref(),
            Some("July 17, August 24, September 14")
        );
    }

    #[test]
    fn test_builtin_schedule_is_strictly_valid() {
        for category in BuiltinSchedule.fetch_all().unwrap() {
            for band in &category.bands {
                from_schedule(&category, band, 2025, true).unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_no_api_is_unavailable() {
        assert!(matches!(
            NoApi.fetch_all().await,
            Err(ProviderError::Unavailable(_))
        ));
    }
}
