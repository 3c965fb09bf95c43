//! Event data models.
//!
//! Raw records come in three shapes (API, band schedule, stored tournament
//! entries) and are normalized into [`Event`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of event shown on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Party,
    Concert,
    Gathering,
    Dinner,
    Tournament,
    Other,
}

impl EventType {
    /// Parse a free-form tag; anything unknown is `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "party" => EventType::Party,
            "concert" => EventType::Concert,
            "gathering" => EventType::Gathering,
            "dinner" => EventType::Dinner,
            "tournament" => EventType::Tournament,
            _ => EventType::Other,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventType::Party => "party",
            EventType::Concert => "concert",
            EventType::Gathering => "gathering",
            EventType::Dinner => "dinner",
            EventType::Tournament => "tournament",
            EventType::Other => "other",
        };
        f.write_str(name)
    }
}

/// Which provider produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Api,
    Band,
    Bags,
    Demo,
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventSource::Api => "api",
            EventSource::Band => "band",
            EventSource::Bags => "bags",
            EventSource::Demo => "demo",
        };
        f.write_str(name)
    }
}

/// Normalized calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique across sources; non-API ids carry a source prefix
    pub id: String,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub event_type: EventType,
    pub source: EventSource,
    /// Email of the creator, `system` for built-in data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Schedule category for band events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Identifier that may arrive as a JSON number or string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

/// Event record as returned by the events API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApiEvent {
    pub id: Option<RawId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO date-time, preferred over `event_date`/`event_time`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Payload for creating an event through the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub event_type: EventType,
}

/// One group of bands in the static schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCategory {
    pub id: String,
    pub name: String,
    pub bands: Vec<ScheduleEntry>,
}

/// A recurring performer in the static schedule
///
/// `date` holds comma-separated `"<Month> <Day>"` strings and `time` the
/// matching slash-separated times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// User-created tournament entry kept in the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTournament {
    pub id: RawId,
    pub name: String,
    /// Bracket size, 4 or 8
    #[serde(rename = "type")]
    pub size: u8,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Request to schedule a new bags tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTournamentEntry {
    pub name: String,
    pub size: u8,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<String>,
}
