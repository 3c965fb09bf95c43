//! Mapping of raw source records into [`Event`].

use super::{
    errors::ScheduleError,
    models::{
        Event, EventSource, EventType, RawApiEvent, ScheduleCategory, ScheduleEntry,
        StoredTournament,
    },
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;

/// Time used for schedule entries with no time at all
pub const DEFAULT_SHOW_TIME: &str = "6:00 PM";
/// Time used for stored tournaments without one
pub const DEFAULT_TOURNAMENT_TIME: &str = "2:00 PM";
/// Placeholder for API events with no time information
pub const TIME_TBD: &str = "Time TBD";

pub const BAND_LOCATION: &str = "Beach Stage";
pub const BAGS_LOCATION: &str = "Bags Court";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Normalize an API record
///
/// Returns `None` (with a warning) when no usable date can be found.
pub fn from_api(raw: RawApiEvent) -> Option<Event> {
    let stamp = raw.date.as_deref().and_then(parse_date_time);
    let date_part = raw
        .date
        .as_deref()
        .and_then(|d| d.split('T').next())
        .filter(|d| !d.is_empty())
        .or(raw.event_date.as_deref());

    let Some(event_date) = date_part.and_then(parse_iso_date) else {
        warn!(
            "Dropping API event {:?} ({}) with unusable date",
            raw.id, raw.title
        );
        return None;
    };

    let event_time = match stamp {
        Some(stamp) => format_time(&stamp),
        None => raw.event_time.unwrap_or_else(|| TIME_TBD.to_string()),
    };

    Some(Event {
        id: raw
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("api-{}-{}", raw.title, event_date)),
        title: raw.title,
        description: raw.description.unwrap_or_default(),
        event_date,
        event_time,
        location: raw.location.unwrap_or_default(),
        event_type: raw
            .event_type
            .as_deref()
            .map(EventType::from_tag)
            .unwrap_or(EventType::Other),
        source: EventSource::Api,
        created_by: raw.created_by,
        category: None,
    })
}

/// Expand one schedule entry into one event per listed date
///
/// Dates and times are zipped by position; when there are fewer times than
/// dates the first time is reused.
///
/// # Errors
///
/// Only in `strict` mode: `UnparsableDate` for the first date that does not
/// resolve. Otherwise such dates are skipped.
pub fn from_schedule(
    category: &ScheduleCategory,
    band: &ScheduleEntry,
    reference_year: i32,
    strict: bool,
) -> Result<Vec<Event>, ScheduleError> {
    let Some(date_field) = band.date.as_deref() else {
        return Ok(Vec::new());
    };

    let dates = parse_schedule_dates(&band.name, date_field, reference_year, strict)?;
    let times = split_times(band.time.as_deref());

    let events = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| Event {
            id: format!("band-{}-{}", band.name, date),
            title: band.name.clone(),
            description: band.description.clone(),
            event_date: date,
            event_time: times.get(i).unwrap_or(&times[0]).clone(),
            location: BAND_LOCATION.to_string(),
            event_type: EventType::Concert,
            source: EventSource::Band,
            created_by: Some("system".to_string()),
            category: Some(category.name.clone()),
        })
        .collect();
    Ok(events)
}

/// Normalize a stored tournament entry
///
/// Entries without a parseable date are skipped.
pub fn from_store(entry: StoredTournament) -> Option<Event> {
    let event_date = entry.date.as_deref().and_then(parse_iso_date)?;

    Some(Event {
        id: format!("tournament-{}", entry.id),
        description: entry
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{}-player Bags Tournament", entry.size)),
        title: entry.name,
        event_date,
        event_time: entry
            .time
            .unwrap_or_else(|| DEFAULT_TOURNAMENT_TIME.to_string()),
        location: BAGS_LOCATION.to_string(),
        event_type: EventType::Tournament,
        source: EventSource::Bags,
        created_by: Some(entry.created_by.unwrap_or_else(|| "system".to_string())),
        category: None,
    })
}

/// Resolve `"June 21, July 17"` against `reference_year`
pub fn parse_schedule_dates(
    band: &str,
    field: &str,
    reference_year: i32,
    strict: bool,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    let mut dates = Vec::new();
    for part in field.split(',').map(str::trim) {
        match parse_month_day(part, reference_year) {
            Some(date) => dates.push(date),
            None if strict => {
                return Err(ScheduleError::UnparsableDate {
                    band: band.to_string(),
                    value: part.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(dates)
}

/// `"6:00 PM / 7:30 PM"` into its parts; never empty
pub fn split_times(field: Option<&str>) -> Vec<String> {
    let times: Vec<String> = field
        .map(|f| {
            f.split('/')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if times.is_empty() {
        vec![DEFAULT_SHOW_TIME.to_string()]
    } else {
        times
    }
}

/// `"<MonthName> <Day>"`, month name matched exactly
fn parse_month_day(value: &str, year: i32) -> Option<NaiveDate> {
    let mut parts = value.split_whitespace();
    let month_name = parts.next()?;
    let day_part = parts.next()?;

    let month = MONTH_NAMES.iter().position(|m| *m == month_name)? as u32 + 1;
    // Leading digits only, so "21st" reads as 21
    let digits: String = day_part.chars().take_while(char::is_ascii_digit).collect();
    let day = digits.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// `18:30` as `6:30 PM`
fn format_time(stamp: &NaiveDateTime) -> String {
    stamp.format("%-I:%M %p").to_string()
}
