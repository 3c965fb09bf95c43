//! Placeholder events shown when every source comes back empty.

use super::models::{Event, EventSource, EventType};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// Build the demo calendar relative to `today`
///
/// Always non-empty: tomorrow, next week, next month, the next July 4th and
/// the coming Saturday.
pub fn demo_events(today: NaiveDate) -> Vec<Event> {
    let tomorrow = today + Duration::days(1);
    let next_week = today + Duration::days(7);
    let next_month = today
        .checked_add_months(Months::new(1))
        .unwrap_or(today + Duration::days(30));

    vec![
        demo(
            1,
            "Beach Volleyball Tournament",
            "Join us for a fun volleyball tournament on the beach!",
            tomorrow,
            "2:00 PM",
            "Main Beach Court",
            EventType::Tournament,
        ),
        demo(
            2,
            "Live Music - The Wave Riders",
            "Enjoy live music by the beach with The Wave Riders band",
            next_week,
            "6:00 PM",
            "Beach Stage",
            EventType::Concert,
        ),
        demo(
            3,
            "Sunrise Yoga Session",
            "Start your day with peaceful yoga by the ocean",
            next_month,
            "7:00 AM",
            "East Beach",
            EventType::Gathering,
        ),
        demo(
            4,
            "4th of July Beach Party",
            "Celebrate Independence Day with fireworks and fun!",
            next_july_fourth(today),
            "7:00 PM",
            "Main Beach",
            EventType::Party,
        ),
        demo(
            5,
            "Saturday Beach Cleanup",
            "Help keep our beach beautiful! Free lunch provided.",
            next_saturday(today),
            "10:00 AM",
            "Main Beach Entrance",
            EventType::Gathering,
        ),
    ]
}

fn demo(
    n: u8,
    title: &str,
    description: &str,
    event_date: NaiveDate,
    event_time: &str,
    location: &str,
    event_type: EventType,
) -> Event {
    Event {
        id: format!("demo-event-{n}"),
        title: title.to_string(),
        description: description.to_string(),
        event_date,
        event_time: event_time.to_string(),
        location: location.to_string(),
        event_type,
        source: EventSource::Demo,
        created_by: None,
        category: None,
    }
}

/// This year's July 4th unless it has passed
fn next_july_fourth(today: NaiveDate) -> NaiveDate {
    let this_year = NaiveDate::from_ymd_opt(today.year(), 7, 4).unwrap_or(today);
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, 7, 4).unwrap_or(this_year)
    } else {
        this_year
    }
}

/// Strictly after today; a Saturday maps to the following one
fn next_saturday(today: NaiveDate) -> NaiveDate {
    let from_monday = today.weekday().num_days_from_monday();
    let saturday = Weekday::Sat.num_days_from_monday();
    let days = match (saturday + 7 - from_monday) % 7 {
        0 => 7,
        n => n,
    };
    today + Duration::days(i64::from(days))
}
