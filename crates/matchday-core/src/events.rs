//! Client-side event list helpers

use std::cmp::Ordering;

use chrono::NaiveDate;

use matchday_api::{Event, Registration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    SportType,
}

/// Sort events in place. Dates compare chronologically when they parse as
/// ISO dates and lexically otherwise; sport categories compare
/// case-insensitively, with missing ones grouped under "General".
pub fn sort_events(events: &mut [Event], key: SortKey) {
    match key {
        SortKey::Date => events.sort_by(|a, b| compare_dates(&a.date, &b.date)),
        SortKey::SportType => events.sort_by(|a, b| sport_key(a).cmp(&sport_key(b))),
    }
}

/// Sort registrations by their event, same keys as [`sort_events`].
pub fn sort_registrations(registrations: &mut [Registration], key: SortKey) {
    match key {
        SortKey::Date => {
            registrations.sort_by(|a, b| compare_dates(&a.event.date, &b.event.date))
        }
        SortKey::SportType => {
            registrations.sort_by(|a, b| sport_key(&a.event).cmp(&sport_key(&b.event)))
        }
    }
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    let fmt = "%Y-%m-%d";
    match (
        NaiveDate::parse_from_str(a, fmt),
        NaiveDate::parse_from_str(b, fmt),
    ) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

fn sport_key(event: &Event) -> String {
    event
        .sport_type
        .as_deref()
        .unwrap_or("General")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, date: &str, sport: Option<&str>) -> Event {
        Event {
            id,
            event_name: format!("event-{id}"),
            sport_type: sport.map(|s| s.to_string()),
            description: None,
            date: date.to_string(),
            time: None,
            location: None,
            max_participants: None,
            registration_deadline: None,
        }
    }

    #[test]
    fn test_sort_by_date_is_chronological() {
        let mut events = vec![
            event(1, "2025-12-01", None),
            event(2, "2025-03-15", None),
            event(3, "2025-07-04", None),
        ];

        sort_events(&mut events, SortKey::Date);

        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_sport_is_case_insensitive() {
        let mut events = vec![
            event(1, "2025-01-01", Some("tennis")),
            event(2, "2025-01-01", Some("Basketball")),
            event(3, "2025-01-01", None),
        ];

        sort_events(&mut events, SortKey::SportType);

        // "Basketball" < "general" < "tennis"
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_unparseable_dates_fall_back_to_lexical() {
        let mut events = vec![event(1, "soon", None), event(2, "later", None)];

        sort_events(&mut events, SortKey::Date);

        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
