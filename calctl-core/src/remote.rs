//! The remote calendar service as seen by the operations.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CalctlResult;
use crate::time::WireInstant;

/// A calendar the authenticated identity can access.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRef {
    pub id: String,
    pub label: String,
}

/// One bound of an event. Timed events carry `date_time`, all-day events `date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBound {
    pub date_time: Option<WireInstant>,
    pub date: Option<NaiveDate>,
    pub time_zone: Option<String>,
}

impl EventBound {
    pub fn timed(instant: WireInstant, zone: &str) -> Self {
        EventBound {
            date_time: Some(instant),
            date: None,
            time_zone: Some(zone.to_string()),
        }
    }

    pub fn all_day(date: NaiveDate) -> Self {
        EventBound {
            date: Some(date),
            ..Default::default()
        }
    }

    /// The instant this bound starts at; all-day dates start at local midnight.
    pub fn instant(&self, zone: Tz) -> Option<DateTime<Utc>> {
        if let Some(dt) = self.date_time {
            return Some(dt.to_utc());
        }
        let midnight = self.date?.and_hms_opt(0, 0, 0)?;
        zone.from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Date-time when present, otherwise the all-day date.
    pub fn display(&self) -> String {
        match (&self.date_time, &self.date) {
            (Some(dt), _) => dt.to_wire(),
            (None, Some(date)) => date.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub email: String,
    pub response_status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    /// Assigned by the remote service; empty for events not yet created.
    pub id: String,
    pub title: String,
    pub description: String,
    pub start: EventBound,
    pub end: EventBound,
    pub status: String,
    pub attendees: Vec<Attendee>,
}

/// Filters for listing events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub max_results: u32,
    pub time_min: DateTime<Utc>,
    /// Expand recurring events into single occurrences.
    pub single_events: bool,
    pub order_by_start_time: bool,
}

impl EventQuery {
    pub fn upcoming(max_results: u32, now: DateTime<Utc>) -> Self {
        EventQuery {
            max_results,
            time_min: now,
            single_events: true,
            order_by_start_time: true,
        }
    }
}

/// Operations consumed from the remote calendar service.
///
/// Errors are `CalctlError::Remote` carrying the service's message.
#[allow(async_fn_in_trait)]
pub trait CalendarService {
    async fn list_calendars(&self) -> CalctlResult<Vec<CalendarRef>>;

    async fn list_events(&self, calendar_id: &str, query: &EventQuery) -> CalctlResult<Vec<Event>>;

    async fn get_event(&self, calendar_id: &str, event_id: &str) -> CalctlResult<Event>;

    /// Returns the created event, including its remote-assigned id.
    async fn insert_event(&self, calendar_id: &str, event: &Event) -> CalctlResult<Event>;

    /// Submits the full state of `event` under `event.id`.
    async fn update_event(&self, calendar_id: &str, event: &Event) -> CalctlResult<Event>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> CalctlResult<()>;
}
