//! Conversion between Google's event type and the core event.

use calctl_core::remote::{Attendee, Event, EventBound};
use calctl_core::time::WireInstant;
use chrono_tz::Tz;
use google_calendar::types::EventDateTime;

pub trait FromGoogle {
    fn from_google(event: google_calendar::types::Event, zone: Tz) -> Self;
}

impl FromGoogle for Event {
    fn from_google(event: google_calendar::types::Event, zone: Tz) -> Self {
        Event {
            id: event.id,
            title: event.summary,
            description: event.description,
            start: event
                .start
                .as_ref()
                .map(|bound| bound_from_google(bound, zone))
                .unwrap_or_default(),
            end: event
                .end
                .as_ref()
                .map(|bound| bound_from_google(bound, zone))
                .unwrap_or_default(),
            status: event.status,
            attendees: event
                .attendees
                .into_iter()
                .map(|a| Attendee {
                    email: a.email,
                    response_status: a.response_status,
                })
                .collect(),
        }
    }
}

/// Google hands back instants in UTC; show them in the event's own zone when it
/// names one, otherwise in the configured zone.
fn bound_from_google(bound: &EventDateTime, fallback: Tz) -> EventBound {
    let zone = bound.time_zone.parse::<Tz>().unwrap_or(fallback);

    EventBound {
        date_time: bound.date_time.map(|dt| WireInstant::from_utc(dt, zone)),
        date: bound.date,
        time_zone: (!bound.time_zone.is_empty()).then(|| bound.time_zone.clone()),
    }
}

fn bound_to_google(bound: &EventBound) -> EventDateTime {
    EventDateTime {
        date: bound.date,
        date_time: bound.date_time.map(|dt| dt.to_utc()),
        time_zone: bound.time_zone.clone().unwrap_or_default(),
    }
}

/// A new remote event. The id is left empty for Google to assign.
pub fn to_google(event: &Event) -> google_calendar::types::Event {
    let mut google_event = google_calendar::types::Event::default();
    apply_to_google(event, &mut google_event);
    google_event.id = String::new();
    google_event
}

/// Copy the fields calctl edits onto a remote event.
pub fn apply_to_google(event: &Event, google_event: &mut google_calendar::types::Event) {
    google_event.summary = event.title.clone();
    google_event.description = event.description.clone();
    google_event.start = Some(bound_to_google(&event.start));
    google_event.end = Some(bound_to_google(&event.end));
}
