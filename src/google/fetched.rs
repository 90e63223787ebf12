//! Remote events kept between a get and the update that follows it.

use std::collections::HashMap;
use std::sync::Mutex;

use google_calendar::types::Event as GoogleEvent;

#[derive(Default)]
pub struct FetchedEvents(Mutex<HashMap<(String, String), GoogleEvent>>);

impl FetchedEvents {
    pub fn remember(&self, calendar_id: &str, event: GoogleEvent) {
        self.lock()
            .insert((calendar_id.to_string(), event.id.clone()), event);
    }

    /// Hands out the event at most once; a second update fetches again.
    pub fn take(&self, calendar_id: &str, event_id: &str) -> Option<GoogleEvent> {
        self.lock()
            .remove(&(calendar_id.to_string(), event_id.to_string()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), GoogleEvent>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
