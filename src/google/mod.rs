//! Google Calendar implementations of the core service traits.

mod convert;
mod fetched;
mod oauth;

pub use oauth::GoogleOAuth;

use calctl_core::app_config::AppConfig;
use calctl_core::auth::TokenSource;
use calctl_core::remote::{CalendarRef, CalendarService, Event, EventQuery};
use calctl_core::{CalctlError, CalctlResult};
use chrono::SecondsFormat;
use chrono_tz::Tz;
use google_calendar::Client;
use google_calendar::types::{MinAccessRole, OrderBy, SendUpdates};
use tracing::debug;

use convert::{FromGoogle, apply_to_google, to_google};
use fetched::FetchedEvents;

pub struct GoogleCalendar {
    app: AppConfig,
    tokens: TokenSource<GoogleOAuth>,
    zone: Tz,
    fetched: FetchedEvents,
}

impl GoogleCalendar {
    /// `zone` is used to display remote times that carry no zone of their own.
    pub fn new(app: AppConfig, tokens: TokenSource<GoogleOAuth>, zone: Tz) -> Self {
        GoogleCalendar {
            app,
            tokens,
            zone,
            fetched: FetchedEvents::default(),
        }
    }

    /// A client carrying a currently valid access token.
    async fn client(&self) -> CalctlResult<Client> {
        let access_token = self.tokens.access_token().await?;
        let credential = self.tokens.credential();

        Ok(Client::new(
            self.app.client_id.clone(),
            self.app.client_secret.clone(),
            self.app.redirect_uri().to_string(),
            access_token,
            credential.refresh_token,
        ))
    }

    async fn fetch(
        &self,
        client: &Client,
        calendar_id: &str,
        event_id: &str,
    ) -> CalctlResult<google_calendar::types::Event> {
        client
            .events()
            .get(
                calendar_id,
                event_id,
                0,  // max_attendees
                "", // time_zone
            )
            .await
            .map(|response| response.body)
            .map_err(|e| remote("unable to retrieve event", e))
    }
}

fn remote(what: &str, err: impl std::fmt::Display) -> CalctlError {
    CalctlError::Remote(format!("{what}: {err}"))
}

impl CalendarService for GoogleCalendar {
    async fn list_calendars(&self) -> CalctlResult<Vec<CalendarRef>> {
        let client = self.client().await?;

        let response = client
            .calendar_list()
            .list_all(MinAccessRole::default(), false, false)
            .await
            .map_err(|e| remote("unable to retrieve calendars", e))?;

        Ok(response
            .body
            .into_iter()
            .filter(|c| !c.id.is_empty())
            .map(|c| CalendarRef {
                label: if c.summary.is_empty() {
                    "(unnamed)".to_string()
                } else {
                    c.summary
                },
                id: c.id,
            })
            .collect())
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> CalctlResult<Vec<Event>> {
        let client = self.client().await?;
        let time_min = query.time_min.to_rfc3339_opts(SecondsFormat::Secs, true);
        let order_by = if query.order_by_start_time {
            OrderBy::StartTime
        } else {
            OrderBy::default()
        };

        debug!(calendar_id, %time_min, max = query.max_results, "listing events");

        let response = client
            .events()
            .list(
                calendar_id,
                "",                        // i_cal_uid
                0,                         // max_attendees
                i64::from(query.max_results),
                order_by,
                "",                        // page_token
                &[],                       // private_extended_property
                "",                        // q (search query)
                &[],                       // shared_extended_property
                false,                     // show_deleted
                false,                     // show_hidden_invitations
                query.single_events,
                "",                        // time_max
                &time_min,
                "",                        // time_zone
                "",                        // updated_min
            )
            .await
            .map_err(|e| remote("unable to retrieve events", e))?;

        Ok(response
            .body
            .into_iter()
            .map(|event| Event::from_google(event, self.zone))
            .collect())
    }

    async fn get_event(&self, calendar_id: &str, event_id: &str) -> CalctlResult<Event> {
        let client = self.client().await?;
        let event = self.fetch(&client, calendar_id, event_id).await?;
        let core = Event::from_google(event.clone(), self.zone);
        self.fetched.remember(calendar_id, event);
        Ok(core)
    }

    async fn insert_event(&self, calendar_id: &str, event: &Event) -> CalctlResult<Event> {
        let client = self.client().await?;

        let response = client
            .events()
            .insert(
                calendar_id,
                0,                 // conference_data_version
                0,                 // max_attendees
                false,             // send_notifications (deprecated)
                SendUpdates::None, // send_updates
                false,             // supports_attachments
                &to_google(event),
            )
            .await
            .map_err(|e| remote("unable to create event", e))?;

        Ok(Event::from_google(response.body, self.zone))
    }

    /// Writes the edited fields onto the remote event as last fetched, so fields
    /// calctl doesn't model (location, reminders, conference data) survive.
    async fn update_event(&self, calendar_id: &str, event: &Event) -> CalctlResult<Event> {
        let client = self.client().await?;
        let mut google_event = match self.fetched.take(calendar_id, &event.id) {
            Some(google_event) => google_event,
            None => self.fetch(&client, calendar_id, &event.id).await?,
        };
        apply_to_google(event, &mut google_event);

        let response = client
            .events()
            .update(
                calendar_id,
                &event.id,
                0,                 // conference_data_version
                0,                 // max_attendees
                false,             // send_notifications (deprecated)
                SendUpdates::None, // send_updates
                false,             // supports_attachments
                &google_event,
            )
            .await
            .map_err(|e| remote("unable to update event", e))?;

        Ok(Event::from_google(response.body, self.zone))
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> CalctlResult<()> {
        let client = self.client().await?;

        client
            .events()
            .delete(calendar_id, event_id, false, SendUpdates::None)
            .await
            .map_err(|e| remote("unable to delete event", e))?;

        Ok(())
    }
}
