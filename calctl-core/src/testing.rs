//! Scripted stand-ins for the operator, the token endpoint and the calendar service.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::auth::{OAuthClient, TokenResponse};
use crate::console::{Console, LineSource};
use crate::error::{CalctlError, CalctlResult};
use crate::remote::{CalendarRef, CalendarService, Event, EventQuery};

pub struct ScriptedLines(VecDeque<String>);

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedLines(lines.into_iter().map(Into::into).collect())
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self) -> CalctlResult<Option<String>> {
        Ok(self.0.pop_front())
    }
}

pub fn output_of<L: LineSource>(console: &Console<L, Vec<u8>>) -> String {
    String::from_utf8_lossy(console.output()).into_owned()
}

#[derive(Default)]
struct OAuthState {
    issue: Option<TokenResponse>,
    failure: Option<String>,
    exchanged: Vec<String>,
    refreshes: usize,
}

#[derive(Clone, Default)]
pub struct FakeOAuth(Arc<Mutex<OAuthState>>);

impl FakeOAuth {
    /// Every exchange and refresh returns these tokens.
    pub fn issuing(access_token: &str, refresh_token: &str) -> Self {
        let fake = FakeOAuth::default();
        fake.0.lock().unwrap().issue = Some(TokenResponse {
            access_token: access_token.into(),
            token_type: Some("Bearer".into()),
            refresh_token: Some(refresh_token.into()),
            expires_in: Some(3599),
        });
        fake
    }

    /// Refreshes return a new access token but no refresh token, like Google does.
    pub fn refreshing(access_token: &str) -> Self {
        let fake = FakeOAuth::default();
        fake.0.lock().unwrap().issue = Some(TokenResponse {
            access_token: access_token.into(),
            expires_in: Some(3599),
            ..Default::default()
        });
        fake
    }

    pub fn failing(message: &str) -> Self {
        let fake = FakeOAuth::default();
        fake.0.lock().unwrap().failure = Some(message.into());
        fake
    }

    pub fn exchanged_codes(&self) -> Vec<String> {
        self.0.lock().unwrap().exchanged.clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.0.lock().unwrap().refreshes
    }

    fn respond(&self) -> CalctlResult<TokenResponse> {
        let state = self.0.lock().unwrap();
        if let Some(message) = &state.failure {
            return Err(CalctlError::Auth(message.clone()));
        }
        state
            .issue
            .clone()
            .ok_or_else(|| CalctlError::Auth("no token scripted".into()))
    }
}

impl OAuthClient for FakeOAuth {
    async fn exchange_code(&self, code: &str) -> CalctlResult<TokenResponse> {
        self.0.lock().unwrap().exchanged.push(code.to_string());
        self.respond()
    }

    async fn refresh(&self, _refresh_token: &str) -> CalctlResult<TokenResponse> {
        self.0.lock().unwrap().refreshes += 1;
        self.respond()
    }
}

#[derive(Default)]
struct CalendarState {
    calendars: Vec<CalendarRef>,
    events: Vec<Event>,
    queries: Vec<EventQuery>,
    inserted: Vec<Event>,
    updated: Vec<Event>,
    deleted: Vec<String>,
}

/// In-memory calendar service that records every call.
#[derive(Clone, Default)]
pub struct FakeCalendar(Arc<Mutex<CalendarState>>);

impl FakeCalendar {
    pub fn with_calendars(labels: &[(&str, &str)]) -> Self {
        let fake = FakeCalendar::default();
        fake.0.lock().unwrap().calendars = labels
            .iter()
            .map(|(id, label)| CalendarRef {
                id: id.to_string(),
                label: label.to_string(),
            })
            .collect();
        fake
    }

    pub fn with_event(self, event: Event) -> Self {
        self.0.lock().unwrap().events.push(event);
        self
    }

    pub fn queries(&self) -> Vec<EventQuery> {
        self.0.lock().unwrap().queries.clone()
    }

    pub fn inserted(&self) -> Vec<Event> {
        self.0.lock().unwrap().inserted.clone()
    }

    pub fn updated(&self) -> Vec<Event> {
        self.0.lock().unwrap().updated.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.0.lock().unwrap().deleted.clone()
    }

    /// Number of calls that would change remote state.
    pub fn submissions(&self) -> usize {
        let state = self.0.lock().unwrap();
        state.inserted.len() + state.updated.len() + state.deleted.len()
    }
}

impl CalendarService for FakeCalendar {
    async fn list_calendars(&self) -> CalctlResult<Vec<CalendarRef>> {
        Ok(self.0.lock().unwrap().calendars.clone())
    }

    async fn list_events(
        &self,
        _calendar_id: &str,
        query: &EventQuery,
    ) -> CalctlResult<Vec<Event>> {
        let mut state = self.0.lock().unwrap();
        state.queries.push(query.clone());
        Ok(state
            .events
            .iter()
            .take(query.max_results as usize)
            .cloned()
            .collect())
    }

    async fn get_event(&self, _calendar_id: &str, event_id: &str) -> CalctlResult<Event> {
        self.0
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| CalctlError::Remote("googleapi: Error 404: Not Found, notFound".into()))
    }

    async fn insert_event(&self, _calendar_id: &str, event: &Event) -> CalctlResult<Event> {
        let mut state = self.0.lock().unwrap();
        let created = Event {
            id: format!("evt_{}", state.inserted.len() + 1),
            ..event.clone()
        };
        state.inserted.push(event.clone());
        state.events.push(created.clone());
        Ok(created)
    }

    async fn update_event(&self, _calendar_id: &str, event: &Event) -> CalctlResult<Event> {
        let mut state = self.0.lock().unwrap();
        state.updated.push(event.clone());
        Ok(event.clone())
    }

    async fn delete_event(&self, _calendar_id: &str, event_id: &str) -> CalctlResult<()> {
        self.0.lock().unwrap().deleted.push(event_id.to_string());
        Ok(())
    }
}
