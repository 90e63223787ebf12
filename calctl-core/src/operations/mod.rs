//! The five event operations offered by the menu.
//!
//! Each operation prompts one field at a time and stops at the first invalid
//! field, before anything is submitted to the remote service.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::console::{Console, LineSource};
use crate::error::{CalctlError, CalctlResult};
use crate::remote::{CalendarService, EventBound};
use crate::time::TimeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Create,
        Operation::Get,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn number(self) -> usize {
        match self {
            Operation::List => 1,
            Operation::Create => 2,
            Operation::Get => 3,
            Operation::Update => 4,
            Operation::Delete => 5,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Operation::List => "List upcoming events",
            Operation::Create => "Create new event",
            Operation::Get => "Get event details",
            Operation::Update => "Update event",
            Operation::Delete => "Delete event",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Operation {
    type Err = CalctlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.number().to_string() == s)
            .ok_or_else(|| CalctlError::InvalidOperation(s.to_string()))
    }
}

/// What an operation did, for the caller to log or report.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Listed(usize),
    Created(String),
    Shown(String),
    Updated(String),
    Deleted(String),
    Cancelled,
}

/// Everything an operation needs besides the console.
pub struct EventContext<'a, S> {
    pub service: &'a S,
    pub calendar_id: &'a str,
    pub time: &'a TimeConfig,
    pub list_limit: u32,
}

impl<S: CalendarService> EventContext<'_, S> {
    pub async fn run<L: LineSource, W: Write>(
        &self,
        operation: Operation,
        console: &mut Console<L, W>,
    ) -> CalctlResult<Outcome> {
        match operation {
            Operation::List => list::run(self, console).await,
            Operation::Create => create::run(self, console).await,
            Operation::Get => get::run(self, console).await,
            Operation::Update => update::run(self, console).await,
            Operation::Delete => delete::run(self, console).await,
        }
    }
}

/// Start must not be after end.
fn ensure_ordered(start: &EventBound, end: &EventBound, time: &TimeConfig) -> CalctlResult<()> {
    match (start.instant(time.zone()), end.instant(time.zone())) {
        (Some(start), Some(end)) if end < start => Err(CalctlError::Validation(
            "end time cannot be before start time".into(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_operations() {
        assert_eq!("1".parse::<Operation>().unwrap(), Operation::List);
        assert_eq!("2".parse::<Operation>().unwrap(), Operation::Create);
        assert_eq!("3".parse::<Operation>().unwrap(), Operation::Get);
        assert_eq!("4".parse::<Operation>().unwrap(), Operation::Update);
        assert_eq!("5".parse::<Operation>().unwrap(), Operation::Delete);
    }

    #[test]
    fn anything_else_is_an_invalid_operation() {
        for input in ["0", "6", "", "list", "01", " 1"] {
            assert!(
                matches!(input.parse::<Operation>(), Err(CalctlError::InvalidOperation(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn equal_bounds_are_ordered() {
        let time = TimeConfig::new("%Y-%m-%d %H:%M", "Asia/Kolkata").unwrap();
        let at = time.parse("2024-03-15 09:30").unwrap();
        let bound = EventBound::timed(at, time.zone_name());

        assert!(ensure_ordered(&bound, &bound, &time).is_ok());
    }
}
