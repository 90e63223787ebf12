//! Choosing the calendar to operate on.

use std::io::Write;

use crate::console::{Console, LineSource};
use crate::error::{CalctlError, CalctlResult};
use crate::remote::{CalendarRef, CalendarService};

/// What the operator typed at the calendar prompt.
///
/// Anything that reads as an integer (digits with an optional sign) is a
/// position, even if out of range; everything else is a calendar id verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Position(String),
    Id(String),
}

impl Selection {
    pub fn parse(input: &str) -> Self {
        let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Selection::Position(input.to_string())
        } else {
            Selection::Id(input.to_string())
        }
    }

    pub fn resolve(self, calendars: &[CalendarRef]) -> CalctlResult<String> {
        match self {
            Selection::Position(text) => text
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=calendars.len()).contains(n))
                .map(|n| calendars[n - 1].id.clone())
                .ok_or(CalctlError::InvalidSelection {
                    selection: text,
                    count: calendars.len(),
                }),
            Selection::Id(id) => Ok(id),
        }
    }
}

/// List the identity's calendars and ask which one to use.
pub async fn select_calendar<S, L, W>(
    service: &S,
    console: &mut Console<L, W>,
) -> CalctlResult<String>
where
    S: CalendarService,
    L: LineSource,
    W: Write,
{
    let calendars = service.list_calendars().await?;

    if calendars.is_empty() {
        return Err(CalctlError::NoCalendars);
    }

    writeln!(console, "\nAvailable calendars:")?;
    for (i, calendar) in calendars.iter().enumerate() {
        writeln!(console, "{}) {} → {}", i + 1, calendar.label, calendar.id)?;
    }
    writeln!(console)?;

    let input = console.prompt("Enter calendar number or ID")?;
    Selection::parse(&input).resolve(&calendars)
}
