use std::io::Write;

use super::{EventContext, Outcome};
use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::remote::CalendarService;

pub async fn run<S, L, W>(
    ctx: &EventContext<'_, S>,
    console: &mut Console<L, W>,
) -> CalctlResult<Outcome>
where
    S: CalendarService,
    L: LineSource,
    W: Write,
{
    let id = console.prompt("Event ID")?;
    let event = ctx.service.get_event(ctx.calendar_id, &id).await?;

    writeln!(console, "\nEvent Details:")?;
    writeln!(console, "Title: {}", event.title)?;
    writeln!(console, "Description: {}", event.description)?;
    writeln!(console, "Start: {}", event.start.display())?;
    writeln!(console, "End: {}", event.end.display())?;
    writeln!(console, "Status: {}", event.status)?;

    if !event.attendees.is_empty() {
        writeln!(console, "Attendees:")?;
        for attendee in &event.attendees {
            writeln!(console, " - {} ({})", attendee.email, attendee.response_status)?;
        }
    }

    Ok(Outcome::Shown(event.id))
}
