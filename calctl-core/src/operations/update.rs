use std::io::Write;

use tracing::info;

use super::{EventContext, Outcome, ensure_ordered};
use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::remote::{CalendarService, EventBound};

/// Edit an existing event. Blank input keeps the current value of a field.
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
    let mut event = ctx.service.get_event(ctx.calendar_id, &id).await?;

    writeln!(console, "Current title: {}", event.title)?;
    let title = console.prompt("New title (leave empty to keep current)")?;
    if !title.is_empty() {
        event.title = title;
    }

    writeln!(console, "Current description: {}", event.description)?;
    let description = console.prompt("New description (leave empty to keep current)")?;
    if !description.is_empty() {
        event.description = description;
    }

    if console.confirm("Update time?")? {
        let pattern = ctx.time.expected_pattern();
        let zone = ctx.time.zone_name();

        let input = console.prompt(&format!(
            "Start ({pattern}, current: {})",
            event.start.display()
        ))?;
        if !input.is_empty() {
            event.start = EventBound::timed(ctx.time.parse(&input)?, zone);
        }

        let input = console.prompt(&format!(
            "End ({pattern}, current: {})",
            event.end.display()
        ))?;
        if !input.is_empty() {
            event.end = EventBound::timed(ctx.time.parse(&input)?, zone);
        }

        ensure_ordered(&event.start, &event.end, ctx.time)?;
    }

    let updated = ctx.service.update_event(ctx.calendar_id, &event).await?;

    info!(calendar = ctx.calendar_id, event = %updated.id, "updated event");
    writeln!(console, "Event updated successfully! ID: {}", updated.id)?;

    Ok(Outcome::Updated(updated.id))
}
