use std::io::Write;

use tracing::info;

use super::{EventContext, Outcome};
use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::remote::CalendarService;

/// Delete an event after explicit confirmation. Declining is not an error.
pub async fn run<S, L, W>(
    ctx: &EventContext<'_, S>,
    console: &mut Console<L, W>,
) -> CalctlResult<Outcome>
where
    S: CalendarService,
    L: LineSource,
    W: Write,
{
    let id = console.prompt("Event ID to delete")?;

    if !console.confirm(&format!("Are you sure you want to delete event {id}?"))? {
        writeln!(console, "Deletion cancelled.")?;
        return Ok(Outcome::Cancelled);
    }

    ctx.service.delete_event(ctx.calendar_id, &id).await?;

    info!(calendar = ctx.calendar_id, event = %id, "deleted event");
    writeln!(console, "Event deleted successfully.")?;

    Ok(Outcome::Deleted(id))
}
