use std::io::Write;

use tracing::info;

use super::{EventContext, Outcome, ensure_ordered};
use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::remote::{CalendarService, Event, EventBound};

pub async fn run<S, L, W>(
    ctx: &EventContext<'_, S>,
    console: &mut Console<L, W>,
) -> CalctlResult<Outcome>
where
    S: CalendarService,
    L: LineSource,
    W: Write,
{
    let pattern = ctx.time.expected_pattern();
    let zone = ctx.time.zone_name();

    let title = console.prompt("Title")?;
    let description = console.prompt("Description")?;

    let start = ctx.time.parse(&console.prompt(&format!("Start ({pattern})"))?)?;
    let end = ctx.time.parse(&console.prompt(&format!("End   ({pattern})"))?)?;

    let event = Event {
        title,
        description,
        start: EventBound::timed(start, zone),
        end: EventBound::timed(end, zone),
        ..Default::default()
    };

    ensure_ordered(&event.start, &event.end, ctx.time)?;

    let created = ctx.service.insert_event(ctx.calendar_id, &event).await?;

    info!(calendar = ctx.calendar_id, event = %created.id, "created event");
    writeln!(console, "Event created successfully! ID: {}", created.id)?;

    Ok(Outcome::Created(created.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalctlError;
    use crate::testing::{FakeCalendar, ScriptedLines, output_of};
    use crate::time::TimeConfig;

    fn time() -> TimeConfig {
        TimeConfig::new("%Y-%m-%d %H:%M", "Asia/Kolkata").unwrap()
    }

    async fn create(service: &FakeCalendar, lines: &[&str]) -> (CalctlResult<Outcome>, String) {
        let time = time();
        let ctx = EventContext {
            service,
            calendar_id: "primary",
            time: &time,
            list_limit: 10,
        };
        let mut console = Console::new(ScriptedLines::new(lines.iter().copied()), Vec::new());
        let result = run(&ctx, &mut console).await;
        (result, output_of(&console))
    }

    #[tokio::test]
    async fn submits_event_in_configured_zone() {
        let service = FakeCalendar::default();

        let (result, output) = create(
            &service,
            &["Planning", "Quarterly planning", "2024-03-15 09:30", "2024-03-15 10:30"],
        )
        .await;

        assert_eq!(result.unwrap(), Outcome::Created("evt_1".into()));
        assert!(output.contains("Start (YYYY-MM-DD HH:MM): "));
        assert!(output.ends_with("Event created successfully! ID: evt_1\n"));

        let inserted = service.inserted();
        assert_eq!(inserted.len(), 1);
        let event = &inserted[0];
        assert_eq!(event.title, "Planning");
        assert_eq!(event.description, "Quarterly planning");
        assert_eq!(event.start.display(), "2024-03-15T09:30:00+05:30");
        assert_eq!(event.end.display(), "2024-03-15T10:30:00+05:30");
        assert_eq!(event.start.time_zone.as_deref(), Some("Asia/Kolkata"));
        assert_eq!(event.end.time_zone.as_deref(), Some("Asia/Kolkata"));
    }

    #[tokio::test]
    async fn end_before_start_is_rejected_without_submission() {
        let service = FakeCalendar::default();

        let (result, _) = create(
            &service,
            &["Backwards", "", "2024-03-15 10:30", "2024-03-15 09:30"],
        )
        .await;

        assert!(matches!(result, Err(CalctlError::Validation(_))));
        assert_eq!(service.submissions(), 0);
    }

    #[tokio::test]
    async fn zero_length_event_is_allowed() {
        let service = FakeCalendar::default();

        let (result, _) = create(
            &service,
            &["Reminder", "", "2024-03-15 10:30", "2024-03-15 10:30"],
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(service.inserted().len(), 1);
    }

    #[tokio::test]
    async fn bad_start_fails_before_end_is_asked() {
        let service = FakeCalendar::default();

        let (result, output) = create(&service, &["Title", "", "next tuesday"]).await;

        assert!(matches!(result, Err(CalctlError::InvalidFormat { .. })));
        assert!(!output.contains("End"));
        assert_eq!(service.submissions(), 0);
    }
}
