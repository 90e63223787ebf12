use std::io::Write;

use chrono::Utc;

use super::{EventContext, Outcome};
use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::remote::{CalendarService, EventQuery};

pub async fn run<S, L, W>(
    ctx: &EventContext<'_, S>,
    console: &mut Console<L, W>,
) -> CalctlResult<Outcome>
where
    S: CalendarService,
    L: LineSource,
    W: Write,
{
    let query = EventQuery::upcoming(ctx.list_limit, Utc::now());
    let events = ctx.service.list_events(ctx.calendar_id, &query).await?;

    if events.is_empty() {
        writeln!(console, "No upcoming events found.")?;
        return Ok(Outcome::Listed(0));
    }

    writeln!(console, "\nUpcoming events:")?;
    for (i, event) in events.iter().enumerate() {
        writeln!(console, "{}) {} ({})", i + 1, event.title, event.id)?;
        writeln!(
            console,
            "   When: {} to {}",
            event.start.display(),
            event.end.display()
        )?;
    }
    writeln!(console)?;

    Ok(Outcome::Listed(events.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{Event, EventBound};
    use crate::testing::{FakeCalendar, ScriptedLines, output_of};
    use crate::time::{TimeConfig, WireInstant};
    use chrono::NaiveDate;

    fn time() -> TimeConfig {
        TimeConfig::new("%Y-%m-%d %H:%M", "Asia/Kolkata").unwrap()
    }

    #[tokio::test]
    async fn empty_calendar_prints_no_events() {
        let service = FakeCalendar::default();
        let time = time();
        let ctx = EventContext {
            service: &service,
            calendar_id: "primary",
            time: &time,
            list_limit: 10,
        };
        let mut console = Console::new(ScriptedLines::new(Vec::<String>::new()), Vec::new());

        let outcome = run(&ctx, &mut console).await.unwrap();

        assert_eq!(outcome, Outcome::Listed(0));
        assert_eq!(output_of(&console), "No upcoming events found.\n");
    }

    #[tokio::test]
    async fn query_asks_for_upcoming_single_events() {
        let service = FakeCalendar::default();
        let time = time();
        let ctx = EventContext {
            service: &service,
            calendar_id: "primary",
            time: &time,
            list_limit: 10,
        };
        let mut console = Console::new(ScriptedLines::new(Vec::<String>::new()), Vec::new());
        let before = Utc::now();

        run(&ctx, &mut console).await.unwrap();

        let queries = service.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].max_results, 10);
        assert!(queries[0].single_events);
        assert!(queries[0].order_by_start_time);
        assert!(queries[0].time_min >= before);
    }

    #[tokio::test]
    async fn all_day_events_show_their_dates() {
        let day = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2030, 6, 2).unwrap();
        let start = WireInstant::parse_wire("2030-06-03T09:30:00+05:30").unwrap();
        let end = WireInstant::parse_wire("2030-06-03T10:00:00+05:30").unwrap();
        let service = FakeCalendar::default()
            .with_event(Event {
                id: "allday1".into(),
                title: "Offsite".into(),
                start: EventBound::all_day(day),
                end: EventBound::all_day(next),
                ..Default::default()
            })
            .with_event(Event {
                id: "timed1".into(),
                title: "Standup".into(),
                start: EventBound::timed(start, "Asia/Kolkata"),
                end: EventBound::timed(end, "Asia/Kolkata"),
                ..Default::default()
            });
        let time = time();
        let ctx = EventContext {
            service: &service,
            calendar_id: "primary",
            time: &time,
            list_limit: 10,
        };
        let mut console = Console::new(ScriptedLines::new(Vec::<String>::new()), Vec::new());

        let outcome = run(&ctx, &mut console).await.unwrap();

        assert_eq!(outcome, Outcome::Listed(2));
        let output = output_of(&console);
        assert!(output.contains("1) Offsite (allday1)\n   When: 2030-06-01 to 2030-06-02\n"));
        assert!(output.contains(
            "2) Standup (timed1)\n   When: 2030-06-03T09:30:00+05:30 to 2030-06-03T10:00:00+05:30\n"
        ));
    }
}
