//! One prompt-driven session: pick a calendar, pick an operation, run it.

use std::io::Write;

use crate::console::{Console, LineSource};
use crate::error::CalctlResult;
use crate::operations::{EventContext, Operation, Outcome};
use crate::remote::CalendarService;
use crate::selector::select_calendar;
use crate::time::TimeConfig;

pub struct Session<'a, S> {
    pub service: &'a S,
    pub time: &'a TimeConfig,
    pub list_limit: u32,
}

impl<S: CalendarService> Session<'_, S> {
    pub async fn run<L: LineSource, W: Write>(
        &self,
        console: &mut Console<L, W>,
    ) -> CalctlResult<Outcome> {
        let calendar_id = self.select_calendar(console).await?;
        self.run_operation(&calendar_id, console).await
    }

    pub async fn select_calendar<L: LineSource, W: Write>(
        &self,
        console: &mut Console<L, W>,
    ) -> CalctlResult<String> {
        select_calendar(self.service, console).await
    }

    /// Show the menu, read the choice and run that operation on `calendar_id`.
    pub async fn run_operation<L: LineSource, W: Write>(
        &self,
        calendar_id: &str,
        console: &mut Console<L, W>,
    ) -> CalctlResult<Outcome> {
        let operation = choose_operation(console)?;

        let ctx = EventContext {
            service: self.service,
            calendar_id,
            time: self.time,
            list_limit: self.list_limit,
        };

        ctx.run(operation, console).await
    }
}

fn choose_operation<L: LineSource, W: Write>(
    console: &mut Console<L, W>,
) -> CalctlResult<Operation> {
    writeln!(console, "\nChoose an operation:")?;
    for op in Operation::ALL {
        writeln!(console, "{}. {}", op.number(), op)?;
    }
    writeln!(console)?;

    console.prompt("Enter choice (1-5)")?.parse()
}
