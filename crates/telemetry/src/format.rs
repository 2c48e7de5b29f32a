//! Human-readable line format for file sinks.
//!
//! ```text
//! [production] 4127  - 2026-10-16T12:30:45+00:00  ERROR [account_api::handlers] request{method="POST"}: Project create failed name="Alpha"
//! ```
//!
//! Spans the event sits in are rendered root-first, each as
//! `name{fields}: `, the same way the default console format does.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::FormattedFields;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::timestamp::ZonedTimer;

/// Renders `[<app>] <pid>  - <timestamp>  <LEVEL> [<target>] <spans>: <fields>`.
#[derive(Debug, Clone)]
pub struct NestLikeFormat {
    app_name: String,
    timer: Option<ZonedTimer>,
}

impl NestLikeFormat {
    pub fn new(app_name: impl Into<String>, timer: Option<ZonedTimer>) -> Self {
        Self {
            app_name: app_name.into(),
            timer,
        }
    }
}

impl<S, N> FormatEvent<S, N> for NestLikeFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        write!(writer, "[{}] {:<5} - ", self.app_name, std::process::id())?;
        if let Some(stamp) = self.timer.as_ref().and_then(ZonedTimer::stamp) {
            write!(writer, "{stamp}  ")?;
        }
        write!(writer, "{:>5} [{}] ", meta.level(), meta.target())?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;
                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
