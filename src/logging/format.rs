use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp layout of every diagnostic line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format one diagnostic line: `[<timestamp>] <SEVERITY>  <message>\n`
#[must_use]
pub fn format_line<Tz>(timestamp: &DateTime<Tz>, level: Level, message: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("{}{message}\n", prefix(timestamp, level))
}

fn prefix<Tz>(timestamp: &DateTime<Tz>, level: Level) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!("[{}] {level}  ", timestamp.format(TIMESTAMP_FORMAT))
}

/// Event formatter producing diagnostic lines in local time.
///
/// Span context and targets are not printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticFormat;

impl<S, N> FormatEvent<S, N> for DiagnosticFormat
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
        let level = *event.metadata().level();
        write!(writer, "{}", prefix(&Local::now(), level))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
