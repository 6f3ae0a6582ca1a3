//! Tracing subscriber: a console formatter on stderr plus a per-command log
//! file.
use std::fs;
use std::io::{IsTerminal as _, Write as _};
use std::path::Path;
use std::sync::Mutex;

use tracing::{Event, Level};

use crate::cli::VERSION;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};

/// Target used by [`Logger::stage`](super::Logger::stage).
pub(super) const STAGE_TARGET: &str = "hostsmgr::stage";

/// How an event is presented, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Error,
    Warn,
    Stage,
    Info,
    Debug,
}

impl Label {
    fn of(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        match *metadata.level() {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO if metadata.target() == STAGE_TARGET => Self::Stage,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Console prefix and its colour.
    const fn console(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Error => Some(("error:", "\x1b[31m")),
            Self::Warn => Some(("warning:", "\x1b[33m")),
            Self::Stage => Some(("==>", "\x1b[1;34m")),
            Self::Info => None,
            Self::Debug => Some(("debug:", "\x1b[2m")),
        }
    }

    /// Prefix in the log file.
    const fn file(self) -> &'static str {
        match self {
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Stage => "==> ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
        }
    }
}

/// Message plus any structured fields, rendered as `msg (k=v k=v)`.
#[derive(Default)]
struct EventFields {
    message: String,
    fields: Vec<String>,
}

impl EventFields {
    fn of(event: &Event<'_>) -> String {
        let mut visitor = Self::default();
        event.record(&mut visitor);
        if visitor.fields.is_empty() {
            visitor.message
        } else {
            format!("{} ({})", visitor.message, visitor.fields.join(" "))
        }
    }

    fn push(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

impl tracing::field::Visit for EventFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field, value.to_string());
    }
}

/// A [`tracing_subscriber::Layer`] appending every event to a log file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command`. `None` if it cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::open(&log_file_path(command)?)
    }

    /// Truncate `path`, write a run header, and append events after it.
    pub(super) fn open(path: &Path) -> Option<Self> {
        let mut file = fs::File::create(path).ok()?;
        writeln!(file, "# hostsmgr {VERSION} started {} UTC", format_utc_datetime()).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let line = format!(
            "[{}] {}{}",
            format_utc_time(),
            Label::of(event).file(),
            EventFields::of(event)
        );
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// One plain line per event; the label is coloured when stderr is a
/// terminal.
struct ConsoleFormatter {
    color: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let msg = EventFields::of(event);
        match Label::of(event).console() {
            None => writeln!(writer, "{msg}"),
            Some((label, color)) if self.color => writeln!(writer, "{color}{label}\x1b[0m {msg}"),
            Some((label, _)) => writeln!(writer, "{label} {msg}"),
        }
    }
}

/// Install the global subscriber. Call once, before any logging.
///
/// The console shows warnings and errors on stderr, or everything from
/// `DEBUG` up when `verbose` is set. The log file for `command` always
/// receives `DEBUG` and above.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter {
            color: std::io::stderr().is_terminal(),
        })
        .with_writer(std::io::stderr)
        .with_filter(console_level);
    let file_layer = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
