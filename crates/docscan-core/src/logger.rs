//! Stderr logger for scan sessions and trace replays.
//!
//! Lines look like `[  1.234s DEBUG capture::engine] message`: the time since
//! installation, the level and the emitting docscan component (crate prefix
//! dropped). The level filter applies to docscan components; records from
//! other crates are only shown at `info` and above so per-frame debugging is
//! not buried under dependency chatter.

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

/// `docscan_capture::engine` -> `capture::engine`; `None` for other crates.
fn component(target: &str) -> Option<&str> {
    let rest = target.strip_prefix("docscan")?;
    if rest.is_empty() {
        return Some(target);
    }
    rest.strip_prefix('_').or_else(|| rest.strip_prefix("::"))
}

fn render(elapsed: f64, level: Level, target: &str, args: &fmt::Arguments) -> String {
    let origin = component(target).unwrap_or(target);
    format!("[{elapsed:7.3}s {level:>5} {origin}] {args}")
}

struct ScanLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for ScanLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        component(metadata.target()).is_some() || metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = render(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<ScanLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| ScanLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// `json` switches to flattened JSON events, one per line.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = tracing_fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = tracing_fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(tracing_fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}
