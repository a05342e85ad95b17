//! Log output of the landing backend.
//!
//! Everything in the workspace logs through the macros of the [`tracing`]
//! crate. This crate provides the sink: every event is written as a single
//! `[timestamp] [LEVEL] message` line followed by its fields as a JSON
//! object, with warnings and errors going to stderr and everything else to
//! stdout.

use landing_shared_impl::time::TimeServiceImpl;
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

pub use format::LogFormat;
pub use request::{log_api_request, ApiRequest};

mod format;
mod request;

/// Installs the global tracing subscriber.
///
/// Debug events are only emitted in `development` mode, unless `RUST_LOG`
/// says otherwise.
pub fn init(development: bool) {
    let default_level = if development {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(LogFormat::new(TimeServiceImpl))
        .with_writer(stream_writer(std::io::stdout, std::io::stderr));

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

/// Routes warnings and errors to `stderr` and all other events to `stdout`.
pub fn stream_writer<Out, Err>(stdout: Out, stderr: Err) -> impl for<'w> MakeWriter<'w> + 'static
where
    Out: for<'w> MakeWriter<'w> + 'static,
    Err: for<'w> MakeWriter<'w> + 'static,
{
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    stderr.with_max_level(Level::WARN).or_else(stdout)
}

/// Logs `message` at error level together with the details of `err`.
///
/// The error is attached as `error.message` (the outermost message),
/// `error.chain` (all messages of the source chain) and `error.stack` (the
/// debug representation, which includes a backtrace if one was captured).
/// There is no `error.name`: the concrete type of an [`anyhow::Error`] is
/// erased, and its outermost message already identifies the failure.
pub fn log_error(message: &str, err: &anyhow::Error) {
    let chain = format!("{err:#}");
    tracing::error!(
        error.message = %err,
        error.chain = %chain,
        error.stack = ?err,
        "{message}"
    );
}

/// Helpers for asserting on log output in tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use chrono::{DateTime, TimeZone, Utc};
    use landing_shared_contracts::time::TimeService;
    use tracing::Subscriber;

    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct FixedTime;

    impl TimeService for FixedTime {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 7, 13, 9, 41, 7).unwrap()
        }
    }

    pub const TIMESTAMP: &str = "2024-07-13T09:41:07.000Z";

    /// Returns a subscriber writing to the returned `(stdout, stderr)` buffers.
    pub fn subscriber(level: Level) -> (impl Subscriber + Send + Sync, Buffer, Buffer) {
        let stdout = Buffer::default();
        let stderr = Buffer::default();

        let subscriber = tracing_subscriber::fmt()
            .event_format(LogFormat::new(FixedTime))
            .with_writer(stream_writer(
                {
                    let stdout = stdout.clone();
                    move || stdout.clone()
                },
                {
                    let stderr = stderr.clone();
                    move || stderr.clone()
                },
            ))
            .with_max_level(level)
            .finish();

        (subscriber, stdout, stderr)
    }

    /// Splits a log entry into its first line and the parsed JSON fields.
    pub fn split_entry(entry: &str) -> (&str, Option<serde_json::Value>) {
        match entry.trim_end().split_once('\n') {
            Some((line, fields)) => (line, Some(serde_json::from_str(fields).unwrap())),
            None => (entry.trim_end(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing::{debug, error, info, warn};

    use super::{testing::*, *};

    #[test]
    fn route_by_level() {
        // Arrange
        let (subscriber, stdout, stderr) = subscriber(Level::DEBUG);

        // Act
        tracing::subscriber::with_default(subscriber, || {
            info!("info");
            debug!("debug");
            warn!("warn");
            error!("error");
        });

        // Assert
        assert_eq!(
            stdout.contents(),
            format!("[{TIMESTAMP}] [INFO] info\n[{TIMESTAMP}] [DEBUG] debug\n")
        );
        assert_eq!(
            stderr.contents(),
            format!("[{TIMESTAMP}] [WARN] warn\n[{TIMESTAMP}] [ERROR] error\n")
        );
    }

    #[test]
    fn debug_disabled() {
        // Arrange
        let (subscriber, stdout, stderr) = subscriber(Level::INFO);

        // Act
        tracing::subscriber::with_default(subscriber, || {
            debug!(key = 1, "debug");
        });

        // Assert
        assert_eq!(stdout.contents(), "");
        assert_eq!(stderr.contents(), "");
    }

    #[test]
    fn log_error_details() {
        // Arrange
        let (subscriber, stdout, stderr) = subscriber(Level::INFO);
        let err = anyhow!("connection refused").context("Failed to parse form");

        // Act
        tracing::subscriber::with_default(subscriber, || {
            log_error("Error processing contact form", &err);
        });

        // Assert
        assert_eq!(stdout.contents(), "");
        let output = stderr.contents();
        let (line, fields) = split_entry(&output);
        assert_eq!(
            line,
            format!("[{TIMESTAMP}] [ERROR] Error processing contact form")
        );
        let fields = fields.unwrap();
        let keys = fields["error"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["chain", "message", "stack"]);
        assert_eq!(fields["error"]["message"], json!("Failed to parse form"));
        assert_eq!(
            fields["error"]["chain"],
            json!("Failed to parse form: connection refused")
        );
        assert!(fields["error"]["stack"]
            .as_str()
            .unwrap()
            .contains("Caused by:"));
    }
}
