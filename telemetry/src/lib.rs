//! Standardized telemetry for verstamp binaries.
//!
//! Start with [`TelemetryConfig::new()`]. Logs always go to stderr so that stdout
//! stays reserved for command output.

use std::io::Write as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// The toplevel config for the verstamp-telemetry crate. Start here.
#[derive(Debug)]
pub struct TelemetryConfig {
    global_filter: EnvFilter,
}

impl TelemetryConfig {
    /// Logs at `INFO` unless `RUST_LOG` says otherwise.
    #[expect(clippy::new_without_default, reason = "may add required args later")]
    #[must_use]
    pub fn new() -> Self {
        Self {
            global_filter: filter_with_default(LevelFilter::INFO),
        }
    }

    /// Raises the default level by one step per `-v`. `RUST_LOG` still wins.
    #[must_use]
    pub fn with_verbosity(self, verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            global_filter: filter_with_default(level),
        }
    }

    pub fn try_init(
        self,
    ) -> Result<TelemetryFlusher, tracing_subscriber::util::TryInitError> {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(self.global_filter)
            .try_init()?;

        Ok(TelemetryFlusher { _priv: () })
    }

    /// Initializes the telemetry config. Call this only once, at the beginning of the
    /// program.
    ///
    /// Calling this more than once or when another tracing subscriber is registered
    /// will cause a panic.
    pub fn init(self) -> TelemetryFlusher {
        self.try_init().expect("failed to initialize verstamp-telemetry")
    }
}

fn filter_with_default(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Allows flushing all telemetry logs.
#[must_use = "call .flush_blocking at the end of the program, otherwise logs may get lost"]
pub struct TelemetryFlusher {
    _priv: (),
}

impl TelemetryFlusher {
    /// Call this at the end of the program.
    pub fn flush_blocking(self) {
        std::io::stderr().flush().ok();
        std::io::stdout().flush().ok();
    }
}
