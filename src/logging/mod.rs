//! Console and log file output.
//!
//! Commands log through [`Logger`]; library code emits `tracing` events
//! directly. Both end up in the subscriber installed by [`init_subscriber`].

mod logger;
mod subscriber;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;

/// A [`Logger`] whose events go to `test.log` in a fresh temp dir through a
/// thread-local subscriber. Keep the guard alive for the whole test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.log");
    let layer = subscriber::FileLayer::open(&path)
        .expect("open test log")
        .with_filter(LevelFilter::DEBUG);
    let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(layer));
    let guard = tracing::dispatcher::set_default(&dispatch);
    (Logger::with_log_file(path), dir, guard)
}
