use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level};

/// Wraps a future in a span named after the operation and its subject
/// (a command or a task id). A no-op without the `tracing` feature.
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(
        self,
        op: &'static str,
        subject: &str,
    ) -> impl Future<Output = Self::Output> {
        let span = tracing::span!(Level::DEBUG, "tcrm_runner", op, subject);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _op: &'static str, _subject: &str) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}

#[cfg(all(test, feature = "tracing"))]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(all(test, not(feature = "tracing")))]
pub(crate) fn init_test_logging() {}
