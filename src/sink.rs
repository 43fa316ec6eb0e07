use crate::error::SinkError;
use crate::record::Item;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::Write;
use tracing::error;

/// Result of a single submission.
///
/// A submission never fails in the `Result` sense: the item always comes
/// back to the caller and the outcome says what happened on the way.
#[derive(Debug)]
pub enum Outcome {
    /// The store accepted the document.
    Success,
    /// The store could not be reached (refused or cancelled connect).
    ConnectionFailure,
    /// Anything else: bad item, serialization, response timeout, or a
    /// non-2xx HTTP status. A store that rejects documents (e.g. a mapping
    /// error answered with 400) therefore shows up on every item, unlike
    /// clients that only fail on transport errors.
    OtherFailure(SinkError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Outcome::ConnectionFailure)
    }
}

impl From<Result<(), SinkError>> for Outcome {
    fn from(result: Result<(), SinkError>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(e) if e.is_connection() => Outcome::ConnectionFailure,
            Err(e) => Outcome::OtherFailure(e),
        }
    }
}

/// Pipeline stage that writes [`Item`]s to some external store.
///
/// Implementations only have to provide [`submit`](ItemSink::submit); the
/// pipeline entry point [`process_item`](ItemSink::process_item) wraps it
/// with [`report`](ItemSink::report) so that failures end up in the logs
/// instead of stopping the pipeline.
#[async_trait]
pub trait ItemSink: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Attempt to write one item.
    ///
    /// **Returns**
    /// - the item, unchanged, so later stages can keep working on it;
    /// - an [`Outcome`] describing the write attempt.
    async fn submit(&self, item: Item) -> (Item, Outcome);

    /// Surface an outcome to the operator.
    ///
    /// The default logs every connection failure at error level and dumps
    /// other failures to stderr.
    fn report(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success => {}
            Outcome::ConnectionFailure => {
                error!(sink = self.name(), "can't connect to document store");
            }
            Outcome::OtherFailure(e) => {
                eprintln!("{}", format_error_chain(e));
            }
        }
    }

    /// Submit, report and hand the item back. Never fails.
    async fn process_item(&self, item: Item) -> Item {
        let (item, outcome) = self.submit(item).await;
        self.report(&outcome);
        item
    }
}

/// Render an error together with every `source()` below it, one per line.
pub fn format_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = format!("Error: {:?}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\nCaused by: {}", cause);
        source = cause.source();
    }
    out
}
