use crate::record::Item;
use crate::sink::{ItemSink, Outcome};
use async_trait::async_trait;

/// A sink that accepts every item without writing it anywhere.
///
/// Useful for measuring the overhead of a stage without any external I/O,
/// and for dry runs of a crawl when no store is configured.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl ItemSink for NoopSink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn submit(&self, item: Item) -> (Item, Outcome) {
        (item, Outcome::Success)
    }
}
