use crate::record::Item;
use crate::sink::{ItemSink, Outcome};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, trace};

/// Counters describing what a stage has done so far.
#[derive(Debug, Default)]
pub struct StageStats {
    /// Items pulled from the input channel.
    pub received: AtomicU64,
    pub succeeded: AtomicU64,
    pub connection_failures: AtomicU64,
    pub other_failures: AtomicU64,
    /// Items that could not be forwarded because the output was closed.
    pub forward_dropped: AtomicU64,
}

impl StageStats {
    fn record(&self, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Success => &self.succeeded,
            Outcome::ConnectionFailure => &self.connection_failures,
            Outcome::OtherFailure(_) => &self.other_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Background task that pushes every received item through an [`ItemSink`]
/// and forwards it to the next stage.
///
/// Up to `max_in_flight` items are held at once, from submission until
/// `output` accepts them, so a slow consumer pushes back on the input.
/// Items may come out in a different order than they went in. The task
/// finishes once the input channel is closed and every held item is done.
pub struct SinkStage {
    pub stats: Arc<StageStats>,
    handle: JoinHandle<()>,
}

impl SinkStage {
    /// Spawn the stage on the current Tokio runtime.
    ///
    /// `max_in_flight` is raised to 1 if zero is given.
    pub fn spawn(
        sink: Arc<dyn ItemSink>,
        mut input: mpsc::Receiver<Item>,
        output: mpsc::Sender<Item>,
        max_in_flight: usize,
    ) -> Self {
        let max_in_flight = max_in_flight.max(1);
        let stats = Arc::new(StageStats::default());
        let stats_bg = Arc::clone(&stats);
        let semaphore = Arc::new(Semaphore::new(max_in_flight));

        trace!(sink = sink.name(), max_in_flight, "starting sink stage");
        let handle = tokio::spawn(async move {
            let mut tasks = JoinSet::new();

            while let Some(item) = input.recv().await {
                stats_bg.received.fetch_add(1, Ordering::Relaxed);
                let permit = match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(p) => p,
                    Err(_) => break,
                };

                let sink = Arc::clone(&sink);
                let stats = Arc::clone(&stats_bg);
                let output = output.clone();
                tasks.spawn(async move {
                    let (item, outcome) = sink.submit(item).await;
                    stats.record(&outcome);
                    sink.report(&outcome);

                    if output.send(item).await.is_err() {
                        stats.forward_dropped.fetch_add(1, Ordering::Relaxed);
                    }
                    // Held until forwarded so a slow consumer stalls the input.
                    drop(permit);
                });

                // Reap finished submissions so the set does not grow unbounded.
                while let Some(res) = tasks.try_join_next() {
                    if let Err(e) = res {
                        error!("sink submission task failed: {:?}", e);
                    }
                }
            }

            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("sink submission task failed: {:?}", e);
                }
            }
            trace!("sink stage finished");
        });

        SinkStage { stats, handle }
    }

    /// Wait for the stage to drain. Close the input sender first.
    pub async fn join(self) -> Arc<StageStats> {
        if let Err(e) = self.handle.await {
            error!("sink stage task failed: {:?}", e);
        }
        self.stats
    }
}
