use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use es_item_sink::noop_sink::NoopSink;
use es_item_sink::stage::SinkStage;
use es_item_sink::Item;
use serde_json::json;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    let (in_tx, in_rx) = mpsc::channel(1_024);
    let (out_tx, mut out_rx) = mpsc::channel(1_024);
    let stage = SinkStage::spawn(Arc::new(NoopSink), in_rx, out_tx, 64);

    let drain = tokio::spawn(async move {
        let mut n = 0u64;
        while out_rx.recv().await.is_some() {
            n += 1;
        }
        n
    });

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let item = Item::try_from(json!({
            "title": format!("listing {}", i),
            "url": [format!("http://example.com/listing/{}", i)]
        }));
        if let Ok(item) = item {
            if in_tx.send(item).await.is_err() {
                break;
            }
        }
    }
    drop(in_tx);

    let stats = stage.join().await;
    let forwarded = drain.await.unwrap_or(0);
    let elapsed = start.elapsed();

    println!("noop stage: {} items ({} forwarded, {} ok) in {:?} (~{:.0} items/s)",
        stats.received.load(Ordering::Relaxed),
        forwarded,
        stats.succeeded.load(Ordering::Relaxed),
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
