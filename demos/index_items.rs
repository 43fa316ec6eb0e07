use es_item_sink::env::{env_or, ES_PIPELINE_URL_ENV};
use es_item_sink::init::init_logging_with_config;
use es_item_sink::init::LogConfig;
use es_item_sink::{EsWriter, Item, ItemSink, SinkError};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() {
    let log_config = LogConfig {
        default_filter: "es_item_sink=debug,info".to_string(),
        ..LogConfig::default()
    };
    if let Err(e) = init_logging_with_config(log_config) {
        eprintln!("{}", e);
    }

    // Example: ES_PIPELINE_URL=http://localhost:9200/properties/property
    let writer = match EsWriter::from_env() {
        Ok(writer) => writer,
        Err(SinkError::NotConfigured) => {
            info!(
                "{} is not set, skipping the document store stage (try {})",
                ES_PIPELINE_URL_ENV,
                env_or("ES_EXAMPLE_URL", "http://localhost:9200/properties/property")
            );
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let items = vec![
        json!({
            "title": ["Bright flat near the café"],
            "price": [350.0],
            "url": ["http://web:9312/properties/property_000000.html"]
        }),
        json!({
            "title": ["Quiet studio"],
            "price": [210.0],
            "url": ["http://web:9312/properties/property_000001.html"]
        }),
        json!({ "title": ["Listing without url"] }),
    ];

    for value in items {
        let Ok(item) = Item::try_from(value) else { continue };
        let item = writer.process_item(item).await;
        info!(fields = item.len(), "item passed to the next stage");
    }
}
