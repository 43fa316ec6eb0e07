use crate::endpoint::{body_preview, document_endpoint};
use crate::env::{env_opt, ES_PIPELINE_URL_ENV};
use crate::error::SinkError;
use crate::record::Item;
use crate::sink::{format_error_chain, ItemSink, Outcome};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::Duration;
use tracing::{debug, error};

/// Upper bound for a single PUT, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect-phase deadline. Must fire before [`REQUEST_TIMEOUT`] so a
/// connect that never completes is reported as a connection failure rather
/// than a request timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(4_900);

/// Number of body characters shown in the per-item debug line.
const PREVIEW_CHARS: usize = 100;

/// Writes each item as one document into an Elasticsearch-compatible store.
///
/// Items are addressed by their first `url` entry:
/// `PUT <base_url>/<percent-encoded url>`. Only the first connection
/// failure is logged; every later one is silent while submissions keep
/// being attempted.
pub struct EsWriter {
    client: Client,
    /// Base URL of the index/type, e.g. "http://localhost:9200/properties/property".
    base_url: String,
    /// Cleared after the first connection failure has been logged.
    report_connection_error: AtomicBool,
}

impl EsWriter {
    /// Create a writer targeting `base_url`.
    ///
    /// **Returns**
    /// - `Err(SinkError::NotConfigured)` if the URL is empty. The caller is
    ///   expected to leave the stage out of the pipeline in that case.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SinkError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(SinkError::NotConfigured);
        }
        Self::with_client(base_url, default_client()?)
    }

    /// Same as [`EsWriter::new`] but reusing an existing HTTP client.
    ///
    /// The client should carry a connect timeout shorter than
    /// [`REQUEST_TIMEOUT`] (see [`default_client`]); otherwise a connect
    /// that hangs surfaces as a timeout and is dumped on every item instead
    /// of being logged once.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Result<Self, SinkError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(SinkError::NotConfigured);
        }

        Ok(EsWriter {
            client,
            base_url,
            report_connection_error: AtomicBool::new(true),
        })
    }

    /// Build from an optional setting; `None` means not configured.
    pub fn from_config(base_url: Option<&str>) -> Result<Self, SinkError> {
        Self::new(base_url.ok_or(SinkError::NotConfigured)?)
    }

    /// Build from the `ES_PIPELINE_URL` environment variable.
    pub fn from_env() -> Result<Self, SinkError> {
        Self::from_config(env_opt(ES_PIPELINE_URL_ENV).as_deref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the next connection failure will still be logged.
    pub fn reports_connection_errors(&self) -> bool {
        self.report_connection_error.load(Ordering::SeqCst)
    }

    async fn put(&self, item: &Item) -> Result<(), SinkError> {
        let json_doc = serde_json::to_string(item)?;
        let id = item.document_id()?;
        let endpoint = document_endpoint(&self.base_url, &id);

        debug!(
            "Inserting \"{}...\" to {}",
            body_preview(&json_doc, PREVIEW_CHARS),
            endpoint
        );

        let resp = self
            .client
            .put(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(json_doc)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(SinkError::Status { status, body })
        }
    }
}

/// HTTP client used by [`EsWriter::new`].
pub fn default_client() -> Result<Client, SinkError> {
    Ok(Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?)
}

#[async_trait]
impl ItemSink for EsWriter {
    fn name(&self) -> &str {
        "es_writer"
    }

    async fn submit(&self, item: Item) -> (Item, Outcome) {
        let outcome = Outcome::from(self.put(&item).await);
        (item, outcome)
    }

    fn report(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Success => {}
            Outcome::ConnectionFailure => {
                if self.report_connection_error.swap(false, Ordering::SeqCst) {
                    error!("Can't connect to ES: {}", self.base_url);
                }
            }
            Outcome::OtherFailure(e) => {
                eprintln!("{}", format_error_chain(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_not_configured() {
        assert!(matches!(EsWriter::new(""), Err(SinkError::NotConfigured)));
        assert!(matches!(EsWriter::new("   "), Err(SinkError::NotConfigured)));
        assert!(matches!(EsWriter::from_config(None), Err(SinkError::NotConfigured)));
    }

    #[test]
    fn connect_deadline_precedes_request_deadline() {
        assert!(CONNECT_TIMEOUT < REQUEST_TIMEOUT);
    }

    #[test]
    fn new_writer_reports_first_connection_error() {
        let writer = EsWriter::new("http://es.local:9200").unwrap();
        assert_eq!(writer.base_url(), "http://es.local:9200");
        assert!(writer.reports_connection_errors());
    }

    #[test]
    fn connection_reporting_is_sticky() {
        let writer = EsWriter::new("http://es.local:9200").unwrap();
        writer.report(&Outcome::Success);
        assert!(writer.reports_connection_errors());

        writer.report(&Outcome::ConnectionFailure);
        assert!(!writer.reports_connection_errors());

        writer.report(&Outcome::OtherFailure(SinkError::MissingDocumentId));
        writer.report(&Outcome::Success);
        assert!(!writer.reports_connection_errors());
    }
}
