/// Error type shared by every sink in this crate.
///
/// Only [`SinkError::NotConfigured`] is ever returned to the host directly
/// (from constructors). Everything else travels inside
/// [`Outcome::OtherFailure`](crate::sink::Outcome::OtherFailure).
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("document store url is not configured")]
    NotConfigured,

    #[error("item has no `url` field to derive a document id from")]
    MissingDocumentId,

    #[error("item `url` field cannot be used as a document id: {0}")]
    InvalidDocumentId(String),

    #[error("item must be a JSON object")]
    NotAnObject,

    #[error("failed to serialize item: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request to document store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document store responded with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

impl SinkError {
    /// `true` when the store could not be reached at all, either because the
    /// connection was refused or because the connect attempt was cancelled.
    pub fn is_connection(&self) -> bool {
        matches!(self, SinkError::Http(e) if e.is_connect())
    }
}
