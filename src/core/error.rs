use chrono::NaiveDate;
use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Per-sub-interval transport failures are deliberately *not* represented
/// here: they are recorded in [`crate::core::models::SegmentReport`] and
/// surface as reduced success counts, never as an `Err`.
#[derive(Debug, Error)]
pub enum TelraamError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received from the API was in an unexpected format or was
    /// missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// An invalid date range was provided (start must not be after end).
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange {
        /// The offending range start.
        start: NaiveDate,
        /// The offending range end.
        end: NaiveDate,
    },

    /// An invalid parameter was supplied (e.g. a non-positive chunk span).
    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    /// The client was built without an API key.
    #[error("an API key is required; set one with TelraamClientBuilder::api_key")]
    MissingApiKey,

    /// A filesystem operation failed while persisting a dataset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization or deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
