use thiserror::Error;

/// Errors from the ESB client. All of these are fatal for the run; the
/// fetcher never returns a partial record set.
#[derive(Debug, Error)]
pub enum EsbError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid ESB base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unexpected http status: {status}")]
    UnexpectedStatus { status: String },

    #[error("invalid stores count: {body:?}")]
    InvalidStoresCount { body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("got no page to fetch")]
    NoPageToFetch,

    #[error("got no stores data")]
    NoStoresData,

    #[error("fetch of page {page} failed: {source}")]
    PageFetch {
        page: usize,
        #[source]
        source: Box<EsbError>,
    },

    /// Aggregate of every failed page fetch in one pass. The fetcher always
    /// attempts all pages before reporting, so this carries each failure.
    #[error("{} page fetch(es) failed: [{}]", .0.len(), .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    PageFetches(Vec<EsbError>),
}

/// Per-record validation failures from the normalizer. Always recoverable:
/// the record is logged and dropped, the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("invalid store facts number (nil)")]
    NilNumber,

    #[error("empty store facts number")]
    EmptyNumber,

    #[error("unable to parse store facts number: {0:?}")]
    ParseNumber(String),

    #[error("invalid store name alias (nil)")]
    NilName,

    #[error("invalid store name alias (empty)")]
    EmptyName,

    #[error("invalid primary address (nil)")]
    NilAddress,

    #[error("invalid primary address (empty)")]
    EmptyAddress,
}
