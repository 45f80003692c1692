use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("user {handle} not found")]
    NotFound { handle: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint answered 2xx but its envelope reported a failure.
    #[error("API error: {0}")]
    Api(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("structured endpoint failed ({primary}); profile page failed ({fallback})")]
    AllStrategiesFailed {
        primary: Box<SourceError>,
        fallback: Box<SourceError>,
    },
}

