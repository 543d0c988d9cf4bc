use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid data root \"{root}\": {reason}")]
    InvalidRoot { root: String, reason: String },
}
