use thiserror::Error;
use tokio::sync::mpsc;

use crate::listing::Listing;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Record has no field named [{0}].")]
    UnknownField(String),

    /// A required selector matched nothing. `document` carries the page source when the
    /// lookup ran against a whole fetched document.
    #[error("HTML element not found. Selector: [{selector}]")]
    ElementNotFound {
        selector: String,
        document: Option<String>,
    },
    #[error("Extraction failed: {0}")]
    Extraction(String),
    #[error("Page [{0}] is out of range.")]
    PageOutOfRange(u32),
    #[error("The selector could not be compiled. Selector: {0}")]
    InvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Couldn't send a page through a channel.")]
    RuntimeSendError,

    /// A transport failure reported by a `Fetch` implementation.
    #[error("Transport Error for [{url}]: {reason}")]
    Transport { url: String, reason: String },
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn extraction(msg: impl Into<String>) -> Self {
        Error::Extraction(msg.into())
    }
}

impl From<mpsc::error::SendError<(u32, Listing)>> for Error {
    fn from(_value: mpsc::error::SendError<(u32, Listing)>) -> Self {
        Error::RuntimeSendError
    }
}
