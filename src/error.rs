// Error types for the API client. Every failure that involved the server
// carries the URL, the HTTP status and the raw body, so a failed call can
// be reproduced and debugged from the error alone.

use thiserror::Error;

/// A call that reached the server but could not be used: non-200 status,
/// unreadable/empty body, invalid JSON, or a payload of an unknown kind.
#[derive(Debug, Error)]
#[error("request to {url} returned status {status}: {message}")]
pub struct RequestError {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub message: String,
}

impl RequestError {
    pub fn new(
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RequestError {
            url: url.into(),
            status,
            body: body.into(),
            message: message.into(),
        }
    }
}

/// Everything that can go wrong talking to the word-frequency API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL did not parse; nothing was sent.
    #[error("invalid base url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The HTTP client itself could not be assembled.
    #[error("failed to build HTTP client: {message}")]
    ClientSetup { message: String },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but the answer was unusable.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The dispatcher produced a page of a kind the caller did not ask
    /// for. Unreachable as long as paths and page kinds stay paired.
    #[error("expected a {expected} response but got something else")]
    UnexpectedShape { expected: &'static str },
}
