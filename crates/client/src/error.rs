//! Errors the client can surface.
//!
//! Every failure propagates to the caller unchanged: there is no retry and
//! no local recovery. [`Transport`] wraps network/decode failures from the
//! HTTP layer, [`Service`] carries a failure the backend reported inside a
//! well-formed envelope.
//!
//! [`Transport`]: ClientError::Transport
//! [`Service`]: ClientError::Service
use api_types::envelope::Envelope;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected before any request was built (empty names, zero pagination).
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    /// Network or transport failure, including a body that is not JSON.
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The envelope decoded but `stat` was not `"ok"`. The full raw
    /// envelope is kept for caller inspection.
    #[error("service error: {message}")]
    Service { message: String, envelope: Envelope },
}
