// Dashboard error taxonomy
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Network or HTTP-level failure talking to the data endpoint
    #[error("failed to fetch temperature data: {0}")]
    TransientFetch(String),

    /// Data endpoint answered, but not with a usable series
    #[error("malformed temperature data: {0}")]
    MalformedResponse(String),

    /// Control endpoint could not be reached or rejected the request
    #[error("failed to forward control action: {0}")]
    ControlForward(String),

    #[error("element '{0}' is not an interactive control")]
    UnknownElement(String),
}
