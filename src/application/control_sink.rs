// Port for forwarding control actions
use crate::domain::error::DashboardError;
use async_trait::async_trait;

#[async_trait]
pub trait ControlSink: Send + Sync {
    /// Deliver an element's markup to the control endpoint. Any response body is dropped.
    async fn send(&self, markup: &str) -> Result<(), DashboardError>;
}
