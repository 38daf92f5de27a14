// Click forwarder - Sends control element clicks to the control endpoint
use crate::application::control_sink::ControlSink;
use crate::domain::control::{ControlElement, ControlPanel};
use crate::domain::error::DashboardError;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct ClickForwarder {
    sink: Arc<dyn ControlSink>,
    panel: Arc<ControlPanel>,
}

impl ClickForwarder {
    pub fn new(sink: Arc<dyn ControlSink>, panel: ControlPanel) -> Self {
        Self {
            sink,
            panel: Arc::new(panel),
        }
    }

    pub fn controls(&self) -> &[ControlElement] {
        self.panel.elements()
    }

    /// Forward a click on `element_id`.
    ///
    /// Fire-and-forget: the send runs on its own task and its outcome is only
    /// logged. The handle is returned so callers may wait for delivery.
    pub fn click(&self, element_id: &str) -> Result<JoinHandle<()>, DashboardError> {
        let Some(element) = self.panel.get(element_id) else {
            tracing::debug!(element_id, "click on non-interactive element ignored");
            return Err(DashboardError::UnknownElement(element_id.to_string()));
        };

        let sink = self.sink.clone();
        let id = element.id.clone();
        let markup = element.markup.clone();
        tracing::info!(element_id = %id, "forwarding control click");

        Ok(tokio::spawn(async move {
            if let Err(e) = sink.send(&markup).await {
                tracing::warn!(element_id = %id, error = %e, "control action not delivered");
            }
        }))
    }
}
