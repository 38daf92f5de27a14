// Interactive control elements
use serde::{Deserialize, Serialize};

/// An element whose clicks are forwarded to the control endpoint.
/// `markup` is the element's rendered inner content, sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlElement {
    pub id: String,
    pub markup: String,
}

/// Allow-list of interactive elements; anything else on the page is inert
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    elements: Vec<ControlElement>,
}

impl ControlPanel {
    pub fn new(elements: Vec<ControlElement>) -> Self {
        let mut panel = Self::default();
        for element in elements {
            // Later entries with the same id replace earlier ones
            match panel.elements.iter_mut().find(|e| e.id == element.id) {
                Some(existing) => {
                    tracing::warn!(id = %element.id, "duplicate control element, keeping the last");
                    *existing = element;
                }
                None => panel.elements.push(element),
            }
        }
        panel
    }

    pub fn get(&self, id: &str) -> Option<&ControlElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn elements(&self) -> &[ControlElement] {
        &self.elements
    }
}
