// Application state for HTTP handlers
use crate::application::click_service::ClickForwarder;
use crate::application::refresh_service::{HoursSelector, SharedChart};

#[derive(Clone)]
pub struct AppState {
    pub chart: SharedChart,
    pub hours: HoursSelector,
    pub clicks: ClickForwarder,
}
