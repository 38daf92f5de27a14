// Presentation layer - Local HTTP surface of the widget
pub mod app_state;
pub mod handlers;
