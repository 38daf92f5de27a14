// Application layer - Use cases and ports
pub mod click_service;
pub mod control_sink;
pub mod data_source;
pub mod refresh_service;
