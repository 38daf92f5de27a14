// Domain layer - Chart, series and control models
pub mod chart;
pub mod control;
pub mod error;
pub mod series;
