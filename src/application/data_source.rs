// Port for fetching temperature windows
use crate::domain::error::DashboardError;
use crate::domain::series::SeriesData;
use async_trait::async_trait;

#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Fetch the readings of the last `hours` hours.
    /// The value is passed through as given; bounds are the collaborator's concern.
    async fn fetch(&self, hours: u32) -> Result<SeriesData, DashboardError>;
}
