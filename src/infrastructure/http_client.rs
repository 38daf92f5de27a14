// HTTP client for the collaborator's /data and /heatpump endpoints
use crate::application::control_sink::ControlSink;
use crate::application::data_source::TemperatureSource;
use crate::domain::error::DashboardError;
use crate::domain::series::{RawTimestamp, SeriesData, parse_timestamp};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CollaboratorClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DataResponse {
    times: Vec<WireTimestamp>,
    temperatures: Vec<f64>,
    #[serde(default)]
    sensors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Text(String),
    Number(f64),
}

impl From<WireTimestamp> for RawTimestamp {
    fn from(value: WireTimestamp) -> Self {
        match value {
            WireTimestamp::Text(text) => RawTimestamp::Text(text),
            WireTimestamp::Number(ms) => RawTimestamp::EpochMillis(ms),
        }
    }
}

impl DataResponse {
    fn into_series(self) -> Result<SeriesData, DashboardError> {
        let times = self
            .times
            .into_iter()
            .map(|t| parse_timestamp(&t.into()))
            .collect::<Result<Vec<_>, _>>()?;
        SeriesData::new(times, self.temperatures, self.sensors)
    }
}

impl CollaboratorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::TransientFetch(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn data_url(&self, hours: u32) -> String {
        let hours = hours.to_string();
        format!("{}/data?hours={}", self.base_url, urlencoding::encode(&hours))
    }

    fn heatpump_url(&self) -> String {
        format!("{}/heatpump", self.base_url)
    }

    /// Reachability probe against the collaborator's `/ping`
    pub async fn ping(&self) -> Result<(), DashboardError> {
        let url = format!("{}/ping", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::TransientFetch(format!("ping failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() && body.trim() == "pong" {
            Ok(())
        } else {
            Err(DashboardError::TransientFetch(format!(
                "unexpected ping answer {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl TemperatureSource for CollaboratorClient {
    async fn fetch(&self, hours: u32) -> Result<SeriesData, DashboardError> {
        let url = self.data_url(hours);
        tracing::debug!(%url, "requesting temperature window");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DashboardError::TransientFetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::TransientFetch(format!(
                "data endpoint returned {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DashboardError::TransientFetch(e.to_string()))?;
        let data: DataResponse = serde_json::from_slice(&bytes)
            .map_err(|e| DashboardError::MalformedResponse(e.to_string()))?;

        data.into_series()
    }
}

#[async_trait]
impl ControlSink for CollaboratorClient {
    async fn send(&self, markup: &str) -> Result<(), DashboardError> {
        let response = self
            .client
            .post(self.heatpump_url())
            .header("Content-Type", "text/html; charset=utf-8")
            .body(markup.to_string())
            .send()
            .await
            .map_err(|e| DashboardError::ControlForward(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DashboardError::ControlForward(format!(
                "control endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
