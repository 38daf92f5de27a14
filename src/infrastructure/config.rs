use crate::application::refresh_service::DEFAULT_POLL_INTERVAL;
use crate::domain::chart::DEFAULT_DATASET_LABEL;
use crate::domain::control::ControlElement;
use crate::domain::series::is_valid_label_format;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub collaborator: CollaboratorSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub surface: SurfaceSettings,
    #[serde(default)]
    pub controls: Vec<ControlElement>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollaboratorSettings {
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_hours")]
    pub default_hours: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_dataset_label")]
    pub dataset_label: String,
    #[serde(default = "default_label_format")]
    pub label_format: String,
    pub sensor: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SurfaceSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_hours() -> u32 {
    1
}

fn default_dataset_label() -> String {
    DEFAULT_DATASET_LABEL.to_string()
}

fn default_label_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            default_hours: default_hours(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dataset_label: default_dataset_label(),
            label_format: default_label_format(),
            sensor: None,
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.collaborator.request_timeout_secs)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.surface
            .bind
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid surface.bind '{}': {}", self.surface.bind, e))
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.refresh.interval_secs == 0 {
            anyhow::bail!("refresh.interval_secs must be greater than zero");
        }
        if self.collaborator.request_timeout_secs == 0 {
            anyhow::bail!("collaborator.request_timeout_secs must be greater than zero");
        }
        reqwest::Url::parse(&self.collaborator.base_url).map_err(|e| {
            anyhow::anyhow!("invalid collaborator.base_url '{}': {}", self.collaborator.base_url, e)
        })?;
        self.bind_addr()?;
        if !is_valid_label_format(&self.chart.label_format) {
            anyhow::bail!("invalid chart.label_format '{}'", self.chart.label_format);
        }
        Ok(self)
    }
}

/// Load `config/dashboard.*`, overridden by `DASHBOARD__SECTION__KEY` variables
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    settings.try_deserialize::<DashboardConfig>()?.validate()
}
