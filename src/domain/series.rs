// Temperature series domain model
use super::error::DashboardError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A timestamp as it appears on the wire: a date string or epoch milliseconds
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    Text(String),
    EpochMillis(f64),
}

/// Parse a collaborator timestamp into UTC.
///
/// Naive date strings carry no offset; the collaborator records them in UTC,
/// so they are read as UTC here.
pub fn parse_timestamp(raw: &RawTimestamp) -> Result<DateTime<Utc>, DashboardError> {
    match raw {
        RawTimestamp::Text(text) => {
            let text = text.trim();
            if let Ok(time) = DateTime::parse_from_rfc3339(text) {
                return Ok(time.with_timezone(&Utc));
            }
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
                .ok_or_else(|| {
                    DashboardError::MalformedResponse(format!("unparseable timestamp '{}'", text))
                })
        }
        RawTimestamp::EpochMillis(ms) => {
            if !ms.is_finite() {
                return Err(DashboardError::MalformedResponse(format!(
                    "timestamp {} is not a finite number",
                    ms
                )));
            }
            DateTime::from_timestamp_millis(ms.trunc() as i64).ok_or_else(|| {
                DashboardError::MalformedResponse(format!("timestamp {} out of range", ms))
            })
        }
    }
}

/// Whether `format` is a strftime pattern chrono can render.
/// Formatting with an invalid specifier panics, so patterns are checked up front.
pub fn is_valid_label_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// One polled time window: index-aligned times and readings
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesData {
    pub times: Vec<DateTime<Utc>>,
    pub temperatures: Vec<f64>,
    pub sensors: Option<Vec<String>>,
}

impl SeriesData {
    pub fn new(
        times: Vec<DateTime<Utc>>,
        temperatures: Vec<f64>,
        sensors: Option<Vec<String>>,
    ) -> Result<Self, DashboardError> {
        if times.len() != temperatures.len() {
            return Err(DashboardError::MalformedResponse(format!(
                "{} times but {} temperatures",
                times.len(),
                temperatures.len()
            )));
        }
        if let Some(sensors) = &sensors {
            if sensors.len() != times.len() {
                return Err(DashboardError::MalformedResponse(format!(
                    "{} times but {} sensors",
                    times.len(),
                    sensors.len()
                )));
            }
        }

        Ok(Self {
            times,
            temperatures,
            sensors,
        })
    }

    /// Keep only the readings reported by `sensor`.
    /// A series without sensor tags is returned unchanged.
    pub fn for_sensor(self, sensor: &str) -> Self {
        let Some(sensors) = self.sensors else {
            return self;
        };

        let mut times = Vec::new();
        let mut temperatures = Vec::new();
        let mut kept = Vec::new();
        for ((time, value), name) in self.times.into_iter().zip(self.temperatures).zip(sensors) {
            if name == sensor {
                times.push(time);
                temperatures.push(value);
                kept.push(name);
            }
        }

        Self {
            times,
            temperatures,
            sensors: Some(kept),
        }
    }

    /// Display labels for the x axis, formatted in UTC
    pub fn labels(&self, format: &str) -> Vec<String> {
        self.times
            .iter()
            .map(|t| t.format(format).to_string())
            .collect()
    }
}
