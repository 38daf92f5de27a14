// Chart display state
use serde::Serialize;

pub const DEFAULT_DATASET_LABEL: &str = "Temperature";
const DEFAULT_BORDER_COLOR: &str = "rgb(75, 192, 192)";
const DEFAULT_TENSION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub border_color: String,
    pub fill: bool,
    pub tension: f64,
}

impl Dataset {
    pub fn new(label: String) -> Self {
        Self {
            label,
            values: Vec::new(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            fill: false,
            tension: DEFAULT_TENSION,
        }
    }
}

/// A line chart with a single temperature dataset.
///
/// `revision` counts redraw requests; a renderer repaints whenever it changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub revision: u64,
}

impl Chart {
    pub fn new(dataset_label: String) -> Self {
        Self {
            labels: Vec::new(),
            datasets: vec![Dataset::new(dataset_label)],
            x_axis_title: "Time (UTC)".to_string(),
            y_axis_title: "Temperature".to_string(),
            revision: 0,
        }
    }

    /// Overwrite the labels and the first dataset's values wholesale
    pub fn replace_series(&mut self, labels: Vec<String>, values: Vec<f64>) {
        self.labels = labels;
        match self.datasets.first_mut() {
            Some(dataset) => dataset.values = values,
            None => {
                let mut dataset = Dataset::new(DEFAULT_DATASET_LABEL.to_string());
                dataset.values = values;
                self.datasets.push(dataset);
            }
        }
    }

    pub fn update(&mut self) {
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            points = self.labels.len(),
            "chart redraw requested"
        );
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_LABEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chart_is_empty_single_dataset() {
        let chart = Chart::default();
        assert!(chart.labels.is_empty());
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "Temperature");
        assert_eq!(chart.datasets[0].border_color, "rgb(75, 192, 192)");
        assert!(!chart.datasets[0].fill);
        assert_eq!(chart.x_axis_title, "Time (UTC)");
        assert_eq!(chart.revision, 0);
    }

    #[test]
    fn test_replace_series_overwrites_everything() {
        let mut chart = Chart::default();
        chart.replace_series(
            vec!["a".into(), "b".into(), "c".into()],
            vec![1.0, 2.0, 3.0],
        );
        chart.replace_series(vec!["d".into()], vec![4.0]);

        assert_eq!(chart.labels, vec!["d"]);
        assert_eq!(chart.datasets[0].values, vec![4.0]);
        assert_eq!(chart.revision, 0);

        chart.update();
        assert_eq!(chart.revision, 1);
    }
}
