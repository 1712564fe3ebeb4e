//! Feature curve chart
//!
//! [`build_chart_config`] turns a curve response into a line chart
//! configuration. Drawing is left to a [`ChartSurface`]; the page keeps the
//! instance it returns in a [`ChartSlot`], which destroys the previous chart
//! before a new one is created.

use crate::{PRICE_AXIS_TITLE, PRICE_SERIES_LABEL};
use estimator_core::CurveResponse;
use serde::{Deserialize, Serialize};

/// Smoothing applied to the curve line
pub const LINE_TENSION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Index,
    Nearest,
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub title: AxisTitle,
}

impl AxisOptions {
    fn titled(text: &str) -> Self {
        Self {
            title: AxisTitle {
                display: true,
                text: text.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub interaction: Interaction,
    pub scales: Scales,
}

/// Chart configuration, serialised in the shape Chart.js consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Values of the single series, in thousands
    pub fn series(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn series_label(&self) -> &str {
        self.data
            .datasets
            .first()
            .map(|d| d.label.as_str())
            .unwrap_or_default()
    }

    pub fn x_title(&self) -> &str {
        &self.options.scales.x.title.text
    }

    pub fn y_title(&self) -> &str {
        &self.options.scales.y.title.text
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Labels are x values to two decimals; data are prices in thousands
pub fn build_chart_config(curve: &CurveResponse) -> ChartConfig {
    let labels = curve.x_values.iter().map(|x| format!("{:.2}", x)).collect();
    let data = curve.prices.iter().map(|p| p / 1000.0).collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: PRICE_SERIES_LABEL.to_string(),
                data,
                fill: false,
                tension: LINE_TENSION,
            }],
        },
        options: ChartOptions {
            responsive: true,
            interaction: Interaction {
                mode: InteractionMode::Index,
                intersect: false,
            },
            scales: Scales {
                x: AxisOptions::titled(&curve.feature_name),
                y: AxisOptions::titled(PRICE_AXIS_TITLE),
            },
        },
    }
}

/// A live chart holding drawing resources until destroyed
pub trait ChartInstance {
    fn config(&self) -> &ChartConfig;

    /// Release the chart's resources
    fn destroy(self);
}

/// Something charts can be drawn on
pub trait ChartSurface {
    type Chart: ChartInstance;

    fn create(&mut self, config: ChartConfig) -> Self::Chart;
}

/// Holds at most one live chart
#[derive(Debug)]
pub struct ChartSlot<C: ChartInstance> {
    current: Option<C>,
    renders: u64,
}

impl<C: ChartInstance> ChartSlot<C> {
    pub fn new() -> Self {
        Self {
            current: None,
            renders: 0,
        }
    }

    /// Destroy the current chart, then store the one `create` builds
    pub fn replace_with(&mut self, create: impl FnOnce() -> C) -> &C {
        if let Some(previous) = self.current.take() {
            tracing::debug!(render = self.renders, "Destroying previous chart");
            previous.destroy();
        }
        self.renders += 1;
        self.current.insert(create())
    }

    pub fn current(&self) -> Option<&C> {
        self.current.as_ref()
    }

    /// Number of charts created through this slot
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn clear(&mut self) {
        if let Some(chart) = self.current.take() {
            chart.destroy();
        }
    }
}

impl<C: ChartInstance> Default for ChartSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ChartInstance> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        self.clear();
    }
}
