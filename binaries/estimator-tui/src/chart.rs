//! Terminal chart surface
//!
//! Charts are plotted against the label index so x ticks line up with the
//! two-decimal labels, the way a category axis would.

use chrono::{DateTime, Local};
use estimator_form::{ChartConfig, ChartInstance, ChartSurface};

pub struct TerminalChart {
    id: u64,
    config: ChartConfig,
    points: Vec<(f64, f64)>,
    drawn_at: DateTime<Local>,
}

impl TerminalChart {
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn drawn_at(&self) -> DateTime<Local> {
        self.drawn_at
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.points.len().saturating_sub(1) as f64).max(1.0)]
    }

    /// Series range with a little headroom; flat series get a unit band
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));

        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        if (max - min).abs() < f64::EPSILON {
            return [min - 1.0, max + 1.0];
        }
        let pad = (max - min) * 0.05;
        [min - pad, max + pad]
    }

    /// First, middle and last x labels
    pub fn x_labels(&self) -> Vec<String> {
        let labels = self.config.labels();
        match labels.len() {
            0 => Vec::new(),
            1 => vec![labels[0].clone()],
            2 => labels.to_vec(),
            n => vec![labels[0].clone(), labels[n / 2].clone(), labels[n - 1].clone()],
        }
    }

    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds();
        [lo, (lo + hi) / 2.0, hi]
            .iter()
            .map(|v| format!("{:.0}", v))
            .collect()
    }
}

impl ChartInstance for TerminalChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn destroy(self) {
        tracing::debug!(chart = self.id, points = self.points.len(), "Released chart");
    }
}

#[derive(Debug, Default)]
pub struct TerminalSurface {
    drawn: u64,
}

impl TerminalSurface {
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl ChartSurface for TerminalSurface {
    type Chart = TerminalChart;

    fn create(&mut self, config: ChartConfig) -> TerminalChart {
        self.drawn += 1;
        let points = config
            .series()
            .iter()
            .enumerate()
            .filter(|(_, y)| y.is_finite())
            .map(|(i, y)| (i as f64, *y))
            .collect();

        TerminalChart {
            id: self.drawn,
            config,
            points,
            drawn_at: Local::now(),
        }
    }
}
