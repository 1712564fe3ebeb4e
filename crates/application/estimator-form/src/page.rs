//! The page and its two handlers

use crate::chart::{build_chart_config, ChartSlot, ChartSurface};
use crate::form::FormState;
use crate::view::PageView;
use crate::PRICE_PREFIX;
use estimator_api::{ApiError, EstimatorBackend};
use estimator_core::{BaseInput, CurveRequest, CurveResponse, Prediction};

/// Form, regions and chart slot, drawn on surface `S`
pub struct Page<S: ChartSurface> {
    pub form: FormState,
    pub view: PageView,
    surface: S,
    chart: ChartSlot<S::Chart>,
}

impl<S: ChartSurface> Page<S> {
    pub fn new(form: FormState, surface: S) -> Self {
        Self {
            form,
            view: PageView::default(),
            surface,
            chart: ChartSlot::new(),
        }
    }

    pub fn chart(&self) -> Option<&S::Chart> {
        self.chart.current()
    }

    pub fn chart_renders(&self) -> u64 {
        self.chart.renders()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // ============== Point prediction ==============

    /// Form submission up to the network call: hide both regions, collect input
    pub fn begin_prediction(&mut self) -> BaseInput {
        self.view.result.hide();
        self.view.error.hide();
        let input = self.form.base_input();
        if input.has_non_numeric() {
            tracing::debug!("Submitting prediction with non-numeric fields");
        }
        input
    }

    pub fn complete_prediction(&mut self, outcome: Result<Prediction, ApiError>) {
        match outcome {
            Ok(prediction) => {
                self.view
                    .result
                    .show(format!("{}{}", PRICE_PREFIX, prediction.predicted_price_formatted));
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub async fn submit_prediction<B>(&mut self, backend: &B)
    where
        B: EstimatorBackend + ?Sized,
    {
        let input = self.begin_prediction();
        let outcome = backend.predict_price(&input).await;
        self.complete_prediction(outcome);
    }

    // ============== Feature curve ==============

    /// Curve activation up to the network call. The result region is left alone.
    pub fn begin_curve(&mut self) -> CurveRequest {
        self.view.error.hide();
        self.form.curve_request()
    }

    pub fn complete_curve(&mut self, outcome: Result<CurveResponse, ApiError>) {
        match outcome {
            Ok(curve) => {
                self.render_curve(&curve);
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub async fn request_curve<B>(&mut self, backend: &B)
    where
        B: EstimatorBackend + ?Sized,
    {
        let request = self.begin_curve();
        let outcome = backend.feature_curve(&request).await;
        self.complete_curve(outcome);
    }

    /// Replace the chart with one drawn from `curve`
    pub fn render_curve(&mut self, curve: &CurveResponse) -> &S::Chart {
        let config = build_chart_config(curve);
        tracing::debug!(
            feature = %curve.feature_name,
            points = curve.len(),
            "Rendering feature curve"
        );
        let surface = &mut self.surface;
        self.chart.replace_with(|| surface.create(config))
    }

    fn show_error(&mut self, error: &ApiError) {
        tracing::warn!("Request failed: {}", error);
        self.view.error.show(error.to_string());
    }
}
