//! Backend endpoints

use reqwest::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    PredictPrice,
    FeatureCurve,
    Health,
}

impl Endpoint {
    /// Path relative to the configured base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PredictPrice => "predict_price",
            Endpoint::FeatureCurve => "feature_curve",
            Endpoint::Health => "health",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::PredictPrice | Endpoint::FeatureCurve => Method::POST,
            Endpoint::Health => Method::GET,
        }
    }

    /// Shown when a failed response carries no body
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Endpoint::PredictPrice => "Error al calcular la predicción",
            Endpoint::FeatureCurve => "Error al calcular la curva",
            Endpoint::Health => "Error al consultar el estado de la API",
        }
    }
}
