//! Housing Estimator Core
//!
//! Domain types shared by every layer of the estimator client.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  FORM TEXT   │───>│  BaseInput   │───>│ /predict_price│──> Prediction
//! │ (8 fields)   │    │ CurveRequest │───>│ /feature_curve│──> CurveResponse
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Nothing here performs I/O. Parsing of form text follows browser number
//! parsing so that bad input is forwarded to the backend, never rejected here.

pub mod curve;
pub mod feature;
pub mod input;
pub mod parse;
pub mod prediction;

pub use curve::{CurveRequest, CurveResponse};
pub use feature::Feature;
pub use input::BaseInput;
pub use parse::{parse_float, parse_int};
pub use prediction::{HealthStatus, Prediction};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Curve has {x_values} x values but {prices} prices")]
    CurveLengthMismatch { x_values: usize, prices: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
