//! Feature sweep request and response.

use crate::{BaseInput, CoreError, Result};
use serde::{Deserialize, Serialize};

/// Body of `POST /feature_curve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRequest {
    pub feature_name: String,
    pub base: BaseInput,
    pub min_value: f64,
    pub max_value: f64,
    /// `None` is forwarded as `null` when the field did not parse
    pub num_points: Option<i64>,
}

/// Body returned by `POST /feature_curve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveResponse {
    pub feature_name: String,
    pub x_values: Vec<f64>,
    pub prices: Vec<f64>,
}

impl CurveResponse {
    /// x values and prices are parallel sequences
    pub fn validate(&self) -> Result<()> {
        if self.x_values.len() != self.prices.len() {
            return Err(CoreError::CurveLengthMismatch {
                x_values: self.x_values.len(),
                prices: self.prices.len(),
            });
        }
        Ok(())
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_values.iter().copied().zip(self.prices.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.x_values.len().min(self.prices.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
