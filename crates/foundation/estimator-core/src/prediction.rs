//! Responses of `/predict_price` and `/health`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Point prediction. Only the formatted price is required on the wire;
/// the other fields never fail decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, deserialize_with = "number_or_none")]
    pub predicted_price: Option<f64>,
    pub predicted_price_formatted: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Numeric metrics only; anything else the backend reports is skipped
    #[serde(default, deserialize_with = "numeric_entries")]
    pub model_metrics: BTreeMap<String, f64>,
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn numeric_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = null_as_default(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
        .collect())
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_minimal() {
        let prediction: Prediction =
            serde_json::from_value(json!({"predicted_price_formatted": "$250,000"})).unwrap();
        assert_eq!(prediction.predicted_price_formatted, "$250,000");
        assert_eq!(prediction.predicted_price, None);
        assert!(prediction.details.is_empty());
    }

    #[test]
    fn test_prediction_full() {
        let prediction: Prediction = serde_json::from_value(json!({
            "predicted_price": 231500.0,
            "predicted_price_formatted": "231,500 $",
            "details": {"y_100k": 2.315},
        }))
        .unwrap();
        assert_eq!(prediction.predicted_price, Some(231500.0));
        assert_eq!(prediction.details.get("y_100k"), Some(&json!(2.315)));
    }

    #[test]
    fn test_prediction_optional_fields_never_fail() {
        let prediction: Prediction = serde_json::from_value(json!({
            "predicted_price": null,
            "predicted_price_formatted": "$250,000",
            "details": null,
        }))
        .unwrap();
        assert_eq!(prediction.predicted_price, None);
        assert!(prediction.details.is_empty());

        let prediction: Prediction = serde_json::from_value(json!({
            "predicted_price": "250000",
            "predicted_price_formatted": "$250,000",
            "details": {"model": "ridge", "y_100k": 2.5},
        }))
        .unwrap();
        assert_eq!(prediction.predicted_price, None);
        assert_eq!(prediction.details.get("model"), Some(&json!("ridge")));
    }

    #[test]
    fn test_prediction_requires_formatted_price() {
        let result = serde_json::from_value::<Prediction>(json!({"predicted_price": 1.0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_health() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "ok",
            "model_metrics": {"mae_100k": 0.33, "r2": 0.8},
        }))
        .unwrap();
        assert!(health.is_ok());
        assert_eq!(health.model_metrics.len(), 2);
    }

    #[test]
    fn test_health_skips_non_numeric_metrics() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "ok",
            "model_metrics": {"r2": 0.8, "model": "ridge"},
        }))
        .unwrap();
        assert_eq!(health.model_metrics.get("r2"), Some(&0.8));
        assert_eq!(health.model_metrics.len(), 1);

        let health: HealthStatus =
            serde_json::from_value(json!({"status": "ok", "model_metrics": null})).unwrap();
        assert!(health.model_metrics.is_empty());
    }
}
