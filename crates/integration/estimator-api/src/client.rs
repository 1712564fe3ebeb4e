//! HTTP client for the estimation backend

use crate::{ApiError, Endpoint, Result};
use async_trait::async_trait;
use estimator_config::EstimatorConfig;
use estimator_core::{BaseInput, CurveRequest, CurveResponse, HealthStatus, Prediction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// The two calls the form handlers make.
///
/// [`ApiClient`] is the real implementation; handlers are generic over this
/// trait so they can run against any backend.
#[async_trait]
pub trait EstimatorBackend: Send + Sync {
    async fn predict_price(&self, input: &BaseInput) -> Result<Prediction>;

    async fn feature_curve(&self, request: &CurveRequest) -> Result<CurveResponse>;
}

/// Async client for the estimation API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url`. A missing trailing slash is added so
    /// endpoint paths resolve under any path prefix.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut config = EstimatorConfig::default();
        config.api.base_url = base_url.to_string();
        Self::from_config(&config)
    }

    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus> {
        self.send::<(), _>(Endpoint::Health, None).await
    }

    /// `POST /predict_price`
    pub async fn predict_price(&self, input: &BaseInput) -> Result<Prediction> {
        self.send(Endpoint::PredictPrice, Some(input)).await
    }

    /// `POST /feature_curve`. The response is checked for parallel lengths.
    pub async fn feature_curve(&self, request: &CurveRequest) -> Result<CurveResponse> {
        let curve: CurveResponse = self.send(Endpoint::FeatureCurve, Some(request)).await?;
        curve.validate()?;
        Ok(curve)
    }

    async fn send<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(method = %endpoint.method(), %url, "Sending request");

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), "Request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            // Failed responses carry a plain-text message, possibly empty
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                endpoint.fallback_message().to_string()
            } else {
                text
            };
            tracing::warn!(endpoint = endpoint.path(), status = status.as_u16(), "Backend rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(endpoint = endpoint.path(), "Malformed response: {}", e);
            ApiError::Decode(e)
        })?;
        Ok(parsed)
    }
}

#[async_trait]
impl EstimatorBackend for ApiClient {
    async fn predict_price(&self, input: &BaseInput) -> Result<Prediction> {
        ApiClient::predict_price(self, input).await
    }

    async fn feature_curve(&self, request: &CurveRequest) -> Result<CurveResponse> {
        ApiClient::feature_curve(self, request).await
    }
}
