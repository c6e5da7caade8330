//! Client for the remote analysis service.
//!
//! Wire types mirror the service's JSON. `AnalysisService` is the seam the
//! review flow talks to; `HttpAnalysisService` is the browser implementation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::language::LanguageSelection;

// -- Requests --

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub code: String,
    pub language: LanguageSelection,
}

// -- Responses --

/// Envelope returned by `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens: Option<u64>,
    #[serde(default)]
    pub data: Option<AnalysisPayload>,
}

/// A successful analysis, envelope checked.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSuccess {
    pub model: Option<String>,
    pub tokens: u64,
    pub data: AnalysisPayload,
}

impl AnalyzeResponse {
    /// Turn the envelope into a success or the service's own error.
    pub fn into_success(self) -> Result<AnalysisSuccess, ClientError> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Unknown analysis error".to_string());
            return Err(ClientError::Service(message));
        }

        let data = self
            .data
            .ok_or_else(|| ClientError::Malformed("response has no data".to_string()))?;

        Ok(AnalysisSuccess {
            model: self.model.filter(|m| !m.is_empty()),
            tokens: self.tokens.unwrap_or(0),
            data,
        })
    }
}

/// The report payload inside a successful response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Metrics,
    #[serde(default)]
    pub explanation_html: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_issues: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<IssuePayload>,
    #[serde(default)]
    pub optimized_code: Option<String>,
}

/// The service sends `null` for sections it skipped; treat that like absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free-form metric fields. Values are display strings in practice, but any
/// JSON scalar is accepted.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default)]
    pub complexity_reduction: Option<Value>,
    #[serde(default)]
    pub memory_impact: Option<Value>,
    #[serde(default)]
    pub estimated_speedup: Option<Value>,
    #[serde(default)]
    pub energy_savings: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayload {
    #[serde(default)]
    pub severity: String,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub original_code: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct HealthInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_status: String,
}

impl HealthInfo {
    pub fn is_configured(&self) -> bool {
        self.api_status == "configured"
    }
}

/// Body of `GET /config`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u64>,
    #[serde(default)]
    pub api_configured: bool,
    #[serde(default)]
    pub supported_languages: Vec<String>,
}

// -- Service seam --

/// The remote analysis service.
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ClientError>;

    async fn health(&self) -> Result<HealthInfo, ClientError>;

    async fn config(&self) -> Result<ServiceConfig, ClientError>;
}

/// `AnalysisService` over HTTP. No timeout and no retry: failures surface to
/// the user, who may resubmit.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            warn!("Service returned HTTP {}", status.as_u16());
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            let truncated: String = body.chars().take(200).collect();
            warn!("Failed to parse service response: {} (body: {})", e, truncated);
            ClientError::Malformed(e.to_string())
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::read_json(response).await
    }
}

impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ClientError> {
        let url = self.url("/analyze");
        info!(
            "Submitting {} chars for analysis as '{}'",
            request.code.chars().count(),
            request.language.as_str()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Self::read_json(response).await
    }

    async fn health(&self) -> Result<HealthInfo, ClientError> {
        self.get("/health").await
    }

    async fn config(&self) -> Result<ServiceConfig, ClientError> {
        self.get("/config").await
    }
}
