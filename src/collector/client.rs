use reqwest::Client;
use std::env;
use std::time::Duration;

use crate::collector::CollectorError;
use crate::models::trip::{ReceivedPlan, TripRequest};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/plan_trip";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the planning endpoint.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    http: Client,
    endpoint: String,
}

impl PlannerClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CollectorError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Uses `TRIP_PLANNER_URL` when set.
    pub fn from_env() -> Result<Self, CollectorError> {
        let endpoint = env::var("TRIP_PLANNER_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one request and waits for the full reply. No retries.
    pub async fn request_plan(&self, request: &TripRequest) -> Result<ReceivedPlan, CollectorError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;

        let parsed: Result<ReceivedPlan, _> = serde_json::from_str(&body);
        parsed.map_err(|e| CollectorError::Unexpected {
            message: e.to_string(),
            raw_body: (!body.is_empty()).then_some(body),
        })
    }
}
