use crate::collector::{CollectorError, PlannerClient, TripPreferences};
use crate::models::trip::ReceivedPlan;

/// Holds the most recently received plan. A new plan replaces the old one
/// only when the request fully succeeds.
#[derive(Debug, Default)]
pub struct TripSession {
    plan: Option<ReceivedPlan>,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&ReceivedPlan> {
        self.plan.as_ref()
    }

    pub async fn submit(
        &mut self,
        client: &PlannerClient,
        preferences: &TripPreferences,
    ) -> Result<&ReceivedPlan, CollectorError> {
        let request = preferences.validate()?;

        log::info!(
            "Requesting a {}-day plan for {} from {}",
            request.duration,
            request.destination,
            client.endpoint()
        );
        let plan = client.request_plan(&request).await?;

        Ok(&*self.plan.insert(plan))
    }
}
