use regex::Regex;
use std::sync::LazyLock;

use crate::models::trip::TripPlan;
use crate::services::trip_planner_service::PlannerError;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("fence pattern is valid")
});

/// Pulls the JSON object out of a model reply. Models like to wrap it in
/// markdown fences or surround it with prose. The first fenced block that
/// holds a `{` wins; otherwise the whole reply is searched.
fn extract_json_object(text: &str) -> Option<&str> {
    let body = FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|block| block.contains('{'))
        .unwrap_or(text);

    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (start < end).then(|| &body[start..=end])
}

/// Coerces a free-form model reply into a `TripPlan`. Field types are
/// checked strictly: `day` must be an integer, the rest must be strings.
pub fn parse_trip_plan(text: &str) -> Result<TripPlan, PlannerError> {
    let json = extract_json_object(text).ok_or_else(|| {
        PlannerError::PlanParse("no JSON object found in model output".to_string())
    })?;

    serde_json::from_str(json).map_err(|e| PlannerError::PlanParse(e.to_string()))
}
