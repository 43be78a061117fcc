use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::config::{AppConfig, ConfigError, PlannerMode};
use crate::models::trip::{
    Budget, DayPlan, TripPace, TripPlan, TripRequest, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
};
use crate::services::openai_service::{OpenAiChatModel, TextGenerator};
use crate::services::plan_parser::parse_trip_plan;
use crate::services::prompt_service::PlanPrompt;

/// Checked in this order; the first missing key is the one reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["destination", "duration", "budget", "interests", "pace"];

#[derive(Debug)]
pub enum PlannerError {
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
    InvalidBody(String),
    Upstream(String),
    PlanParse(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::MissingField(field) => write!(f, "Missing required field: {}", field),
            PlannerError::InvalidField { field, .. } => {
                write!(f, "Invalid value for field: {}", field)
            }
            PlannerError::InvalidBody(_) => write!(f, "Invalid JSON body"),
            PlannerError::Upstream(msg) => write!(f, "Model request failed: {}", msg),
            PlannerError::PlanParse(msg) => write!(f, "Failed to parse model output: {}", msg),
        }
    }
}

impl Error for PlannerError {}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Upstream(err.to_string())
    }
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::MissingField(_)
            | PlannerError::InvalidField { .. }
            | PlannerError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            PlannerError::Upstream(_) | PlannerError::PlanParse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            PlannerError::MissingField(_) => json!({ "error": self.to_string() }),
            PlannerError::InvalidField { reason, .. } => json!({
                "error": self.to_string(),
                "details": reason,
            }),
            PlannerError::InvalidBody(msg) => json!({
                "error": self.to_string(),
                "details": msg,
            }),
            PlannerError::Upstream(_) | PlannerError::PlanParse(_) => json!({
                "error": "Internal server error",
                "details": self.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Mirrors the truthiness a JSON form field needs to count as filled in:
/// null, false, zero, and empty strings/arrays/objects are all missing.
fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

fn text_field(fields: &Map<String, Value>, field: &'static str) -> Result<String, PlannerError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PlannerError::InvalidField {
            field,
            reason: format!("{} must be a string", field),
        })
}

/// Accepts a JSON integer or a string holding one, such as `"5"`.
fn duration_field(fields: &Map<String, Value>) -> Result<u32, PlannerError> {
    fields
        .get("duration")
        .and_then(|value| {
            value
                .as_u64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .and_then(|days| u32::try_from(days).ok())
        .filter(|days| (MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(days))
        .ok_or_else(|| PlannerError::InvalidField {
            field: "duration",
            reason: format!(
                "duration must be a whole number of days between {} and {}",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS
            ),
        })
}

fn choice_field<T>(fields: &Map<String, Value>, field: &'static str) -> Result<T, PlannerError>
where
    T: std::str::FromStr<Err = String>,
{
    let raw = text_field(fields, field)?;
    raw.parse()
        .map_err(|reason| PlannerError::InvalidField { field, reason })
}

/// Validates a raw `POST /plan_trip` body. Presence of every required key
/// is checked first, in `REQUIRED_FIELDS` order; only then are the values
/// converted to their typed form.
pub fn validate_trip_request(body: &Value) -> Result<TripRequest, PlannerError> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    for field in REQUIRED_FIELDS {
        if !is_filled(fields.get(field)) {
            return Err(PlannerError::MissingField(field));
        }
    }

    Ok(TripRequest {
        destination: text_field(fields, "destination")?,
        duration: duration_field(fields)?,
        budget: choice_field::<Budget>(fields, "budget")?,
        interests: text_field(fields, "interests")?,
        pace: choice_field::<TripPace>(fields, "pace")?,
    })
}

/// The plan served in fixed-response mode, whatever the request says.
pub fn canned_plan() -> TripPlan {
    TripPlan {
        destination: "Goa, India".to_string(),
        itinerary: vec![
            DayPlan {
                day: 1,
                activities: "Beach relaxation and sunset at Baga".to_string(),
                food_recommendations: "Try local seafood thali".to_string(),
            },
            DayPlan {
                day: 2,
                activities: "Visit Aguada Fort, Cruise at Mandovi".to_string(),
                food_recommendations: "Eat at Fisherman's Wharf".to_string(),
            },
        ],
        budget_breakdown: "Accommodation: ₹5000, Food: ₹2000, Activities: ₹1500".to_string(),
        transportation_suggestions: "Use local buses and rent scooters.".to_string(),
    }
}

/// Shared, read-only planning state built once at startup.
#[derive(Clone)]
pub enum TripPlanner {
    Fixed,
    Generating {
        prompt: PlanPrompt,
        model: Arc<dyn TextGenerator>,
    },
}

impl TripPlanner {
    pub fn fixed() -> Self {
        TripPlanner::Fixed
    }

    pub fn generating(prompt: PlanPrompt, model: Arc<dyn TextGenerator>) -> Self {
        TripPlanner::Generating { prompt, model }
    }

    /// Fixed mode needs no credentials; generation mode fails here if the
    /// model client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match config.mode {
            PlannerMode::Fixed => Ok(Self::fixed()),
            PlannerMode::Generation => {
                let model = OpenAiChatModel::from_config(&config.openai)?;
                let prompt = PlanPrompt::new().map_err(|e| ConfigError::Client(e.to_string()))?;
                Ok(Self::generating(prompt, Arc::new(model)))
            }
        }
    }

    pub fn mode(&self) -> PlannerMode {
        match self {
            TripPlanner::Fixed => PlannerMode::Fixed,
            TripPlanner::Generating { .. } => PlannerMode::Generation,
        }
    }

    pub fn model_id(&self) -> Option<&str> {
        match self {
            TripPlanner::Fixed => None,
            TripPlanner::Generating { model, .. } => Some(model.model_id()),
        }
    }

    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, PlannerError> {
        match self {
            TripPlanner::Fixed => {
                log::info!("Dummy mode active, returning canned plan");
                Ok(canned_plan())
            }
            TripPlanner::Generating { prompt, model } => {
                let text = prompt.render(request);
                log::debug!("Sending prompt to {}", model.model_id());

                let reply = model.generate(&text).await?;
                let plan = parse_trip_plan(&reply)?;

                log::info!(
                    "LLM response ready: {} day(s) for {}",
                    plan.itinerary.len(),
                    plan.destination
                );
                Ok(plan)
            }
        }
    }
}
