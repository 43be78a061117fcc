use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 30;
pub const DEFAULT_DURATION_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Budget {
    Economy,
    #[default]
    Standard,
    Luxury,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Economy => "Economy",
            Budget::Standard => "Standard",
            Budget::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Budget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(Budget::Economy),
            "standard" => Ok(Budget::Standard),
            "luxury" => Ok(Budget::Luxury),
            other => Err(format!(
                "unknown budget '{}', expected one of Economy, Standard, Luxury",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TripPace {
    Relaxed,
    #[default]
    Moderate,
    #[serde(rename = "Fast-Paced")]
    FastPaced,
}

impl TripPace {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripPace::Relaxed => "Relaxed",
            TripPace::Moderate => "Moderate",
            TripPace::FastPaced => "Fast-Paced",
        }
    }
}

impl fmt::Display for TripPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripPace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relaxed" => Ok(TripPace::Relaxed),
            "moderate" => Ok(TripPace::Moderate),
            "fast-paced" | "fast paced" | "fastpaced" => Ok(TripPace::FastPaced),
            other => Err(format!(
                "unknown pace '{}', expected one of Relaxed, Moderate, Fast-Paced",
                other
            )),
        }
    }
}

/// The five preferences a traveler submits for one planning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    pub duration: u32,
    pub budget: Budget,
    pub interests: String,
    pub pace: TripPace,
}

/// One day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// Day number
    pub day: u32,
    /// Planned activities
    pub activities: String,
    /// Food suggestions
    pub food_recommendations: String,
}

/// Structured itinerary returned by `POST /plan_trip`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TripPlan {
    /// Trip destination
    pub destination: String,
    /// Day-wise itinerary
    pub itinerary: Vec<DayPlan>,
    /// Budget breakdown
    pub budget_breakdown: String,
    /// Transport advice
    pub transportation_suggestions: String,
}

/// A plan as seen by the collector. Every field may be absent or carry an
/// unexpected type; such fields come through as `None` and the renderer
/// fills the gaps with placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedPlan {
    #[serde(default, deserialize_with = "lenient::text")]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient::days")]
    pub itinerary: Option<Vec<ReceivedDay>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub budget_breakdown: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub transportation_suggestions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedDay {
    #[serde(default, deserialize_with = "lenient::text")]
    pub day: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub activities: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub food_recommendations: Option<String>,
}

/// Display-oriented deserializers for plans that skipped server-side
/// validation.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::ReceivedDay;

    /// Strings pass through, numbers and booleans are printed, arrays are
    /// joined. Null and objects have no display form.
    fn display_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(display_text).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            Value::Null | Value::Object(_) => None,
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(display_text(Value::deserialize(deserializer)?))
    }

    pub fn days<'de, D>(deserializer: D) -> Result<Option<Vec<ReceivedDay>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(Some(
                items
                    .into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect(),
            )),
            _ => Ok(None),
        }
    }
}

impl From<TripPlan> for ReceivedPlan {
    fn from(plan: TripPlan) -> Self {
        Self {
            destination: Some(plan.destination),
            itinerary: Some(
                plan.itinerary
                    .into_iter()
                    .map(|day| ReceivedDay {
                        day: Some(day.day.to_string()),
                        activities: Some(day.activities),
                        food_recommendations: Some(day.food_recommendations),
                    })
                    .collect(),
            ),
            budget_breakdown: Some(plan.budget_breakdown),
            transportation_suggestions: Some(plan.transportation_suggestions),
        }
    }
}
