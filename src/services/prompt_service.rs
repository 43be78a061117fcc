use schemars::schema_for;
use serde_json::Value;

use crate::models::trip::{TripPlan, TripRequest};

/// Prompt sent upstream for every generated plan. The format instructions
/// are derived from the `TripPlan` schema once, at construction.
#[derive(Debug, Clone)]
pub struct PlanPrompt {
    format_instructions: String,
}

impl PlanPrompt {
    pub fn new() -> Result<Self, serde_json::Error> {
        let mut schema = serde_json::to_value(schema_for!(TripPlan))?;
        if let Value::Object(map) = &mut schema {
            map.remove("$schema");
            map.remove("title");
        }
        let schema = serde_json::to_string(&schema)?;

        let format_instructions = format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\
             Return only the JSON object, without any surrounding commentary.\n\
             \n\
             Here is the output schema:\n\
             ```\n\
             {}\n\
             ```",
            schema
        );

        Ok(Self {
            format_instructions,
        })
    }

    pub fn format_instructions(&self) -> &str {
        &self.format_instructions
    }

    pub fn render(&self, request: &TripRequest) -> String {
        format!(
            "You are a professional AI travel planner.\n\
             Plan a {duration}-day trip to {destination} for a person with interests in {interests},\n\
             budget level: {budget}, and preferred pace: {pace}.\n\
             \n\
             Provide:\n\
             - Day-wise activities\n\
             - Food suggestions\n\
             - Budget breakdown\n\
             - Transportation tips\n\
             \n\
             {format_instructions}\n",
            duration = request.duration,
            destination = request.destination,
            interests = request.interests,
            budget = request.budget,
            pace = request.pace,
            format_instructions = self.format_instructions,
        )
    }
}
