#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use trip_planner_api::routes;
use trip_planner_api::services::openai_service::TextGenerator;
use trip_planner_api::services::prompt_service::PlanPrompt;
use trip_planner_api::services::trip_planner_service::{PlannerError, TripPlanner};

pub struct TestApp {
    pub planner: web::Data<TripPlanner>,
}

impl TestApp {
    pub fn fixed() -> Self {
        Self {
            planner: web::Data::new(TripPlanner::fixed()),
        }
    }

    pub fn generating(model: Arc<dyn TextGenerator>) -> Self {
        let prompt = PlanPrompt::new().expect("prompt schema");
        Self {
            planner: web::Data::new(TripPlanner::generating(prompt, model)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.planner.clone())
            .configure(routes::configure)
    }
}

/// Model stand-in that replays a fixed reply and records every prompt.
pub struct StubModel {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubModel {
    async fn generate(&self, prompt: &str) -> Result<String, PlannerError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(PlannerError::Upstream)
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

pub fn goa_request() -> Value {
    json!({
        "destination": "Goa, India",
        "duration": 2,
        "budget": "Economy",
        "interests": "beaches",
        "pace": "Relaxed"
    })
}

pub fn canned_goa_plan() -> Value {
    json!({
        "destination": "Goa, India",
        "budget_breakdown": "Accommodation: ₹5000, Food: ₹2000, Activities: ₹1500",
        "transportation_suggestions": "Use local buses and rent scooters.",
        "itinerary": [
            {
                "day": 1,
                "activities": "Beach relaxation and sunset at Baga",
                "food_recommendations": "Try local seafood thali"
            },
            {
                "day": 2,
                "activities": "Visit Aguada Fort, Cruise at Mandovi",
                "food_recommendations": "Eat at Fisherman's Wharf"
            }
        ]
    })
}

pub fn lisbon_plan() -> Value {
    json!({
        "destination": "Lisbon, Portugal",
        "itinerary": [
            {
                "day": 1,
                "activities": "Tram 28 through Alfama, Sao Jorge Castle",
                "food_recommendations": "Pasteis de nata in Belem"
            },
            {
                "day": 2,
                "activities": "Day trip to Sintra",
                "food_recommendations": "Travesseiros at Piriquita"
            },
            {
                "day": 3,
                "activities": "LX Factory and the riverside",
                "food_recommendations": "Grilled sardines"
            }
        ],
        "budget_breakdown": "Lodging: 240 EUR, Food: 120 EUR, Transit: 30 EUR",
        "transportation_suggestions": "Buy a Viva Viagem card for trams and trains."
    })
}
