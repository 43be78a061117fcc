use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::config::PlannerMode;
use crate::services::trip_planner_service::TripPlanner;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    mode: PlannerMode,
    model: Option<String>,
    version: String,
}

pub async fn health_check(planner: web::Data<TripPlanner>) -> impl Responder {
    let health = HealthStatus {
        status: "ok".to_string(),
        mode: planner.mode(),
        model: planner.model_id().map(str::to_string),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(health)
}
