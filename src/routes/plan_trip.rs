use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::services::trip_planner_service::{validate_trip_request, PlannerError, TripPlanner};

/*
    /plan_trip
*/
pub async fn plan_trip(
    planner: web::Data<TripPlanner>,
    body: web::Bytes,
) -> Result<HttpResponse, PlannerError> {
    log::info!("/plan_trip called");

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("Rejected malformed body: {}", e);
        PlannerError::InvalidBody(e.to_string())
    })?;
    log::debug!("Received: {}", payload);

    let request = validate_trip_request(&payload).map_err(|e| {
        log::warn!("Rejected request: {}", e);
        e
    })?;

    match planner.plan_trip(&request).await {
        Ok(plan) => Ok(HttpResponse::Ok().json(plan)),
        Err(err) => {
            log::error!("Internal error: {}", err);
            Err(err)
        }
    }
}
