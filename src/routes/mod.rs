use actix_web::web;

pub mod health;
pub mod plan_trip;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/plan_trip", web::post().to(plan_trip::plan_trip));
}
