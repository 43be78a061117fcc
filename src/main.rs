use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_planner_api::config::AppConfig;
use trip_planner_api::routes;
use trip_planner_api::services::trip_planner_service::TripPlanner;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let planner = match TripPlanner::from_config(&config) {
        Ok(planner) => planner,
        Err(e) => {
            log::error!("Planner init error: {}", e);
            std::process::exit(1);
        }
    };
    match planner.model_id() {
        Some(model) => log::info!("Generation mode active, model: {}", model),
        None => log::info!("Dummy mode active, serving the canned plan"),
    }

    let planner = web::Data::new(planner);

    log::info!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(planner.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
