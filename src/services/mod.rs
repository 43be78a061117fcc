pub mod openai_service;
pub mod plan_parser;
pub mod prompt_service;
pub mod trip_planner_service;
