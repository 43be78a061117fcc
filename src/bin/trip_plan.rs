use clap::Parser;
use env_logger::Env;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use trip_planner_api::collector::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use trip_planner_api::collector::{
    render_plan, CollectorError, PlannerClient, RenderOptions, TripPreferences, TripSession,
};
use trip_planner_api::models::trip::{
    Budget, TripPace, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
};

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const WAITING_MESSAGE: &str = "Our AI is crafting your perfect trip... This may take a moment.";
/// Carriage return followed by ANSI "erase entire line".
const CLEAR_LINE: &str = "\r\x1b[2K";

fn spinner_line(frame: usize) -> String {
    format!(
        "\r{} {}",
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()],
        WAITING_MESSAGE
    )
}

/// Smart AI Trip Planner: fill in your travel preferences and let AI create
/// a personalized itinerary for you.
#[derive(Debug, Parser)]
#[command(name = "trip-plan", version)]
struct Cli {
    /// Destination (e.g., Paris, France)
    #[arg(long, short, default_value = "")]
    destination: String,

    /// Duration in days
    #[arg(
        long,
        default_value_t = DEFAULT_DURATION_DAYS,
        value_parser = clap::value_parser!(u32).range(MIN_DURATION_DAYS as i64..=MAX_DURATION_DAYS as i64)
    )]
    duration: u32,

    /// Budget: Economy, Standard or Luxury
    #[arg(long, default_value = "Standard")]
    budget: Budget,

    /// Interests (e.g., art, history, hiking, nightlife)
    #[arg(long, short, default_value = "")]
    interests: String,

    /// Pace: Relaxed, Moderate or Fast-Paced
    #[arg(long, default_value = "Moderate")]
    pace: TripPace,

    /// Planning endpoint
    #[arg(long, env = "TRIP_PLANNER_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seconds to wait for the planner before giving up
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Show only the day titles of the itinerary
    #[arg(long)]
    collapsed: bool,
}

async fn submit_with_spinner(
    session: &mut TripSession,
    client: &PlannerClient,
    preferences: &TripPreferences,
) -> Result<(), CollectorError> {
    let submit = session.submit(client, preferences);
    tokio::pin!(submit);

    let mut ticker = tokio::time::interval(Duration::from_millis(150));
    let mut frame = 0;
    let result = loop {
        tokio::select! {
            result = &mut submit => break result,
            _ = ticker.tick() => {
                eprint!("{}", spinner_line(frame));
                let _ = std::io::stderr().flush();
                frame += 1;
            }
        }
    };
    eprint!("{}", CLEAR_LINE);
    let _ = std::io::stderr().flush();

    result.map(|_| ())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let cli = Cli::parse();

    let preferences = TripPreferences::default()
        .with_destination(cli.destination)
        .with_duration(cli.duration)
        .with_budget(cli.budget)
        .with_interests(cli.interests)
        .with_pace(cli.pace);

    // Validate before building anything so a blank form never touches the network.
    if let Err(err) = preferences.validate() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let client = match PlannerClient::new(cli.endpoint, Duration::from_secs(cli.timeout_secs)) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut session = TripSession::new();
    let outcome = submit_with_spinner(&mut session, &client, &preferences).await;

    if let Err(err) = &outcome {
        eprintln!("{}", err);
        if let Some(raw) = err.raw_body() {
            eprintln!("Backend raw response: {}", raw);
        }
    }

    if let Some(plan) = session.plan() {
        let options = RenderOptions {
            expand_days: !cli.collapsed,
            ..RenderOptions::default()
        };
        print!("{}", render_plan(plan, &options));
    }

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
