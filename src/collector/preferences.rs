use crate::collector::CollectorError;
use crate::models::trip::{
    Budget, TripPace, TripRequest, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
};

pub const MISSING_INPUT_MESSAGE: &str = "Please fill in the Destination and Interests fields.";

/// The preference form, pre-filled with its defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPreferences {
    pub destination: String,
    pub duration: u32,
    pub budget: Budget,
    pub interests: String,
    pub pace: TripPace,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            destination: String::new(),
            duration: DEFAULT_DURATION_DAYS,
            budget: Budget::default(),
            interests: String::new(),
            pace: TripPace::default(),
        }
    }
}

impl TripPreferences {
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    pub fn with_pace(mut self, pace: TripPace) -> Self {
        self.pace = pace;
        self
    }

    pub fn validate(&self) -> Result<TripRequest, CollectorError> {
        let destination = self.destination.trim();
        let interests = self.interests.trim();
        if destination.is_empty() || interests.is_empty() {
            return Err(CollectorError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }

        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration) {
            return Err(CollectorError::Validation(format!(
                "Duration must be between {} and {} days.",
                MIN_DURATION_DAYS, MAX_DURATION_DAYS
            )));
        }

        Ok(TripRequest {
            destination: destination.to_string(),
            duration: self.duration,
            budget: self.budget,
            interests: interests.to_string(),
            pace: self.pace,
        })
    }
}
