use std::time::Duration;

use discovery_types::TimeSavings;

/// Delay between a single-select choice and the automatic step change.
pub const DEFAULT_AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Number of solutions a recommendation lists at most.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 3;

/// Monthly investment assumed when the budget answer is missing or unusable.
pub const DEFAULT_INVESTMENT: u64 = 500;

/// Savings assumed when the time-spent answer is missing or unknown.
pub const FALLBACK_SAVINGS: TimeSavings = TimeSavings::new(20, 3200);

/// Tunables for a survey session and its recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyConfig {
    pub auto_advance_delay: Duration,
    pub max_recommendations: usize,
    pub default_investment: u64,
    pub fallback_savings: TimeSavings,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyConfig {
    pub fn new() -> Self {
        Self {
            auto_advance_delay: DEFAULT_AUTO_ADVANCE_DELAY,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            default_investment: DEFAULT_INVESTMENT,
            fallback_savings: FALLBACK_SAVINGS,
        }
    }

    /// Set the delay before a single-select choice advances the survey.
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    /// Set how many solutions a recommendation lists at most.
    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max;
        self
    }

    /// Set the fallback investment. Zero is ignored, the fallback must stay positive.
    pub fn with_default_investment(mut self, amount: u64) -> Self {
        if amount > 0 {
            self.default_investment = amount;
        }
        self
    }

    /// Set the savings used for unknown time-spent buckets.
    pub fn with_fallback_savings(mut self, savings: TimeSavings) -> Self {
        self.fallback_savings = savings;
        self
    }
}
