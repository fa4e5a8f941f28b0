//! Derivation of the recommendation shown after a completed survey.
//!
//! [`derive_result`] is a pure function of the responses and two static lookup
//! tables. It never fails: missing or unrecognized answers fall back to fixed
//! defaults.

use discovery_types::{
    Responses, Solution, SolutionTable, SurveyDefinition, TimeSavings, TimeSavingsTable,
};
use serde::Serialize;
use tracing::debug;

use crate::SurveyConfig;

/// Step holding the kind of business, passed through unchanged.
pub const BUSINESS_TYPE_STEP: &str = "business-type";

/// Step holding the team size bucket, passed through unchanged.
pub const TEAM_SIZE_STEP: &str = "team-size";

/// Multi-select step whose choices map to solutions.
pub const PAIN_POINTS_STEP: &str = "pain-points";

/// Step whose bucket selects the time savings.
pub const TIME_SPENT_STEP: &str = "time-spent";

/// Step holding the monthly budget range, e.g. `"500-1000"`.
pub const BUDGET_STEP: &str = "budget";

/// Summary derived from a completed response set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Estimated hours saved per week.
    pub time_saved_hours: u32,

    /// Estimated savings per month, in dollars.
    pub monthly_savings: u32,

    /// Monthly investment the ROI is computed against.
    pub investment_amount: u64,

    /// `round((monthly_savings - investment_amount) / investment_amount * 100)`.
    pub roi_percent: i64,

    /// Solutions for the selected pain points, in selection order.
    pub recommended_solutions: Vec<Solution>,

    pub business_type: Option<String>,

    pub team_size: Option<String>,
}

impl Recommendation {
    /// Display label of the business type, e.g. `"Plumbing Services"`.
    pub fn business_label<'a>(&'a self, definition: &'a SurveyDefinition) -> Option<&'a str> {
        let business_type = self.business_type.as_deref()?;
        definition.option_label(BUSINESS_TYPE_STEP, business_type)
    }
}

/// Derives recommendations from a fixed pair of lookup tables.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    time_savings: TimeSavingsTable,
    solutions: SolutionTable,
    config: SurveyConfig,
}

impl RecommendationEngine {
    pub fn new(time_savings: TimeSavingsTable, solutions: SolutionTable) -> Self {
        Self {
            time_savings,
            solutions,
            config: SurveyConfig::default(),
        }
    }

    /// Use custom fallbacks and solution count.
    pub fn with_config(mut self, config: SurveyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn time_savings(&self) -> &TimeSavingsTable {
        &self.time_savings
    }

    pub fn solutions(&self) -> &SolutionTable {
        &self.solutions
    }

    pub fn derive(&self, responses: &Responses) -> Recommendation {
        derive_with_config(responses, &self.time_savings, &self.solutions, &self.config)
    }
}

/// Derive a recommendation with the default configuration.
pub fn derive_result(
    responses: &Responses,
    time_savings: &TimeSavingsTable,
    solutions: &SolutionTable,
) -> Recommendation {
    derive_with_config(responses, time_savings, solutions, &SurveyConfig::default())
}

fn derive_with_config(
    responses: &Responses,
    time_savings: &TimeSavingsTable,
    solutions: &SolutionTable,
    config: &SurveyConfig,
) -> Recommendation {
    let bucket = responses.single(TIME_SPENT_STEP);
    let TimeSavings { hours, savings } = match bucket.and_then(|b| time_savings.get(b)) {
        Some(found) => found,
        None => {
            debug!(?bucket, "no time savings for bucket, using fallback");
            config.fallback_savings
        }
    };

    let recommended_solutions = responses
        .multiple(PAIN_POINTS_STEP)
        .iter()
        .filter_map(|pain_point| solutions.get(pain_point))
        .take(config.max_recommendations)
        .cloned()
        .collect();

    let budget = responses.single(BUDGET_STEP);
    let investment_amount = match parse_investment(budget) {
        Some(amount) => amount,
        None => {
            debug!(?budget, "unusable budget, using default investment");
            config.default_investment
        }
    };

    Recommendation {
        time_saved_hours: hours,
        monthly_savings: savings,
        investment_amount,
        roi_percent: roi_percent(savings, investment_amount),
        recommended_solutions,
        business_type: responses.single(BUSINESS_TYPE_STEP).map(String::from),
        team_size: responses.single(TEAM_SIZE_STEP).map(String::from),
    }
}

/// Lower bound of a budget range such as `"$1,000-$2,000"` or `"2000+"`.
///
/// Takes the part before the first `-`, drops a leading `$` and thousands
/// separators, and reads the leading digits. Amounts beyond `u64` saturate.
/// `None` if there are no digits or the amount is zero.
pub fn parse_investment(budget: Option<&str>) -> Option<u64> {
    let lower = budget?.split('-').next()?.trim();
    let lower = lower.strip_prefix('$').unwrap_or(lower);

    let digits: String = lower
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }

    // Only all-digit input reaches here, so parsing can only fail on overflow.
    let amount = digits.parse::<u64>().unwrap_or(u64::MAX);
    (amount > 0).then_some(amount)
}

/// Return on investment in whole percent, halves rounded up.
///
/// `investment` must be positive.
pub fn roi_percent(monthly_savings: u32, investment: u64) -> i64 {
    let gain = i128::from(monthly_savings) - i128::from(investment);
    let ratio = (gain * 100) as f64 / investment as f64;
    (ratio + 0.5).floor() as i64
}
