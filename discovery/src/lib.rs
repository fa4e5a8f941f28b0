//! # discovery
//!
//! Survey navigation and recommendation engine for short multiple-choice
//! questionnaires. Presentation-agnostic.
//!
//! A visitor answers a fixed sequence of steps. Single-select steps move on by
//! themselves shortly after a choice; multi-select steps toggle options and
//! move on with "Next". Once the last step is done, the responses are turned
//! into a [`Recommendation`]: time and cost savings, ROI and a ranked list of
//! suggested solutions.
//!
//! ## Usage
//!
//! ```rust
//! use discovery::{
//!     ImmediateScheduler, RecommendationEngine, Solution, SolutionTable, Step,
//!     SurveyController, SurveyDefinition, TimeSavings, TimeSavingsTable,
//! };
//!
//! let definition = SurveyDefinition::new(vec![
//!     Step::new("time-spent", "How much time goes into admin weekly?")
//!         .with_option("21-30", "21-30 hours", "Significant time investment"),
//!     Step::new("pain-points", "What are your biggest operational challenges?")
//!         .multiple()
//!         .with_option("scheduling", "Scheduling & Dispatching", "")
//!         .with_option("invoicing", "Billing & Invoicing", ""),
//! ]);
//!
//! let mut survey = SurveyController::new(definition, ImmediateScheduler).unwrap();
//! survey.select_option("time-spent", "21-30");
//! survey.select_option("pain-points", "invoicing");
//! survey.go_next();
//! assert!(survey.is_completed());
//!
//! let engine = RecommendationEngine::new(
//!     TimeSavingsTable::new().with_entry("21-30", TimeSavings::new(22, 3520)),
//!     SolutionTable::new().with_entry(
//!         "invoicing",
//!         Solution::new("Automated Billing Suite", "Instant invoice generation"),
//!     ),
//! );
//! let recommendation = survey.recommendation(&engine).unwrap();
//! assert_eq!(recommendation.time_saved_hours, 22);
//! assert_eq!(recommendation.roi_percent, 604);
//! ```
//!
//! ## Scheduling
//!
//! The automatic step change after a single-select choice goes through a
//! [`Scheduler`]:
//! - [`ImmediateScheduler`] - advance right away
//! - [`ManualScheduler`] - virtual clock for tests
//! - [`TokioScheduler`] - real delay on the Tokio timer, used by [`Session`]

// Re-export all types from discovery-types
pub use discovery_types::*;

mod config;
pub use config::{
    DEFAULT_AUTO_ADVANCE_DELAY, DEFAULT_INVESTMENT, DEFAULT_MAX_RECOMMENDATIONS,
    FALLBACK_SAVINGS, SurveyConfig,
};

mod timer;
pub use timer::{ElapsedTimer, TimerGuard, format_elapsed};

mod scheduler;
pub use scheduler::{
    ImmediateScheduler, ManualScheduler, PendingAdvance, Scheduled, Scheduler, TokioScheduler,
};

mod state;
pub use state::SurveyState;

mod event;
pub use event::SurveyEvent;

mod controller;
pub use controller::{INSIGHTS_MIN_ANSWERED, Insights, SurveyController};

pub mod recommend;
pub use recommend::{Recommendation, RecommendationEngine, derive_result};

mod backend;
pub use backend::{ScriptedBackend, ScriptedBackendError, SurveyBackend};

mod session;
pub use session::Session;
