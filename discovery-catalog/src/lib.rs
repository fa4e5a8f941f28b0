//! Reference catalogs for the discovery engine.
//!
//! [`automation`] is the five-step assessment that matches service businesses
//! with automation solutions.

pub mod automation;

pub use automation::{
    BUCKETS, PAIN_POINTS, automation_survey, solution_table, time_savings_table,
};
