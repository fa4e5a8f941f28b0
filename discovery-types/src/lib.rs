//! Core types for the discovery crate.
//!
//! This crate provides the foundational types for defining surveys:
//! - `SurveyDefinition` - The ordered catalog of steps
//! - `Step`, `StepOption` and `SelectionMode` - Individual question screens
//! - `Responses`, `ResponseValue` and `StepId` - Collected answers keyed by step
//! - `TimeSavingsTable` and `SolutionTable` - Static lookup tables for recommendations

mod step_id;
pub use step_id::StepId;

mod response_value;
pub use response_value::ResponseValue;

mod responses;
pub use responses::Responses;

mod step;
pub use step::{SelectionMode, Step, StepOption};

mod survey_definition;
pub use survey_definition::SurveyDefinition;

mod tables;
pub use tables::{Solution, SolutionTable, TimeSavings, TimeSavingsTable};

mod error;
pub use error::SurveyError;
