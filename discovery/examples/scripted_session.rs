//! Runs the automation assessment against a scripted visitor on the Tokio
//! runtime and prints the resulting roadmap.
//!
//! ```sh
//! RUST_LOG=discovery=debug cargo run --example scripted_session
//! ```

use std::time::Duration;

use discovery::recommend::{
    BUDGET_STEP, BUSINESS_TYPE_STEP, PAIN_POINTS_STEP, TEAM_SIZE_STEP, TIME_SPENT_STEP,
};
use discovery::{RecommendationEngine, Session, SurveyConfig, SurveyEvent};
use discovery_catalog::{automation_survey, solution_table, time_savings_table};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SurveyConfig::new().with_auto_advance_delay(Duration::from_millis(200));
    let mut session = Session::start(automation_survey(), config)?;
    let (sender, mut events) = mpsc::channel(16);

    let visitor = tokio::spawn(async move {
        let script = [
            SurveyEvent::select(BUSINESS_TYPE_STEP, "hvac"),
            SurveyEvent::select(TEAM_SIZE_STEP, "11-25"),
            SurveyEvent::select(PAIN_POINTS_STEP, "scheduling"),
            SurveyEvent::select(PAIN_POINTS_STEP, "customer-service"),
            SurveyEvent::select(PAIN_POINTS_STEP, "reporting"),
            SurveyEvent::Next,
            SurveyEvent::select(TIME_SPENT_STEP, "31-40"),
            SurveyEvent::select(BUDGET_STEP, "1000-2000"),
        ];
        for event in script {
            tokio::time::sleep(Duration::from_millis(400)).await;
            if sender.send(event).await.is_err() {
                break;
            }
        }
    });

    let responses = session.run(&mut events).await?;
    visitor.await?;

    let controller = session.controller();
    let engine = RecommendationEngine::new(time_savings_table(), solution_table());
    let recommendation = engine.derive(&responses);

    if let Some(epilogue) = &controller.definition().epilogue {
        println!("{epilogue}");
    }
    if let Some(label) = recommendation.business_label(controller.definition()) {
        println!("Business: {label}");
    }
    println!(
        "Time saved: {} hours/week, savings ${}/month",
        recommendation.time_saved_hours, recommendation.monthly_savings
    );
    println!(
        "Investment ${}/month, ROI {}%",
        recommendation.investment_amount, recommendation.roi_percent
    );
    for solution in &recommendation.recommended_solutions {
        println!("- {}: {}", solution.name, solution.description);
    }
    println!("Completed in {}", controller.state().timer().formatted());

    Ok(())
}
