use discovery_types::{
    Solution, SolutionTable, Step, SurveyDefinition, TimeSavings, TimeSavingsTable,
};

/// Time-spent buckets and the savings automation brings for each.
pub const BUCKETS: [(&str, TimeSavings); 5] = [
    ("5-10", TimeSavings::new(8, 1280)),
    ("11-20", TimeSavings::new(15, 2400)),
    ("21-30", TimeSavings::new(22, 3520)),
    ("31-40", TimeSavings::new(30, 4800)),
    ("40+", TimeSavings::new(35, 5600)),
];

/// Pain points with the solution recommended for each: `(key, name, description)`.
pub const PAIN_POINTS: [(&str, &str, &str); 8] = [
    (
        "scheduling",
        "Smart Scheduling System",
        "AI-powered appointment booking and dispatch optimization",
    ),
    (
        "customer-service",
        "24/7 AI Customer Support",
        "Automated chat and phone support with smart routing",
    ),
    (
        "invoicing",
        "Automated Billing Suite",
        "Instant invoice generation and payment processing",
    ),
    (
        "lead-management",
        "Lead Conversion Engine",
        "Automatic lead capture, scoring, and nurturing",
    ),
    (
        "inventory",
        "Smart Inventory Tracker",
        "Real-time parts tracking and automatic reordering",
    ),
    (
        "reporting",
        "Business Intelligence Dashboard",
        "Automated reporting and performance analytics",
    ),
    (
        "compliance",
        "Compliance Automation",
        "Automated documentation and regulatory compliance",
    ),
    (
        "quality-control",
        "Quality Assurance System",
        "Automated quality checks and customer feedback",
    ),
];

/// The automation discovery assessment.
pub fn automation_survey() -> SurveyDefinition {
    SurveyDefinition::new(vec![
        Step::new("business-type", "What type of business do you run?")
            .with_description(
                "Help us understand your industry to provide tailored automation solutions",
            )
            .with_option(
                "plumbing",
                "Plumbing Services",
                "Emergency calls, scheduling, invoicing",
            )
            .with_option(
                "hvac",
                "HVAC Services",
                "Maintenance schedules, service calls",
            )
            .with_option(
                "electrical",
                "Electrical Services",
                "Safety protocols, job scheduling",
            )
            .with_option(
                "cleaning",
                "Cleaning Services",
                "Route optimization, quality control",
            )
            .with_option("roofing", "Roofing Services", "Weather tracking, estimates")
            .with_option("landscaping", "Landscaping", "Seasonal planning, maintenance")
            .with_option("other", "Other Service Business", "Custom solutions available"),
        Step::new("team-size", "How many people work in your business?")
            .with_description("Team size helps us recommend the right automation scale")
            .with_option("1-3", "1-3 employees", "Solo or small team operations")
            .with_option("4-10", "4-10 employees", "Growing small business")
            .with_option("11-25", "11-25 employees", "Established local business")
            .with_option("26-50", "26-50 employees", "Medium-sized operation")
            .with_option("50+", "50+ employees", "Large service company"),
        Step::new("pain-points", "What are your biggest operational challenges?")
            .with_description("Select all that apply - we'll prioritize solutions for these areas")
            .multiple()
            .with_option(
                "scheduling",
                "Scheduling & Dispatching",
                "Managing appointments and technician routes",
            )
            .with_option(
                "customer-service",
                "Customer Communication",
                "Handling calls, follow-ups, support",
            )
            .with_option(
                "invoicing",
                "Billing & Invoicing",
                "Payment processing, invoice generation",
            )
            .with_option(
                "lead-management",
                "Lead Management",
                "Capturing and converting prospects",
            )
            .with_option("inventory", "Inventory Tracking", "Parts and supply management")
            .with_option(
                "reporting",
                "Business Analytics",
                "Performance tracking and insights",
            )
            .with_option(
                "compliance",
                "Compliance & Documentation",
                "Regulatory requirements, paperwork",
            )
            .with_option(
                "quality-control",
                "Quality Control",
                "Service standards and reviews",
            ),
        Step::new(
            "time-spent",
            "How much time does your team spend on admin tasks weekly?",
        )
        .with_description("This helps us calculate potential time savings from automation")
        .with_option("5-10", "5-10 hours", "Light administrative work")
        .with_option("11-20", "11-20 hours", "Moderate admin overhead")
        .with_option("21-30", "21-30 hours", "Significant time investment")
        .with_option("31-40", "31-40 hours", "Heavy administrative burden")
        .with_option("40+", "40+ hours", "Administrative tasks dominate"),
        Step::new(
            "budget",
            "What would you invest monthly for automation that saves 20+ hours?",
        )
        .with_description("Understanding your budget helps us recommend the right solution tier")
        .with_option("200-500", "$200-$500/month", "Essential automation tools")
        .with_option("500-1000", "$500-$1,000/month", "Comprehensive automation suite")
        .with_option(
            "1000-2000",
            "$1,000-$2,000/month",
            "Advanced AI-powered solutions",
        )
        .with_option("2000+", "$2,000+/month", "Enterprise-level automation")
        .with_option("unsure", "I'm not sure yet", "Let's discuss ROI first"),
    ])
    .with_prelude(
        "Take our 2-minute assessment to get personalized automation recommendations.",
    )
    .with_epilogue("Here's your personalized automation roadmap based on your responses.")
}

/// Savings per time-spent bucket.
pub fn time_savings_table() -> TimeSavingsTable {
    BUCKETS
        .into_iter()
        .fold(TimeSavingsTable::new(), |table, (bucket, savings)| {
            table.with_entry(bucket, savings)
        })
}

/// Solution per pain point.
pub fn solution_table() -> SolutionTable {
    PAIN_POINTS
        .into_iter()
        .fold(SolutionTable::new(), |table, (key, name, description)| {
            table.with_entry(key, Solution::new(name, description))
        })
}
