//! Integration tests for the leave simulation engine.
//!
//! This test suite covers:
//! - The `/simulate` endpoint (success, determinism, existing leave, errors)
//! - The `/analyze` endpoint (success, unknown categories, bad input)
//! - End-to-end generation and analysis scenarios
//! - Temporal evenness of placed leave

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_sim::analysis::{analyze, monthly_ledger};
use leave_sim::api::{AppState, create_router};
use leave_sim::config::{ConfigLoader, LeaveCategory, SimulationConfig};
use leave_sim::engine::generate;
use leave_sim::models::{GenderRestriction, Horizon, Period, Roster};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn roster_json(female: usize, male: usize) -> Value {
    let people: Vec<Value> = (1..=female)
        .map(|i| json!({"id": format!("F{:03}", i), "gender": "female"}))
        .chain((1..=male).map(|i| json!({"id": format!("M{:03}", i), "gender": "male"})))
        .collect();
    Value::Array(people)
}

fn period(s: &str) -> Period {
    s.parse().unwrap()
}

fn horizon_months(months: u32) -> Horizon {
    let start = period("2025-01");
    Horizon::new(start, start.add_months(months - 1)).unwrap()
}

// =============================================================================
// SECTION 1: /simulate
// =============================================================================

#[tokio::test]
async fn test_simulate_returns_full_response() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/simulate",
        json!({"roster": roster_json(60, 40)}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["simulation_id"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["seed"], 42);
    assert!(!body["assignments"].as_array().unwrap().is_empty());
    assert_eq!(body["allocations"].as_array().unwrap().len(), 4);
    assert_eq!(body["coverage"]["categories"].as_array().unwrap().len(), 4);
    assert!(!body["audit_trace"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_simulate_same_seed_same_assignments() {
    let request = json!({"roster": roster_json(60, 40), "seed": 1234});

    let (_, first) = post_json(create_router_for_test(), "/simulate", request.clone()).await;
    let (_, second) = post_json(create_router_for_test(), "/simulate", request).await;

    assert_eq!(first["seed"], 1234);
    assert_eq!(first["assignments"], second["assignments"]);
    assert_ne!(first["simulation_id"], second["simulation_id"]);
}

#[tokio::test]
async fn test_simulate_female_only_leave_goes_to_women() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/simulate",
        json!({"roster": roster_json(60, 40), "seed": 5}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let maternity: Vec<&Value> = body["assignments"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["category"] == "Maternity Leave")
        .collect();
    assert!(!maternity.is_empty());
    assert!(
        maternity
            .iter()
            .all(|a| a["person_id"].as_str().unwrap().starts_with('F'))
    );
}

#[tokio::test]
async fn test_simulate_respects_existing_leave() {
    let existing = json!([
        {"person_id": "F001", "category": "Maternity Leave", "start": "2025-01", "end": "2027-12"}
    ]);
    let (status, body) = post_json(
        create_router_for_test(),
        "/simulate",
        json!({"roster": roster_json(30, 20), "existing": existing}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let assignments = body["assignments"].as_array().unwrap();
    assert!(assignments.iter().all(|a| a["person_id"] != "F001"));
    assert_eq!(body["audit_trace"][0]["rule_id"], "existing_leave");
}

#[tokio::test]
async fn test_simulate_without_women_returns_400() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/simulate",
        json!({"roster": roster_json(0, 25)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NO_ELIGIBLE_POPULATION");
    assert!(body["message"].as_str().unwrap().contains("Maternity Leave"));
}

#[tokio::test]
async fn test_simulate_duplicate_ids_returns_400() {
    let roster = json!([
        {"id": "P001", "gender": "female"},
        {"id": "P001", "gender": "male"}
    ]);
    let (status, body) =
        post_json(create_router_for_test(), "/simulate", json!({"roster": roster})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ROSTER");
}

#[tokio::test]
async fn test_simulate_unknown_gender_returns_400() {
    let roster = json!([{"id": "P001", "gender": "robot"}]);
    let (status, body) =
        post_json(create_router_for_test(), "/simulate", json!({"roster": roster})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

// =============================================================================
// SECTION 2: /analyze
// =============================================================================

#[tokio::test]
async fn test_analyze_reports_time_weighted_coverage() {
    let assignments = json!([
        {"person_id": "F001", "category": "Maternity Leave", "start": "2025-01", "end": "2025-09"},
        {"person_id": "M001", "category": "Long Term Sick", "start": "2026-02", "end": "2026-02"}
    ]);
    let (status, body) = post_json(
        create_router_for_test(),
        "/analyze",
        json!({"roster": roster_json(6, 4), "assignments": assignments}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["horizon_days"], 1095);

    let categories = body["categories"].as_array().unwrap();
    let maternity = categories
        .iter()
        .find(|c| c["category"] == "Maternity Leave")
        .unwrap();
    assert_eq!(maternity["leave_days"], 273);
    assert_eq!(maternity["crew_days"], 6 * 1095);

    assert_eq!(body["overall"]["leave_days"], 273 + 28);
    assert_eq!(body["ledger"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_unknown_category_returns_422() {
    let assignments = json!([
        {"person_id": "F001", "category": "Sabbatical", "start": "2025-01", "end": "2025-02"}
    ]);
    let (status, body) = post_json(
        create_router_for_test(),
        "/analyze",
        json!({"roster": roster_json(2, 2), "assignments": assignments}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "UNKNOWN_CATEGORY");
}

#[tokio::test]
async fn test_analyze_bad_period_returns_400() {
    let assignments = json!([
        {"person_id": "F001", "category": "Maternity Leave", "start": "2025-13", "end": "2026-02"}
    ]);
    let (status, _) = post_json(
        create_router_for_test(),
        "/analyze",
        json!({"roster": roster_json(2, 2), "assignments": assignments}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// SECTION 3: End-to-end scenarios
// =============================================================================

#[test]
fn test_maternity_scenario_coverage_near_four_percent() {
    let horizon = horizon_months(12);
    let config = SimulationConfig::new(
        horizon,
        vec![LeaveCategory::new("Maternity Leave", 10.0, 3.0).with_gender(GenderRestriction::Female)],
    );
    let roster = Roster::sample(10, 0.6);

    let result = generate(&roster, &config).unwrap();
    assert_eq!(result.assignments.len(), 1);

    let report = analyze(&result.assignments, &config, &horizon, &roster.headcount()).unwrap();
    let maternity = report.get("Maternity Leave").unwrap();
    assert_eq!(maternity.crew_days, 6 * 365);
    assert!(
        (4.0..=4.21).contains(&maternity.actual_percent),
        "coverage was {}",
        maternity.actual_percent
    );
}

#[test]
fn test_default_configuration_end_to_end() {
    let config = ConfigLoader::load("./config/default").unwrap().into_config();
    let roster = Roster::sample(200, 0.6);

    let result = generate(&roster, &config).unwrap();
    let report = analyze(&result.assignments, &config, &config.horizon, &roster.headcount()).unwrap();

    for coverage in &report.categories {
        let back = coverage.actual_percent * coverage.crew_days as f64 / 100.0;
        assert!((back - coverage.leave_days as f64).abs() < 1e-6);
    }
    assert_eq!(report.overall.assignment_count, result.assignments.len());

    let ledger = monthly_ledger(&result.assignments, &config, &config.horizon).unwrap();
    let ledger_months: f64 = ledger.rows.iter().map(|r| r.total()).sum();
    let span_months: u32 = result.assignments.iter().map(|a| a.span_months()).sum();
    assert!((ledger_months - f64::from(span_months)).abs() < 1e-9);
}

#[test]
fn test_under_allocation_keeps_partial_results() {
    let mut config = SimulationConfig::new(
        horizon_months(24),
        vec![LeaveCategory::new("Long Term Sick", 100.0, 13.0).with_max_per_person(3)],
    );
    config.max_assignment_attempts = 1;
    config.duration_variability = 0.0;
    config.evenness_strength = 0.0;

    let result = generate(&Roster::sample(2, 0.5), &config).unwrap();

    assert!(!result.assignments.is_empty());
    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.category, "Long Term Sick");
    assert_eq!(warning.target, 4);
    assert_eq!(warning.placed as usize, result.assignments.len());
    assert!(warning.unfilled >= 2);
}

// =============================================================================
// SECTION 4: Temporal evenness
// =============================================================================

fn monthly_variance(strength: f64, seed: u64) -> f64 {
    let horizon = horizon_months(24);
    let mut config = SimulationConfig::new(
        horizon,
        vec![LeaveCategory::new("Unpaid Leave", 10.0, 1.0)],
    );
    config.duration_variability = 0.0;
    config.evenness_strength = strength;
    config.random_seed = seed;

    let roster = Roster::sample(500, 0.5);
    let result = generate(&roster, &config).unwrap();
    assert!(result.warnings.is_empty());

    let ledger = monthly_ledger(&result.assignments, &config, &horizon).unwrap();
    let loads = &ledger.row("Unpaid Leave").unwrap().person_months;
    let mean = loads.iter().sum::<f64>() / loads.len() as f64;
    loads.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / loads.len() as f64
}

#[test]
fn test_evenness_bias_reduces_monthly_variance() {
    let seeds = 1..=10;
    let unbiased: f64 = seeds.clone().map(|s| monthly_variance(0.0, s)).sum();
    let biased: f64 = seeds.map(|s| monthly_variance(3.0, s)).sum();

    assert!(
        biased <= unbiased,
        "biased variance {} exceeded unbiased {}",
        biased,
        unbiased
    );
}
