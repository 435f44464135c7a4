//! End-to-end tests: canned archive payloads through source, engine and summary

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gradtage::{
    DegreeDayEngine, GradtageError, JsonFetcher, Location, OpenMeteoArchive, RecordingDiagnostics,
    Result,
};
use serde_json::{Value, json};

/// Answers archive requests from a table keyed by the `latitude` query value
#[derive(Default)]
struct ArchiveStub {
    responses: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl ArchiveStub {
    fn respond(mut self, latitude: &str, daily_means: Value) -> Self {
        self.responses.insert(
            latitude.to_string(),
            json!({
                "latitude": latitude,
                "timezone": "Europe/Berlin",
                "daily_units": { "time": "iso8601", "temperature_2m_mean": "°C" },
                "daily": { "time": [], "temperature_2m_mean": daily_means }
            }),
        );
        self
    }

    fn respond_raw(mut self, latitude: &str, payload: Value) -> Self {
        self.responses.insert(latitude.to_string(), payload);
        self
    }
}

#[async_trait]
impl JsonFetcher for ArchiveStub {
    async fn get_json(
        &self,
        _endpoint: &str,
        query: &[(&str, String)],
        _timeout: Duration,
    ) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let latitude = query
            .iter()
            .find(|(key, _)| *key == "latitude")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();

        self.responses
            .get(&latitude)
            .cloned()
            .ok_or_else(|| GradtageError::network(format!("connection refused for {latitude}")))
    }
}

fn engine_with(
    stub: ArchiveStub,
) -> (
    DegreeDayEngine<Arc<OpenMeteoArchive<ArchiveStub>>>,
    Arc<OpenMeteoArchive<ArchiveStub>>,
    Arc<RecordingDiagnostics>,
) {
    let source = Arc::new(OpenMeteoArchive::new(stub, Duration::from_secs(5)));
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let engine = DegreeDayEngine::with_diagnostics(source.clone(), diagnostics.clone());
    (engine, source, diagnostics)
}

fn cities() -> Vec<Location> {
    vec![
        Location::new("Berlin", 52.5, 13.4),
        Location::new("München", 48.1, 11.6),
        Location::new("Hamburg", 53.6, 10.0),
    ]
}

#[tokio::test]
async fn test_full_batch_with_one_unreachable_location() {
    let stub = ArchiveStub::default()
        .respond("52.5", json!([10.0, 16.0, 15.0, 12.0]))
        .respond("53.6", json!([-2.0, null, 3.0, 15.5]));
    let (engine, _, diagnostics) = engine_with(stub);

    let results = engine
        .calculate_for_cities(&cities(), "2023-01-01", "2023-01-04", 20.0, 15.0)
        .await
        .expect("batch must not fail because of one location");

    assert_eq!(results.len(), 2);
    assert_eq!(results.get("Berlin").unwrap().total_degree_days, 18.0);
    assert_eq!(results.get("Hamburg").unwrap().total_degree_days, 39.0);
    assert_eq!(results.get("Hamburg").unwrap().heating_day_count, 2);
    assert!(results.get("München").is_none());

    let requested = cities();
    let missing = results.missing_locations(&requested);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name, "München");
    assert_eq!(diagnostics.failures()[0].location_name, "München");

    let summary = engine.get_calculation_summary(&results);
    let hamburg = summary.find("Hamburg").unwrap();
    let berlin = summary.find("Berlin").unwrap();
    assert!(hamburg < berlin);
    assert!(summary.contains("Zeitraum: 2023-01-01 bis 2023-01-04"));
}

#[tokio::test]
async fn test_malformed_and_empty_payloads_are_skipped() {
    let stub = ArchiveStub::default()
        .respond_raw("52.5", json!({ "error": true, "reason": "Parameter 'daily' is invalid" }))
        .respond("48.1", json!([null, null]))
        .respond("53.6", json!([1.0]));
    let (engine, _, diagnostics) = engine_with(stub);

    let results = engine
        .calculate_for_cities(&cities(), "2023-01-01", "2023-01-02", 20.0, 15.0)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.contains("Hamburg"));

    let failures = diagnostics.failures();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|failure| !failure.retryable));
}

#[tokio::test]
async fn test_validation_failure_makes_no_requests() {
    let stub = ArchiveStub::default().respond("52.5", json!([1.0]));
    let (engine, source, _) = engine_with(stub);

    let err = engine
        .calculate_for_cities(&cities(), "2023-04-30", "2022-10-01", 20.0, 15.0)
        .await
        .unwrap_err();

    assert!(matches!(err, GradtageError::Validation { .. }));
    assert_eq!(source_calls(&source), 0);
}

#[tokio::test]
async fn test_every_location_is_requested_once() {
    let stub = ArchiveStub::default()
        .respond("52.5", json!([1.0]))
        .respond("48.1", json!([2.0]))
        .respond("53.6", json!([3.0]));
    let (engine, source, _) = engine_with(stub);

    let results = engine
        .calculate_with_defaults(&cities(), "2023-01-01", "2023-01-02")
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(source_calls(&source), 3);
}

#[tokio::test]
async fn test_empty_result_summary() {
    let (engine, _, _) = engine_with(ArchiveStub::default());

    let results = engine
        .calculate_for_cities(&cities(), "2023-01-01", "2023-01-02", 20.0, 15.0)
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(
        engine.get_calculation_summary(&results),
        "No calculation results available."
    );
}

fn source_calls(source: &OpenMeteoArchive<ArchiveStub>) -> usize {
    source.fetcher().calls.load(Ordering::SeqCst)
}
