//! Tests for cosmiclens-atlas: prober, resolver, offline generator, seed
//! fetch, accumulator and the session facade

use cosmiclens_atlas::catalog;
use cosmiclens_atlas::generator;
use cosmiclens_atlas::resolver::simulate_lookup;
use cosmiclens_atlas::schema::{self, SchemaError};
use cosmiclens_atlas::*;
use cosmiclens_core::*;
use cosmiclens_llm::{GenerativeTransport, ScriptedReply, ScriptedTransport, TransportErrorKind};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn online_config() -> Config {
    Config::default().with_api_key("test-key")
}

fn scripted(reply: ScriptedReply) -> Arc<ScriptedTransport> {
    Arc::new(ScriptedTransport::constant(reply))
}

fn lens_with(config: Config, transport: &Arc<ScriptedTransport>) -> CosmicLens {
    CosmicLens::with_transport(config, transport.clone() as Arc<dyn GenerativeTransport>)
}

fn europa_json() -> Value {
    json!({
        "name": "Europa",
        "type": "Moon",
        "distance": "628.3 Million km",
        "mass": "4.8 x 10^22 kg",
        "temperature": "102 K",
        "description": "An icy moon of Jupiter. Its cracked crust hides a salty ocean.",
        "funFact": "Europa may hold twice as much water as all of Earth's oceans.",
        "discoveryYear": "1610",
        "coordinates": {"x": 12.5, "y": 22}
    })
}

fn record_named(name: &str, category: &str) -> CelestialRecord {
    let mut r = generator::simulate(name);
    r.category = category.to_string();
    r.color_hint = None;
    r
}

// ===========================================================================
// Deterministic generator
// ===========================================================================

#[test]
fn generator_is_deterministic() {
    let a = generator::simulate("Xylophone-9");
    let b = generator::simulate("Xylophone-9");
    assert_eq!(a, b);
    assert_eq!(a.category, b.category);
    assert_eq!(a.plot_position, b.plot_position);
    assert_eq!(a.color_hint, b.color_hint);
}

#[test]
fn generator_ignores_surrounding_whitespace() {
    assert_eq!(generator::simulate("  Vega-X  "), generator::simulate("Vega-X"));
}

#[test]
fn generator_category_from_closed_set() {
    let allowed: Vec<&str> = generator::ARCHETYPES.iter().map(|a| a.category).collect();
    for i in 0..200 {
        let r = generator::simulate(&format!("object-{}", i));
        assert!(allowed.contains(&r.category.as_str()), "unexpected {}", r.category);
        let color = r.color_hint.as_deref().unwrap();
        assert!(color.starts_with('#') && color.len() == 7);
    }
}

#[test]
fn generator_spreads_queries_over_categories() {
    let mut seen = std::collections::HashSet::new();
    for i in 0..300 {
        seen.insert(generator::simulate(&format!("probe {}", i)).category);
    }
    assert!(seen.len() >= 5, "only {:?}", seen);
}

#[test]
fn generator_positions_in_range() {
    for i in 0..1000 {
        let r = generator::simulate(&format!("q{}-{}", i, i * 7));
        let p = r.plot_position.unwrap();
        assert!(p.is_in_range(), "{:?}", p);
        assert!(r.validate().is_ok());
    }
}

#[test]
fn generator_empty_query_gets_placeholder_name() {
    let r = generator::simulate("   ");
    assert_eq!(r.name, generator::UNNAMED_SIGNAL);
    assert!(r.validate().is_ok());
}

#[test]
fn generator_known_entry_keeps_identity() {
    let r = generator::simulate_known("Vela Pulsar", "Pulsar", PlotPosition { x: 65.0, y: 70.0 }, "#22d3ee");
    assert_eq!(r.name, "Vela Pulsar");
    assert_eq!(r.category, "Pulsar");
    assert_eq!(r.plot_position, Some(PlotPosition { x: 65.0, y: 70.0 }));
    assert_eq!(r.color_hint.as_deref(), Some("#22d3ee"));
    assert!(r.temperature_label.ends_with(" K"));
}

// ===========================================================================
// Catalog
// ===========================================================================

#[test]
fn seed_catalog_names_are_unique() {
    let points = catalog::seed_points();
    assert_eq!(points.len(), 20);
    let names: std::collections::HashSet<_> = points.iter().map(|p| p.name.clone()).collect();
    assert_eq!(names.len(), points.len());
    assert!(points.iter().all(|p| p.position().is_in_range() && p.weight > 0.0));
}

#[test]
fn curated_entries_are_complete() {
    for entry in catalog::CURATED {
        assert!(entry.to_record().validate().is_ok(), "{}", entry.name);
    }
}

#[test]
fn curated_partial_is_case_insensitive() {
    assert_eq!(catalog::curated_partial("BETELGEUSE").unwrap().name, "Betelgeuse");
    assert_eq!(catalog::curated_partial("pillars").unwrap().name, "Pillars of Creation");
    assert!(catalog::curated_partial("").is_none());
    assert!(catalog::seed_partial("   ").is_none());
}

#[test]
fn partial_match_requires_catalog_name_to_contain_query() {
    assert!(catalog::curated_partial("Betelgeuse's companion").is_none());
    assert!(catalog::seed_partial("Proxima Centauri b").is_none());
    assert_eq!(catalog::seed_partial("proxima").unwrap().name, "Proxima Centauri");
}

// ===========================================================================
// Offline lookup order
// ===========================================================================

#[test]
fn lookup_exact_curated_match() {
    let r = simulate_lookup("Ton 618");
    assert_eq!(r.category, "Hyperluminous Quasar");
    assert_eq!(r.discovered_label, "1957");
    assert!(r.is_simulated);
}

#[test]
fn lookup_seed_catalog_substring() {
    let r = simulate_lookup("vela");
    assert_eq!(r.name, "Vela Pulsar");
    assert_eq!(r.category, "Pulsar");
    assert_eq!(r.color_hint.as_deref(), Some("#22d3ee"));
    assert_eq!(r.plot_position, Some(PlotPosition { x: 65.0, y: 70.0 }));
}

#[test]
fn lookup_longer_name_keeps_its_own_identity() {
    let planet = simulate_lookup("Proxima Centauri b");
    assert_eq!(planet.name, "Proxima Centauri b");
    assert_eq!(planet, generator::simulate("Proxima Centauri b"));

    let companion = simulate_lookup("Betelgeuse's companion");
    assert_eq!(companion.name, "Betelgeuse's companion");
}

#[test]
fn lookup_falls_through_to_generator() {
    let r = simulate_lookup("Xylophone-9");
    assert_eq!(r, generator::simulate("Xylophone-9"));
}

// ===========================================================================
// Schema validation
// ===========================================================================

#[test]
fn schema_parses_complete_record() {
    let r = schema::parse_record(&europa_json().to_string()).unwrap();
    assert_eq!(r.name, "Europa");
    assert_eq!(r.plot_position, Some(PlotPosition { x: 12.5, y: 22.0 }));
    assert!(!r.is_simulated);
}

#[test]
fn schema_rejects_missing_field() {
    let mut v = europa_json();
    v.as_object_mut().unwrap().remove("funFact");
    assert_eq!(schema::parse_record(&v.to_string()), Err(SchemaError::MissingField("funFact")));
}

#[test]
fn schema_rejects_mistyped_field() {
    let mut v = europa_json();
    v["discoveryYear"] = json!(1610);
    assert!(matches!(
        schema::parse_record(&v.to_string()),
        Err(SchemaError::WrongType { field: "discoveryYear", .. })
    ));
    let mut v = europa_json();
    v["coordinates"]["x"] = json!("far");
    assert!(matches!(
        schema::parse_record(&v.to_string()),
        Err(SchemaError::WrongType { field: "x", .. })
    ));
}

#[test]
fn schema_rejects_empty_name_and_non_objects() {
    let mut v = europa_json();
    v["name"] = json!("  ");
    assert_eq!(schema::parse_record(&v.to_string()), Err(SchemaError::EmptyField("name")));
    assert_eq!(
        schema::parse_record("[1,2]"),
        Err(SchemaError::WrongShape { expected: "object" })
    );
    assert!(matches!(schema::parse_record("not json"), Err(SchemaError::NotJson(_))));
}

#[test]
fn schema_clamps_out_of_range_coordinates() {
    let mut v = europa_json();
    v["coordinates"] = json!({"x": -20, "y": 250.5});
    let r = schema::parse_record(&v.to_string()).unwrap();
    assert_eq!(r.plot_position, Some(PlotPosition { x: 0.0, y: 100.0 }));
}

#[test]
fn schema_nodes_skip_invalid_and_dedupe() {
    let text = json!([
        {"name": "Vega", "type": "Star", "x": 10, "y": 80, "z": 20, "color": "#aabbff"},
        {"name": "Vega", "type": "Star", "x": 11, "y": 81, "z": 21, "color": "#ffffff"},
        {"name": "Broken", "type": "Star", "x": "?", "y": 1, "z": 1, "color": "#000000"},
        {"name": "Huge", "type": "Galaxy", "x": 140, "y": 5, "z": 500, "color": "#d8b4fe"},
        "garbage"
    ])
    .to_string();
    let points = schema::parse_nodes(&text).unwrap();
    let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Vega", "Huge"]);
    assert_eq!(points[0].color_hint, "#aabbff");
    assert_eq!(points[1].x, 100.0);
    assert_eq!(points[1].weight, 60.0);
}

#[test]
fn record_prompt_quotes_hostile_input() {
    let prompt = schema::record_prompt("a \"quoted\" \\ name");
    assert!(prompt.contains(r#""a \"quoted\" \\ name""#));
    assert!(prompt.contains("Hypothetical"));
}

#[test]
fn record_schema_requires_every_field() {
    let s = schema::record_schema();
    let required: Vec<&str> = s["required"].as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    for field in ["name", "type", "distance", "mass", "temperature", "description", "funFact", "discoveryYear", "coordinates"] {
        assert!(required.contains(&field), "{} not required", field);
    }
}

// ===========================================================================
// Connectivity prober
// ===========================================================================

#[tokio::test]
async fn probe_without_key_makes_no_call() {
    let transport = scripted(ScriptedReply::Text("pong".into()));
    let lens = lens_with(Config::default(), &transport);
    let result = lens.probe_connectivity().await;
    assert_eq!(result, ConnectionResult { success: false, reason_code: ReasonCode::KeyMissing });
    assert_eq!(transport.call_count().await, 0);
    assert_eq!(lens.connectivity(), ConnectivityState::Offline(ReasonCode::KeyMissing));
}

#[tokio::test]
async fn probe_offline_session_reports_key_missing() {
    let lens = CosmicLens::offline(online_config());
    assert_eq!(lens.probe_connectivity().await.reason_code, ReasonCode::KeyMissing);
}

#[tokio::test]
async fn probe_success_is_online() {
    let transport = scripted(ScriptedReply::Text("pong".into()));
    let lens = lens_with(online_config(), &transport);
    assert_eq!(lens.connectivity(), ConnectivityState::Unknown);
    assert_eq!(lens.probe_connectivity().await, ConnectionResult::online());
    assert_eq!(lens.connectivity(), ConnectivityState::Online);

    let ping = &transport.requests().await[0];
    assert_eq!(ping.max_output_tokens, Some(8));
    assert_eq!(ping.temperature, Some(0.0));
    assert!(!ping.wants_json());
}

#[tokio::test]
async fn probe_maps_transport_failures() {
    let cases = [
        (TransportErrorKind::RateLimited, ReasonCode::QuotaExceeded),
        (TransportErrorKind::Unauthorized, ReasonCode::KeyRejected),
        (TransportErrorKind::NotFound, ReasonCode::ModelError),
        (TransportErrorKind::Timeout, ReasonCode::ConnectionFailed),
        (TransportErrorKind::Other, ReasonCode::ConnectionFailed),
    ];
    for (kind, expected) in cases {
        let transport = scripted(ScriptedReply::fail(kind));
        let prober = Prober::new(online_config(), Some(transport.clone() as Arc<dyn GenerativeTransport>));
        let result = prober.probe().await;
        assert!(!result.success);
        assert_eq!(result.reason_code, expected, "{:?}", kind);
        assert_eq!(reason_for(kind), expected);
    }
}

#[tokio::test]
async fn probe_result_is_cached_until_reprobe() {
    let transport = Arc::new(ScriptedTransport::sequence(vec![
        ScriptedReply::fail(TransportErrorKind::RateLimited),
        ScriptedReply::Text("pong".into()),
    ]));
    let lens = lens_with(online_config(), &transport);

    assert_eq!(lens.probe_connectivity().await.reason_code, ReasonCode::QuotaExceeded);
    assert_eq!(lens.probe_connectivity().await.reason_code, ReasonCode::QuotaExceeded);
    assert_eq!(transport.call_count().await, 1);

    assert_eq!(lens.reprobe().await, ConnectionResult::online());
    assert_eq!(transport.call_count().await, 2);
    assert_eq!(lens.connectivity(), ConnectivityState::Online);
}

#[tokio::test]
async fn concurrent_probes_share_one_call() {
    let transport = scripted(ScriptedReply::delayed(Duration::from_millis(20), ScriptedReply::Text("pong".into())));
    let lens = Arc::new(lens_with(online_config(), &transport));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let lens = lens.clone();
        handles.push(tokio::spawn(async move { lens.probe_connectivity().await }));
    }
    for h in handles {
        assert!(h.await.unwrap().success);
    }
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn status_line_tracks_state() {
    let transport = scripted(ScriptedReply::fail(TransportErrorKind::Unauthorized));
    let lens = lens_with(online_config(), &transport);
    assert!(lens.status_line().starts_with("UNKNOWN"));
    lens.probe_connectivity().await;
    assert!(lens.status_line().starts_with("KEY_REJECTED: "));
}

// ===========================================================================
// Fact resolver
// ===========================================================================

#[tokio::test]
async fn resolve_known_name_offline() {
    let lens = CosmicLens::offline(Config::default());
    let r = lens.resolve("Sagittarius A*").await;
    assert!(r.category.contains("Black Hole"));
    assert!(r.is_simulated);
    assert!(r.validate().is_ok());
}

#[tokio::test]
async fn resolve_unknown_name_offline() {
    let lens = CosmicLens::offline(Config::default());
    let r = lens.resolve("Xylophone-9").await;
    assert_eq!(r.name, "Xylophone-9");
    assert!(r.is_simulated);
    assert!(r.plot_position.unwrap().is_in_range());
    assert!(r.validate().is_ok());
}

#[tokio::test]
async fn resolve_is_stable_across_sessions() {
    let a = CosmicLens::offline(Config::default()).resolve("Nebula of Quiet Hours").await;
    let b = CosmicLens::offline(Config::default()).resolve("Nebula of Quiet Hours").await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn resolve_remote_success_is_verbatim() {
    let transport = scripted(ScriptedReply::Json(europa_json()));
    let lens = lens_with(online_config(), &transport);
    let r = lens.resolve("Europa").await;

    assert!(!r.is_simulated);
    assert_eq!(r.name, "Europa");
    assert_eq!(r.category, "Moon");
    assert_eq!(r.distance_label, "628.3 Million km");
    assert_eq!(r.mass_label, "4.8 x 10^22 kg");
    assert_eq!(r.temperature_label, "102 K");
    assert_eq!(r.summary, "An icy moon of Jupiter. Its cracked crust hides a salty ocean.");
    assert_eq!(r.highlight, "Europa may hold twice as much water as all of Earth's oceans.");
    assert_eq!(r.discovered_label, "1610");
    assert_eq!(r.plot_position, Some(PlotPosition { x: 12.5, y: 22.0 }));

    let requests = transport.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].wants_json());
    assert!(requests[0].prompt.contains("\"Europa\""));
}

#[tokio::test]
async fn resolve_remote_malformed_json_falls_back() {
    let transport = scripted(ScriptedReply::Text("Sorry, I can't help with that {".into()));
    let lens = lens_with(online_config(), &transport);
    let r = lens.resolve("Europa").await;
    assert!(r.is_simulated);
    assert!(r.validate().is_ok());
    assert_eq!(r, simulate_lookup("Europa"));
}

#[tokio::test]
async fn resolve_remote_missing_field_falls_back() {
    let mut v = europa_json();
    v.as_object_mut().unwrap().remove("coordinates");
    let transport = scripted(ScriptedReply::Json(v));
    let lens = lens_with(online_config(), &transport);
    let r = lens.resolve("Europa").await;
    assert!(r.is_simulated);
    assert!(r.validate().is_ok());
}

#[tokio::test]
async fn resolve_remote_error_falls_back_to_curated() {
    let transport = scripted(ScriptedReply::fail(TransportErrorKind::Other));
    let lens = lens_with(online_config(), &transport);
    let r = lens.resolve("Betelgeuse").await;
    assert!(r.is_simulated);
    assert_eq!(r.category, "Red Supergiant");
}

#[tokio::test]
async fn resolve_keeps_hypothetical_category() {
    let mut v = europa_json();
    v["name"] = json!("Planet Nine");
    v["type"] = json!("Hypothetical Planet");
    let transport = scripted(ScriptedReply::Json(v));
    let lens = lens_with(online_config(), &transport);
    let r = lens.resolve("Planet Nine").await;
    assert!(!r.is_simulated);
    assert!(r.is_hypothetical());
}

#[tokio::test]
async fn resolve_skips_remote_once_known_offline() {
    let transport = scripted(ScriptedReply::fail(TransportErrorKind::Unauthorized));
    let lens = lens_with(online_config(), &transport);
    lens.probe_connectivity().await;
    assert_eq!(transport.call_count().await, 1);

    let r = lens.resolve("Europa").await;
    assert!(r.is_simulated);
    assert_eq!(transport.call_count().await, 1);
}

#[tokio::test]
async fn resolve_without_key_never_calls_transport() {
    let transport = scripted(ScriptedReply::Json(europa_json()));
    let lens = lens_with(Config::default(), &transport);
    let r = lens.resolve("Europa").await;
    assert!(r.is_simulated);
    assert_eq!(transport.call_count().await, 0);
}

#[tokio::test]
async fn resolve_is_total_over_hostile_input() {
    let long = "x".repeat(10_000);
    let inputs = [
        "",
        "   ",
        "\"",
        "\\",
        "{\"name\": ",
        "\u{0}\u{1b}[31m",
        "🌌 галактика 銀河",
        long.as_str(),
    ];
    let offline = CosmicLens::offline(Config::default());
    let garbage = scripted(ScriptedReply::Text("<html>502</html>".into()));
    let online = lens_with(online_config(), &garbage);
    for q in inputs {
        for r in [offline.resolve(q).await, online.resolve(q).await] {
            assert!(r.validate().is_ok(), "{:?} -> {:?}", q, r);
            assert!(r.is_simulated);
        }
    }
}

#[tokio::test]
async fn resolve_empty_query_uses_placeholder_name() {
    let lens = CosmicLens::offline(Config::default());
    assert_eq!(lens.resolve("").await.name, generator::UNNAMED_SIGNAL);
}

#[tokio::test]
async fn resolve_honours_simulated_latency() {
    let lens = CosmicLens::offline(Config::default().with_simulated_latency_ms(30));
    let start = tokio::time::Instant::now();
    lens.resolve("Xylophone-9").await;
    assert!(start.elapsed() >= Duration::from_millis(30));
}

// ===========================================================================
// Seed fetch
// ===========================================================================

#[tokio::test]
async fn seed_offline_uses_catalog() {
    let lens = CosmicLens::offline(Config::default());
    let points = lens.seed_points().await;
    assert_eq!(points, catalog::seed_points());
    assert_eq!(lens.phase().await, PointSetPhase::Seeded);
}

#[tokio::test]
async fn seed_remote_points_are_deduplicated() {
    let transport = scripted(ScriptedReply::Json(json!([
        {"name": "Vega", "type": "Star", "x": 10, "y": 80, "z": 20, "color": "#aabbff"},
        {"name": "Vega", "type": "Star", "x": 10, "y": 80, "z": 20, "color": "#aabbff"},
        {"name": "M87*", "type": "Black Hole", "x": 92, "y": 91, "z": 50, "color": "#bc13fe"}
    ])));
    let lens = lens_with(online_config(), &transport);
    let points = lens.seed_points().await;
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].name, "M87*");
    assert!(transport.requests().await[0].prompt.contains("25"));
}

#[tokio::test]
async fn seed_timeout_falls_back_to_catalog() {
    let transport = scripted(ScriptedReply::delayed(
        Duration::from_millis(500),
        ScriptedReply::Json(json!([])),
    ));
    let lens = lens_with(online_config().with_seed_timeout_ms(30), &transport);
    let start = tokio::time::Instant::now();
    let points = lens.seed_points().await;
    assert!(start.elapsed() < Duration::from_millis(400));
    assert_eq!(points.len(), catalog::SEED_CATALOG.len());
}

#[tokio::test]
async fn seed_bad_responses_fall_back_to_catalog() {
    for reply in [
        ScriptedReply::Text("nope".into()),
        ScriptedReply::Json(json!([])),
        ScriptedReply::Json(json!({"name": "not an array"})),
        ScriptedReply::fail(TransportErrorKind::RateLimited),
    ] {
        let transport = scripted(reply);
        let lens = lens_with(online_config(), &transport);
        assert_eq!(lens.seed_points().await, catalog::seed_points());
    }
}

// ===========================================================================
// Accumulator
// ===========================================================================

#[test]
fn accumulator_phases() {
    let mut acc = Accumulator::new();
    assert_eq!(acc.phase(), PointSetPhase::Empty);
    acc.seed(catalog::seed_points());
    assert_eq!(acc.phase(), PointSetPhase::Seeded);
    acc.add_from_record(&generator::simulate("Xylophone-9"));
    acc.add_from_record(&generator::simulate("Xylophone-10"));
    assert_eq!(acc.phase(), PointSetPhase::Growing(2));
}

#[test]
fn accumulator_dedupes_by_exact_name() {
    let mut acc = Accumulator::new();
    acc.seed(catalog::seed_points());
    let before = acc.len();

    let first = record_named("Xylophone-9", "Nebula");
    let mut second = record_named("Xylophone-9", "Galaxy");
    second.plot_position = Some(PlotPosition { x: 1.0, y: 1.0 });

    let a = acc.add_from_record(&first).unwrap();
    let b = acc.add_from_record(&second).unwrap();
    assert_eq!(acc.len(), before + 1);
    assert_eq!(a, b);
    assert_eq!(acc.get("Xylophone-9").unwrap().category, "Nebula");

    acc.add_from_record(&record_named("xylophone-9", "Nebula"));
    assert_eq!(acc.len(), before + 2);
}

#[test]
fn accumulator_existing_seed_point_is_returned() {
    let mut acc = Accumulator::new();
    acc.seed(catalog::seed_points());
    let before = acc.len();
    let existing = acc.add_from_record(&simulate_lookup("Sagittarius A*")).unwrap();
    assert_eq!(acc.len(), before);
    assert_eq!(existing.color_hint, "#bc13fe");
    assert_eq!(existing.weight, 50.0);
}

#[test]
fn accumulator_ignores_record_without_position() {
    let mut acc = Accumulator::new();
    let mut r = generator::simulate("Drifter");
    r.plot_position = None;
    assert!(acc.add_from_record(&r).is_none());
    assert!(acc.is_empty());
}

#[test]
fn accumulator_preserves_insertion_order() {
    let mut acc = Accumulator::new();
    for name in ["c", "a", "b", "a"] {
        acc.add_from_record(&generator::simulate(name));
    }
    let names: Vec<&str> = acc.points().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn accumulator_seed_replaces_wholesale() {
    let mut acc = Accumulator::new();
    acc.add_from_record(&generator::simulate("Old"));
    acc.seed(vec![PlotPoint::new("New", "Star", 1.0, 2.0, 10.0, "#fff")]);
    assert_eq!(acc.len(), 1);
    assert!(!acc.contains("Old"));
    assert_eq!(acc.phase(), PointSetPhase::Seeded);
}

#[test]
fn point_from_record_colours_and_carries_fields() {
    let pulsar = record_named("PSR J0000", "Millisecond Pulsar");
    let p = point_from_record(&pulsar).unwrap();
    assert_eq!(p.color_hint, "#00ff9d");
    assert_eq!(p.weight, 30.0);
    assert_eq!(p.summary.as_deref(), Some(pulsar.summary.as_str()));
    assert_eq!(p.distance_label.as_deref(), Some(pulsar.distance_label.as_str()));

    let moon = record_named("Io", "Moon");
    assert_eq!(point_from_record(&moon).unwrap().color_hint, "#00f3ff");

    let simulated = generator::simulate("Xylophone-9");
    assert_eq!(
        point_from_record(&simulated).unwrap().color_hint,
        simulated.color_hint.clone().unwrap()
    );
}

// ===========================================================================
// Session facade
// ===========================================================================

#[tokio::test]
async fn explore_grows_point_set_once_per_name() {
    let lens = CosmicLens::offline(Config::default());
    lens.seed_points().await;
    let base = lens.points().await.len();

    let (record, point) = lens.explore("Xylophone-9").await;
    assert_eq!(point.unwrap().name, record.name);
    lens.explore("Xylophone-9").await;
    assert_eq!(lens.points().await.len(), base + 1);
    assert_eq!(lens.phase().await, PointSetPhase::Growing(1));
}

#[tokio::test]
async fn concurrent_explores_merge_safely() {
    let lens = Arc::new(CosmicLens::offline(Config::default()));
    lens.seed_points().await;
    let base = lens.points().await.len();

    let mut handles = Vec::new();
    for i in 0..16 {
        let lens = lens.clone();
        let query = if i % 2 == 0 { "Xylophone-9".to_string() } else { format!("Marimba-{}", i) };
        handles.push(tokio::spawn(async move { lens.explore(&query).await }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(lens.points().await.len(), base + 1 + 8);
}

#[tokio::test]
async fn remote_record_lands_in_point_set() {
    let transport = scripted(ScriptedReply::Json(europa_json()));
    let lens = lens_with(online_config(), &transport);
    let (_, point) = lens.explore("Europa").await;
    let point = point.unwrap();
    assert_eq!(point.name, "Europa");
    assert_eq!((point.x, point.y), (12.5, 22.0));
    assert_eq!(point.color_hint, "#00f3ff");
}
