//! End-to-end scenarios through the public API: decode a server response, score
//! it, aggregate clusters and drive the fetch lifecycle the way the explorer does.

use api::{BoundingBox, FeatureCollection, FeatureRef, FetchError};
use futures::executor::block_on;
use ui::core::config::AppConfig;
use ui::core::location::MapLocation;
use ui::explorer::{ExplorerState, MapGlyph};
use ui::fetch::{run_ticket, Completion, FeatureSource, FetchController, FetchState};
use ui::staleness::{aggregate, score, Mode};

fn decode(body: &str) -> FeatureCollection {
    FeatureCollection::from_json(body).expect("valid fixture")
}

const TWO_NODES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [9.1901, 45.4641]},
         "properties": {"id": 1, "lastedit": "2020-01-01", "created": "2015-01-01",
                        "version": 3, "average_update_days": 20}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [9.1912, 45.4644]},
         "properties": {"id": 2, "lastedit": "2023-01-01", "created": "2016-01-01",
                        "version": 8, "average_update_days": 90}}
    ]
}"#;

#[test]
fn lastedit_scenario_scores_oldest_as_worst() {
    let sheet = score(&decode(TWO_NODES), Mode::LastEdit);
    assert_eq!(sheet.score_of(&FeatureRef::node("1")), Some(0.0));
    assert_eq!(sheet.score_of(&FeatureRef::node("2")), Some(1.0));
    assert_eq!(sheet.worst().map(|e| e.feature.id.as_str()), Some("1"));
    assert_eq!(sheet.best().map(|e| e.feature.id.as_str()), Some("2"));
}

#[test]
fn single_frequency_feature_is_its_own_cluster_value() {
    let collection = decode(
        r#"{"features": [{"type": "Feature",
            "geometry": {"type": "Point", "coordinates": [9.19, 45.46]},
            "properties": {"id": 1, "lastedit": "2020-01-01", "created": "2019-01-01",
                           "version": 2, "average_update_days": 400}}]}"#,
    );
    let sheet = score(&collection, Mode::Frequency);
    let own = sheet.score_of(&FeatureRef::node("1")).unwrap();
    for percentile in 1..=100 {
        assert_eq!(aggregate(&[own], percentile), Ok(own));
    }
    assert_eq!(sheet.worst().unwrap().display, "every 1 year(s)");
}

struct SlowThenFast;

impl FeatureSource for SlowThenFast {
    async fn fetch(&self, url: api::Url) -> Result<FeatureCollection, FetchError> {
        let id = if url.as_str().contains("minx=9") { "first" } else { "second" };
        Ok(decode(&format!(
            r#"{{"features": [{{"type": "Feature",
                "geometry": {{"type": "Point", "coordinates": [9.0, 45.0]}},
                "properties": {{"id": "{id}", "lastedit": "2020-01-01", "created": "2019-01-01",
                               "version": 1, "average_update_days": 1}}}}]}}"#
        )))
    }
}

#[test]
fn second_trigger_wins_even_when_first_finishes_last() {
    let mut controller = FetchController::new("http://localhost:8000");
    controller.update_viewport(BoundingBox::new(9.0, 45.0, 9.1, 45.1));
    let first = controller.begin().unwrap();
    controller.update_viewport(BoundingBox::new(10.0, 46.0, 10.1, 46.1));
    let second = controller.begin().unwrap();

    let (second_session, second_outcome) = block_on(run_ticket(&SlowThenFast, second));
    let (first_session, first_outcome) = block_on(run_ticket(&SlowThenFast, first));

    assert_eq!(
        controller.complete(second_session, second_outcome),
        Completion::Published
    );
    assert_eq!(controller.complete(first_session, first_outcome), Completion::Stale);

    let loaded = controller.loaded().unwrap();
    assert_eq!(loaded.viewport.bounds, BoundingBox::new(10.0, 46.0, 10.1, 46.1));
    assert_eq!(loaded.collection.features[0].id().as_str(), "second");
}

#[test]
fn explorer_renders_clusters_until_max_zoom() {
    let config = AppConfig {
        start: MapLocation::new(15, 45.4650, 9.1920),
        ..AppConfig::default()
    };
    let mut state = ExplorerState::new(config);
    let ticket = state.begin_fetch().unwrap();
    assert!(ticket.url.as_str().starts_with("http://localhost:8000/api/getData?minx="));
    state.finish_fetch(ticket.session, Ok(decode(TWO_NODES)));

    // At zoom 15 the two nodes are about 26 px apart and share a grid cell.
    let glyphs = state.glyphs().unwrap();
    assert_eq!(glyphs.len(), 1);
    assert!(matches!(&glyphs[0], MapGlyph::Cluster(cluster) if cluster.count == 2));

    state.set_location(MapLocation::new(19, 45.4650, 9.1920));
    let glyphs = state.glyphs().unwrap();
    assert_eq!(glyphs.len(), 2);
    assert!(glyphs.iter().all(|g| matches!(g, MapGlyph::Single(_))));
}

#[test]
fn failed_refresh_keeps_previous_markers_visible() {
    let mut state = ExplorerState::new(AppConfig::default());
    let first = state.begin_fetch().unwrap();
    state.finish_fetch(first.session, Ok(decode(TWO_NODES)));
    let before = state.markers();

    let retry = state.begin_fetch().unwrap();
    state.finish_fetch(retry.session, Err(FetchError::Status(503)));
    assert!(matches!(state.fetch_state(), FetchState::Error { .. }));
    assert_eq!(state.markers(), before);
}
