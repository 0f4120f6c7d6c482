//! End-to-end tests for parking place operations.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use parking_test_support::{InMemoryParkingLogRepository, SequenceRng};

#[tokio::test]
async fn test_two_slot_lot_round_trip() {
    let repo = Arc::new(InMemoryParkingLogRepository::new());
    let app = || common::build_test_app(2, repo.clone());

    // Park A and B: together they take both places.
    let (status, a) =
        common::post_json(app(), "/parking/park-car", &common::park_body("A", "A")).await;
    assert_eq!(status, StatusCode::OK);
    let a_place = a["place_number"].as_u64().unwrap();
    assert!([1, 2].contains(&a_place));

    let (status, b) =
        common::post_json(app(), "/parking/park-car", &common::park_body("B", "B")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(a_place + b["place_number"].as_u64().unwrap(), 3);

    // Park C: lot is full.
    let (status, c) =
        common::post_json(app(), "/parking/park-car", &common::park_body("C", "C")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(c["error"], "no_free_space");

    // Release A's place.
    let (status, released) = common::post_json(
        app(),
        &format!("/parking/free-up?place_number={a_place}"),
        &serde_json::Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["is_active"], false);
    assert_eq!(released["log_id"], a["log_id"]);

    let (status, free) = common::get_json(app(), "/parking/free-spaces-count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(free, serde_json::json!(1));

    // Park D: reuses A's place.
    let (status, d) =
        common::post_json(app(), "/parking/park-car", &common::park_body("D", "D")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(d["place_number"].as_u64().unwrap(), a_place);

    // History is retained: A's vacated record plus three active ones.
    assert_eq!(repo.all_logs().len(), 4);
}

#[tokio::test]
async fn test_release_twice_fails_the_second_time() {
    let repo = Arc::new(InMemoryParkingLogRepository::new());
    let app = || common::build_test_app_with_rng(5, repo.clone(), SequenceRng::new(vec![2]));

    let (status, parked) =
        common::post_json(app(), "/parking/park-car", &common::park_body("Ivan", "Ivanov")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parked["place_number"], 3);

    let (status, _) = common::post_json(
        app(),
        "/parking/free-up?place_number=3",
        &serde_json::Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = common::post_json(
        app(),
        "/parking/free-up?place_number=3",
        &serde_json::Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "already_free");
}

#[tokio::test]
async fn test_logs_by_owner_is_case_insensitive_and_skips_vacated() {
    let repo = Arc::new(InMemoryParkingLogRepository::new());
    let app = || common::build_test_app(10, repo.clone());

    let (_, kept) =
        common::post_json(app(), "/parking/park-car", &common::park_body("ivan", "IVANOV")).await;
    common::post_json(app(), "/parking/park-car", &common::park_body("Ivan", "Ivanova")).await;
    let (_, gone) =
        common::post_json(app(), "/parking/park-car", &common::park_body("Ivan", "Ivanov")).await;
    common::post_json(
        app(),
        &format!("/parking/free-up?place_number={}", gone["place_number"]),
        &serde_json::Value::Null,
    )
    .await;

    let (status, json) = common::get_json(
        app(),
        "/parking/parking-space-logs?first_name=Ivan&last_name=Ivanov",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let logs = json.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["log_id"], kept["log_id"]);
}

#[tokio::test]
async fn test_occupied_list_tracks_parks_and_releases() {
    let repo = Arc::new(InMemoryParkingLogRepository::new());
    let app = || common::build_test_app(3, repo.clone());

    for name in ["A", "B", "C"] {
        let (status, _) =
            common::post_json(app(), "/parking/park-car", &common::park_body(name, name)).await;
        assert_eq!(status, StatusCode::OK);
    }
    common::post_json(
        app(),
        "/parking/free-up?place_number=2",
        &serde_json::Value::Null,
    )
    .await;

    let (status, json) = common::get_json(app(), "/parking/occupied-spaces-list").await;

    assert_eq!(status, StatusCode::OK);
    let mut places: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["place_number"].as_u64().unwrap())
        .collect();
    places.sort_unstable();
    assert_eq!(places, vec![1, 3]);

    let (_, free) = common::get_json(app(), "/parking/free-spaces-count").await;
    assert_eq!(free, serde_json::json!(1));
}
