use api::gql::build_schema;
use async_graphql::Variables;
use infra::repos::settings::{self, FLOOR_LAYOUT_KEY};
use serde_json::json;

use crate::common::*;

const SAVE_LAYOUT: &str = r#"
    mutation Save($positions: [TablePositionInput!]!) {
        saveFloorLayout(positions: $positions) { tableNumber x y }
    }
"#;

const LOAD_LAYOUT: &str = "{ floorLayout { tableNumber x y } }";

#[tokio::test]
async fn test_layout_round_trip() {
    let db = setup_test_db().await;
    let schema = build_schema(db.state.clone());

    let positions = json!([
        { "tableNumber": 12, "x": 0.75, "y": 0.5 },
        { "tableNumber": 1, "x": 0.125, "y": 0.25 },
        { "tableNumber": 20, "x": 1.0, "y": 0.0 }
    ]);
    let variables = Variables::from_json(json!({ "positions": positions }));
    let response = execute_graphql(&schema, SAVE_LAYOUT, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let response = execute_graphql(&schema, LOAD_LAYOUT, None, Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["floorLayout"],
        json!([
            { "tableNumber": 1, "x": 0.125, "y": 0.25 },
            { "tableNumber": 12, "x": 0.75, "y": 0.5 },
            { "tableNumber": 20, "x": 1.0, "y": 0.0 }
        ])
    );
}

#[tokio::test]
async fn test_save_replaces_previous_layout() {
    let db = setup_test_db().await;
    let schema = build_schema(db.state.clone());

    for positions in [
        json!([{ "tableNumber": 3, "x": 0.5, "y": 0.5 }, { "tableNumber": 4, "x": 0.5, "y": 0.5 }]),
        json!([{ "tableNumber": 5, "x": 0.25, "y": 0.75 }]),
    ] {
        let variables = Variables::from_json(json!({ "positions": positions }));
        let response =
            execute_graphql(&schema, SAVE_LAYOUT, Some(variables), Some(admin_claims())).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }

    let response = execute_graphql(&schema, LOAD_LAYOUT, None, Some(admin_claims())).await;
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["floorLayout"],
        json!([{ "tableNumber": 5, "x": 0.25, "y": 0.75 }])
    );
}

#[tokio::test]
async fn test_legacy_pixel_layout_is_normalized() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    settings::put(
        &state.db,
        FLOOR_LAYOUT_KEY,
        json!({
            "2": { "x": 600, "y": 200 },
            "7": { "x": 1500, "y": 400 },
            "25": { "x": 0.5, "y": 0.5 },
            "abc": { "x": 0.5, "y": 0.5 },
            "9": [0.5, 0.5]
        }),
    )
    .await
    .unwrap();

    let response = execute_graphql(&schema, LOAD_LAYOUT, None, Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["floorLayout"],
        json!([
            { "tableNumber": 2, "x": 0.5, "y": 0.25 },
            { "tableNumber": 7, "x": 1.0, "y": 0.5 }
        ])
    );
}

#[tokio::test]
async fn test_save_rejects_bad_positions() {
    let db = setup_test_db().await;
    let schema = build_schema(db.state.clone());

    let cases = [
        (json!([{ "tableNumber": 21, "x": 0.5, "y": 0.5 }]), "INVALID_TABLE"),
        (json!([{ "tableNumber": 1, "x": 1.5, "y": 0.5 }]), "VALIDATION_ERROR"),
        (
            json!([{ "tableNumber": 1, "x": 0.1, "y": 0.1 }, { "tableNumber": 1, "x": 0.2, "y": 0.2 }]),
            "VALIDATION_ERROR",
        ),
    ];
    for (positions, code) in cases {
        let variables = Variables::from_json(json!({ "positions": positions }));
        let response =
            execute_graphql(&schema, SAVE_LAYOUT, Some(variables), Some(admin_claims())).await;
        assert_eq!(error_code(&response).as_deref(), Some(code));
    }

    // Nothing was stored
    let response = execute_graphql(&schema, LOAD_LAYOUT, None, Some(admin_claims())).await;
    let data = response.data.into_json().unwrap();
    assert_eq!(data["floorLayout"], json!([]));
}
