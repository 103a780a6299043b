use api::gql::build_schema;
use async_graphql::Variables;
use serde_json::{json, Value};

use crate::common::*;

const SEARCH: &str = r#"
    query Search($q: String!) {
        searchGuests(q: $q) {
            id
            name
            isGroup
            guests { id firstName lastName }
        }
    }
"#;

async fn search(schema: &api::gql::WeddingSchema, q: &str) -> Vec<Value> {
    let variables = Variables::from_json(json!({ "q": q }));
    // Search is public: no claims
    let response = execute_graphql(schema, SEARCH, Some(variables), None).await;
    assert!(
        response.errors.is_empty(),
        "Search '{q}' failed: {:?}",
        response.errors
    );
    let data = response.data.into_json().unwrap();
    data["searchGuests"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_nickname_matches_given_name() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (group_id, _) = create_test_group(
        &state,
        None,
        &[("Robert", "Smith"), ("Alice", "Smith")],
    )
    .await;
    create_test_guest(&state, "Robert", "Jones").await;

    let results = search(&schema, "bob smith").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], group_id.to_string());
    assert_eq!(results[0]["isGroup"], true);
    // Full member list, not only the matching guest
    let members = results[0]["guests"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(results[0]["name"], "Alice Smith & Robert Smith");
}

#[tokio::test]
async fn test_name_order_does_not_matter() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let john = create_test_guest(&state, "John", "Smith").await;
    create_test_guest(&state, "Smith", "Johnson").await;

    let forward = search(&schema, "John Smith").await;
    let reversed = search(&schema, "Smith, John").await;

    assert_eq!(forward.len(), 1);
    assert_eq!(forward[0]["id"], john.to_string());
    assert_eq!(forward[0]["isGroup"], false);
    assert_eq!(forward, reversed);
}

#[tokio::test]
async fn test_single_token_substring_and_alias() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let william = create_test_guest(&state, "William", "Turner").await;
    let billie = create_test_guest(&state, "Billie", "Holiday").await;
    create_test_guest(&state, "Grace", "Hopper").await;

    let results = search(&schema, "bill").await;
    let ids: Vec<&str> = results.iter().map(|r| r["id"].as_str().unwrap()).collect();

    // "Billie" by substring, "William" through the alias table
    assert_eq!(results.len(), 2);
    assert!(ids.contains(&william.to_string().as_str()));
    assert!(ids.contains(&billie.to_string().as_str()));

    let by_last_name = search(&schema, "hop").await;
    assert_eq!(by_last_name.len(), 1);
    assert_eq!(by_last_name[0]["guests"][0]["lastName"], "Hopper");
}

#[tokio::test]
async fn test_group_listed_once_for_several_matches() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    create_test_group(
        &state,
        Some("The Browns"),
        &[("Charlie", "Brown"), ("Sally", "Brown"), ("Snoopy", "Dog")],
    )
    .await;

    let results = search(&schema, "brown").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "The Browns");
    assert_eq!(results[0]["guests"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_empty_query_and_wildcards() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    create_test_guest(&state, "Percy", "Jackson").await;

    assert!(search(&schema, "").await.is_empty());
    assert!(search(&schema, "  , . ").await.is_empty());
    // LIKE wildcards are matched literally
    assert!(search(&schema, "%").await.is_empty());
    assert!(search(&schema, "_").await.is_empty());
}
