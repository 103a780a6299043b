use api::gql::build_schema;
use async_graphql::Variables;
use infra::repos::{guests, RsvpStatus, UpdateGuest};
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

const LIST_GUESTS: &str = r#"
    query List($filter: GuestFilterInput) {
        guests(filter: $filter) { id firstName lastName tableNumber }
    }
"#;

async fn list_names(schema: &api::gql::WeddingSchema, filter: serde_json::Value) -> Vec<String> {
    let variables = Variables::from_json(json!({ "filter": filter }));
    let response = execute_graphql(schema, LIST_GUESTS, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    data["guests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["firstName"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_guest_filters() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let ann = create_test_guest(&state, "Ann", "Archer").await;
    let bea = create_test_guest(&state, "Bea", "Baker").await;
    let cid = create_test_guest(&state, "Cid", "Carter").await;

    guests::set_table_number(&state.db, &[ann], Some(4)).await.unwrap();
    guests::update(
        &state.db,
        bea,
        UpdateGuest {
            rsvp_status: Some(RsvpStatus::Yes),
            meal: Some("Fish".to_string()),
            dietary_restrictions: Some("Shellfish allergy".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    guests::update(
        &state.db,
        cid,
        UpdateGuest {
            is_child: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(list_names(&schema, json!(null)).await, ["Ann", "Bea", "Cid"]);
    assert_eq!(list_names(&schema, json!({ "seated": true })).await, ["Ann"]);
    assert_eq!(list_names(&schema, json!({ "seated": false })).await, ["Bea", "Cid"]);
    assert_eq!(list_names(&schema, json!({ "tableNumber": 4 })).await, ["Ann"]);
    assert_eq!(list_names(&schema, json!({ "rsvpStatus": "YES" })).await, ["Bea"]);
    assert_eq!(list_names(&schema, json!({ "isChild": true })).await, ["Cid"]);
    assert_eq!(
        list_names(&schema, json!({ "hasDietaryRestrictions": true })).await,
        ["Bea"]
    );
    assert_eq!(list_names(&schema, json!({ "meal": "fish" })).await, ["Bea"]);
    assert_eq!(list_names(&schema, json!({ "nameContains": "CART" })).await, ["Cid"]);
}

#[tokio::test]
async fn test_create_update_delete_guest() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let create = r#"
        mutation Create($input: CreateGuestInput!) {
            createGuest(input: $input) { id fullName email rsvpStatus }
        }
    "#;
    let variables = Variables::from_json(json!({
        "input": { "title": "Dr.", "firstName": " Ruth ", "lastName": "Bader", "email": "ruth@example.com" }
    }));
    let response = execute_graphql(&schema, create, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["createGuest"]["fullName"], "Dr. Ruth Bader");
    assert_eq!(data["createGuest"]["rsvpStatus"], "PENDING");
    let id = data["createGuest"]["id"].as_str().unwrap().to_string();

    let update = r#"
        mutation Update($input: UpdateGuestInput!) {
            updateGuest(input: $input) { email phone meal }
        }
    "#;
    let bad_phone = Variables::from_json(json!({ "input": { "id": id, "phone": "12" } }));
    let response = execute_graphql(&schema, update, Some(bad_phone), Some(admin_claims())).await;
    assert_eq!(error_code(&response).as_deref(), Some("VALIDATION_ERROR"));

    let good = Variables::from_json(json!({
        "input": { "id": id, "phone": "+1 (555) 123-4567", "email": "", "meal": "beef" }
    }));
    let response = execute_graphql(&schema, update, Some(good), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["updateGuest"]["email"].is_null());
    assert_eq!(data["updateGuest"]["phone"], "+1 (555) 123-4567");
    assert_eq!(data["updateGuest"]["meal"], "Beef");

    let delete = "mutation Delete($id: ID!) { deleteGuest(id: $id) }";
    let variables = Variables::from_json(json!({ "id": id }));
    let response = execute_graphql(&schema, delete, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let variables = Variables::from_json(json!({ "id": id }));
    let response = execute_graphql(&schema, delete, Some(variables), Some(admin_claims())).await;
    assert_eq!(error_code(&response).as_deref(), Some("GUESTS_NOT_FOUND"));
}

#[tokio::test]
async fn test_create_guest_requires_names() {
    let db = setup_test_db().await;
    let schema = build_schema(db.state.clone());

    let create = r#"
        mutation Create($input: CreateGuestInput!) {
            createGuest(input: $input) { id }
        }
    "#;
    let variables = Variables::from_json(json!({
        "input": { "firstName": "   ", "lastName": "Nobody" }
    }));
    let response = execute_graphql(&schema, create, Some(variables), Some(admin_claims())).await;

    assert_eq!(error_code(&response).as_deref(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_set_guest_group() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (group_id, _) = create_test_group(&state, Some("Hosts"), &[("Host", "One")]).await;
    let guest = create_test_guest(&state, "Plus", "One").await;

    let query = r#"
        mutation Move($input: SetGuestGroupInput!) {
            setGuestGroup(input: $input) { id groupId }
        }
    "#;

    let variables = Variables::from_json(json!({
        "input": { "guestId": guest.to_string(), "groupId": group_id.to_string() }
    }));
    let response = execute_graphql(&schema, query, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["setGuestGroup"]["groupId"], group_id.to_string());

    let variables = Variables::from_json(json!({
        "input": { "guestId": guest.to_string(), "groupId": Uuid::new_v4().to_string() }
    }));
    let response = execute_graphql(&schema, query, Some(variables), Some(admin_claims())).await;
    assert_eq!(error_code(&response).as_deref(), Some("GROUP_NOT_FOUND"));

    let variables = Variables::from_json(json!({
        "input": { "guestId": guest.to_string(), "groupId": null }
    }));
    let response = execute_graphql(&schema, query, Some(variables), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["setGuestGroup"]["groupId"].is_null());
}

#[tokio::test]
async fn test_declined_guest_cannot_take_a_meal() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let id = create_test_guest(&state, "Nora", "Nolan").await;
    guests::record_rsvp(&state.db, id, RsvpStatus::No, None, None)
        .await
        .unwrap();

    let update = r#"
        mutation Update($input: UpdateGuestInput!) {
            updateGuest(input: $input) { rsvpStatus meal }
        }
    "#;
    let meal_only = Variables::from_json(json!({ "input": { "id": id.to_string(), "meal": "Fish" } }));
    let response = execute_graphql(&schema, update, Some(meal_only), Some(admin_claims())).await;
    assert_eq!(error_code(&response).as_deref(), Some("VALIDATION_ERROR"));

    let stored = guests::get_by_id(&state.db, id).await.unwrap().unwrap();
    assert_eq!(stored.meal, None);

    let accept = Variables::from_json(json!({
        "input": { "id": id.to_string(), "rsvpStatus": "YES", "meal": "Fish" }
    }));
    let response = execute_graphql(&schema, update, Some(accept), Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["updateGuest"]["rsvpStatus"], "YES");
    assert_eq!(data["updateGuest"]["meal"], "Fish");
}
