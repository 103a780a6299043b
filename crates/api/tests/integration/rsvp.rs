use api::gql::build_schema;
use async_graphql::Variables;
use infra::repos::guests;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

const SUBMIT_RSVP: &str = r#"
    mutation Submit($input: SubmitRsvpInput!) {
        submitRsvp(input: $input) {
            id
            guests { id rsvpStatus meal dietaryRestrictions tableNumber }
        }
    }
"#;

#[tokio::test]
async fn test_submit_rsvp_records_answers() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (group_id, members) =
        create_test_group(&state, None, &[("Tom", "Hale"), ("Uma", "Hale")]).await;
    guests::set_table_number(&state.db, &members, Some(3))
        .await
        .unwrap();

    let variables = Variables::from_json(json!({
        "input": {
            "groupId": group_id.to_string(),
            "responses": [
                { "guestId": members[0].to_string(), "status": "YES", "meal": " chicken ", "dietaryRestrictions": "No nuts" },
                { "guestId": members[1].to_string(), "status": "NO", "meal": "Fish" }
            ]
        }
    }));
    // Public mutation: guests answer without logging in
    let response = execute_graphql(&schema, SUBMIT_RSVP, Some(variables), None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let tom = guests::get_by_id(&state.db, members[0]).await.unwrap().unwrap();
    assert_eq!(tom.rsvp_status, guests::RsvpStatus::Yes);
    assert_eq!(tom.meal.as_deref(), Some("Chicken"));
    assert_eq!(tom.dietary_restrictions.as_deref(), Some("No nuts"));

    let uma = guests::get_by_id(&state.db, members[1]).await.unwrap().unwrap();
    assert_eq!(uma.rsvp_status, guests::RsvpStatus::No);
    assert_eq!(uma.meal, None);
    // Declining does not unseat
    assert_eq!(uma.table_number, Some(3));
}

#[tokio::test]
async fn test_rsvp_for_outsider_changes_nothing() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (group_id, members) = create_test_group(&state, None, &[("Val", "Kerr")]).await;
    let outsider = create_test_guest(&state, "Wes", "Outside").await;

    let variables = Variables::from_json(json!({
        "input": {
            "groupId": group_id.to_string(),
            "responses": [
                { "guestId": members[0].to_string(), "status": "YES" },
                { "guestId": outsider.to_string(), "status": "YES" }
            ]
        }
    }));
    let response = execute_graphql(&schema, SUBMIT_RSVP, Some(variables), None).await;

    assert_eq!(error_code(&response).as_deref(), Some("GUESTS_NOT_FOUND"));
    let val = guests::get_by_id(&state.db, members[0]).await.unwrap().unwrap();
    assert_eq!(val.rsvp_status, guests::RsvpStatus::Pending);
}

#[tokio::test]
async fn test_rsvp_rejects_pending_and_unknown_meal() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (group_id, members) = create_test_group(&state, None, &[("Xia", "Young")]).await;

    for response in [
        json!({ "guestId": members[0].to_string(), "status": "PENDING" }),
        json!({ "guestId": members[0].to_string(), "status": "YES", "meal": "Lobster" }),
    ] {
        let variables = Variables::from_json(json!({
            "input": { "groupId": group_id.to_string(), "responses": [response] }
        }));
        let result = execute_graphql(&schema, SUBMIT_RSVP, Some(variables), None).await;
        assert_eq!(error_code(&result).as_deref(), Some("VALIDATION_ERROR"));
    }
}

#[tokio::test]
async fn test_rsvp_unknown_group() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let guest = create_test_guest(&state, "Zed", "Alone").await;
    let variables = Variables::from_json(json!({
        "input": {
            "groupId": Uuid::new_v4().to_string(),
            "responses": [{ "guestId": guest.to_string(), "status": "YES" }]
        }
    }));
    let response = execute_graphql(&schema, SUBMIT_RSVP, Some(variables), None).await;

    assert_eq!(error_code(&response).as_deref(), Some("GROUP_NOT_FOUND"));
}

#[tokio::test]
async fn test_meal_options_listed() {
    let db = setup_test_db().await;
    let schema = build_schema(db.state.clone());

    let response = execute_graphql(&schema, "{ mealOptions }", None, None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["mealOptions"],
        json!(["Beef", "Chicken", "Fish", "Vegetarian", "Kids Meal"])
    );
}
