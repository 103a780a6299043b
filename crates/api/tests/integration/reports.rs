use api::gql::build_schema;
use infra::repos::{guests, RsvpStatus, UpdateGuest};
use serde_json::json;

use crate::common::*;

async fn answer(
    state: &api::AppState,
    id: uuid::Uuid,
    status: RsvpStatus,
    meal: Option<&str>,
    dietary: Option<&str>,
) {
    guests::record_rsvp(
        &state.db,
        id,
        status,
        meal.map(str::to_string),
        dietary.map(str::to_string),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_meal_report() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (_, members) = create_test_group(
        &state,
        None,
        &[("Al", "Fox"), ("Bo", "Fox"), ("Cy", "Fox"), ("Di", "Fox")],
    )
    .await;
    answer(&state, members[0], RsvpStatus::Yes, Some("Beef"), Some("Gluten free")).await;
    answer(&state, members[1], RsvpStatus::Yes, Some("Beef"), None).await;
    answer(&state, members[2], RsvpStatus::Yes, None, None).await;
    answer(&state, members[3], RsvpStatus::No, None, Some("Vegan")).await;
    guests::update(
        &state.db,
        members[2],
        UpdateGuest {
            is_child: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    guests::set_table_number(&state.db, &members[..1], Some(6))
        .await
        .unwrap();

    let query = r#"
        query {
            mealReport {
                attending
                adults
                children
                meals { meal count }
                dietaryRestrictions { name tableNumber restriction }
            }
        }
    "#;
    let response = execute_graphql(&schema, query, None, Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["mealReport"],
        json!({
            "attending": 3,
            "adults": 2,
            "children": 1,
            "meals": [
                { "meal": "Beef", "count": 2 },
                { "meal": "Not selected", "count": 1 }
            ],
            "dietaryRestrictions": [
                { "name": "Al Fox", "tableNumber": 6, "restriction": "Gluten free" }
            ]
        })
    );
}

#[tokio::test]
async fn test_rsvp_summary() {
    let db = setup_test_db().await;
    let state = db.state.clone();
    let schema = build_schema(state.clone());

    let (_, members) = create_test_group(&state, None, &[("Ed", "Gray"), ("Flo", "Gray")]).await;
    let solo = create_test_guest(&state, "Gus", "Solo").await;
    answer(&state, members[0], RsvpStatus::Yes, None, None).await;
    answer(&state, members[1], RsvpStatus::No, None, None).await;
    guests::set_table_number(&state.db, &[solo], Some(1))
        .await
        .unwrap();

    let query = r#"
        query {
            rsvpSummary {
                totalGuests pending attending declined seated unseatedAttending childrenAttending groups
            }
        }
    "#;
    let response = execute_graphql(&schema, query, None, Some(admin_claims())).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["rsvpSummary"],
        json!({
            "totalGuests": 3,
            "pending": 1,
            "attending": 1,
            "declined": 1,
            "seated": 1,
            "unseatedAttending": 1,
            "childrenAttending": 0,
            "groups": 1
        })
    );
}
