use async_graphql::{InputObject, ID};

use crate::gql::common::RsvpStatus;

use super::filter::GuestListFilter;

#[derive(InputObject, Default)]
pub struct GuestFilterInput {
    pub rsvp_status: Option<RsvpStatus>,
    /// true = has a table, false = not seated yet.
    pub seated: Option<bool>,
    pub table_number: Option<i32>,
    pub is_child: Option<bool>,
    pub has_dietary_restrictions: Option<bool>,
    pub meal: Option<String>,
    pub name_contains: Option<String>,
}

impl From<GuestFilterInput> for GuestListFilter {
    fn from(input: GuestFilterInput) -> Self {
        Self {
            rsvp_status: input.rsvp_status.map(Into::into),
            seating: input.seated.into(),
            table_number: input.table_number,
            is_child: input.is_child,
            has_dietary_restrictions: input.has_dietary_restrictions,
            meal: input.meal,
            name_contains: input.name_contains,
        }
    }
}

#[derive(InputObject)]
pub struct CreateGuestInput {
    pub group_id: Option<ID>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_child: Option<bool>,
}

/// Omitted fields are left alone; an empty string clears an optional field.
#[derive(InputObject)]
pub struct UpdateGuestInput {
    pub id: ID,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub meal: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub is_child: Option<bool>,
}

#[derive(InputObject)]
pub struct SetGuestGroupInput {
    pub guest_id: ID,
    /// Null removes the guest from their group.
    pub group_id: Option<ID>,
}
