use async_graphql::{InputObject, ID};

use crate::gql::common::RsvpStatus;

#[derive(InputObject)]
pub struct RsvpResponseInput {
    pub guest_id: ID,
    /// YES or NO.
    pub status: RsvpStatus,
    /// One of `mealOptions`; ignored for NO.
    pub meal: Option<String>,
    pub dietary_restrictions: Option<String>,
}

#[derive(InputObject)]
pub struct SubmitRsvpInput {
    pub group_id: ID,
    pub responses: Vec<RsvpResponseInput>,
}
