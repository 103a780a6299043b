use async_graphql::MergedObject;

use crate::gql::domains::groups::GroupMutation;
use crate::gql::domains::guests::GuestMutation;
use crate::gql::domains::layout::LayoutMutation;
use crate::gql::domains::rsvp::RsvpMutation;
use crate::gql::domains::seating::SeatingMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    GroupMutation,
    GuestMutation,
    LayoutMutation,
    RsvpMutation,
    SeatingMutation,
);
