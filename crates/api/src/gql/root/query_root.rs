use async_graphql::MergedObject;

use crate::gql::domains::groups::GroupQuery;
use crate::gql::domains::guests::GuestQuery;
use crate::gql::domains::layout::LayoutQuery;
use crate::gql::domains::reports::ReportQuery;
use crate::gql::domains::rsvp::RsvpQuery;
use crate::gql::domains::search::SearchQuery;
use crate::gql::domains::seating::SeatingQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    GroupQuery,
    GuestQuery,
    LayoutQuery,
    ReportQuery,
    RsvpQuery,
    SearchQuery,
    SeatingQuery,
);
