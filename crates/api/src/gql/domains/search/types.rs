use async_graphql::{SimpleObject, ID};

use crate::gql::common::helpers::group_display_name;
use crate::gql::common::Guest;

use super::service::SearchMatch;

/// A group matching a search, with every member, or a single groupless guest.
#[derive(SimpleObject, Clone, Debug)]
pub struct SearchResultGroup {
    /// Group id, or the guest id for a groupless guest.
    pub id: ID,
    pub name: String,
    pub is_group: bool,
    pub guests: Vec<Guest>,
}

impl From<SearchMatch> for SearchResultGroup {
    fn from(value: SearchMatch) -> Self {
        let id = value.id().into();
        match value {
            SearchMatch::Group(g) => Self {
                id,
                name: group_display_name(g.group.name.as_deref(), &g.members),
                is_group: true,
                guests: g.members.into_iter().map(Guest::from).collect(),
            },
            SearchMatch::Solo(guest) => Self {
                id,
                name: guest.full_name(),
                is_group: false,
                guests: vec![guest.into()],
            },
        }
    }
}
