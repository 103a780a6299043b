use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::state::AppState;

use super::service;
use super::types::SearchResultGroup;

#[derive(Default)]
pub struct SearchQuery;

#[Object]
impl SearchQuery {
    /// Find guests by name, tolerating nicknames and either name order.
    /// Returns each matching group once, with all of its members.
    async fn search_guests(&self, ctx: &Context<'_>, q: String) -> Result<Vec<SearchResultGroup>> {
        let state = ctx.data::<AppState>()?;

        let matches = service::search(&state.db, &q)
            .await
            .map_err(|e| e.extend())?;

        Ok(matches.into_iter().map(SearchResultGroup::from).collect())
    }
}
