use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::gql::common::helpers::parse_id;
use crate::gql::common::Group;
use crate::state::AppState;

use super::service::{self, RsvpAnswer};
use super::types::SubmitRsvpInput;

#[derive(Default)]
pub struct RsvpQuery;

#[Object]
impl RsvpQuery {
    /// Meals a guest may choose when answering YES
    async fn meal_options(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let state = ctx.data::<AppState>()?;
        Ok(state.event_config().meal_options.clone())
    }
}

#[derive(Default)]
pub struct RsvpMutation;

#[Object]
impl RsvpMutation {
    /// Record RSVP answers for members of one group
    async fn submit_rsvp(&self, ctx: &Context<'_>, input: SubmitRsvpInput) -> Result<Group> {
        let state = ctx.data::<AppState>()?;
        let group_id = parse_id(&input.group_id, "group")?;

        let answers = input
            .responses
            .into_iter()
            .map(|r| {
                Ok(RsvpAnswer {
                    guest_id: parse_id(&r.guest_id, "guest")?,
                    status: r.status.into(),
                    meal: r.meal,
                    dietary_restrictions: r.dietary_restrictions,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let group = service::submit(&state.db, state.event_config(), group_id, answers)
            .await
            .map_err(|e| e.extend())?;
        Ok(group.into())
    }
}
