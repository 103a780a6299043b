use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use infra::repos::{CreateGuest, UpdateGuest};

use crate::auth::permissions::require_admin;
use crate::gql::common::helpers::parse_id;
use crate::gql::common::Guest;
use crate::state::AppState;

use super::filter::GuestListFilter;
use super::service;
use super::types::{CreateGuestInput, GuestFilterInput, SetGuestGroupInput, UpdateGuestInput};

#[derive(Default)]
pub struct GuestQuery;

#[Object]
impl GuestQuery {
    /// Guests ordered by last then first name (admin only)
    async fn guests(
        &self,
        ctx: &Context<'_>,
        filter: Option<GuestFilterInput>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<Guest>> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let filter: GuestListFilter = filter.unwrap_or_default().into();
        let rows = service::list(&state.db, &filter)
            .await
            .map_err(|e| e.extend())?;

        let offset = offset.unwrap_or(0).max(0) as usize;
        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(Guest::from)
            .collect())
    }

    /// Get a guest by ID (admin only)
    async fn guest(&self, ctx: &Context<'_>, id: ID) -> Result<Guest> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id, "guest")?;

        let row = service::get(&state.db, id).await.map_err(|e| e.extend())?;
        Ok(row.into())
    }
}

#[derive(Default)]
pub struct GuestMutation;

#[Object]
impl GuestMutation {
    /// Add a guest, optionally into an existing group (admin only)
    async fn create_guest(&self, ctx: &Context<'_>, input: CreateGuestInput) -> Result<Guest> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let group_id = input
            .group_id
            .as_ref()
            .map(|id| parse_id(id, "group"))
            .transpose()?;

        let data = CreateGuest {
            group_id,
            title: input.title,
            first_name: input.first_name,
            last_name: input.last_name,
            suffix: input.suffix,
            email: input.email,
            phone: input.phone,
            is_child: input.is_child.unwrap_or(false),
        };

        let row = service::create(&state.db, data)
            .await
            .map_err(|e| e.extend())?;
        Ok(row.into())
    }

    /// Partially update a guest (admin only)
    async fn update_guest(&self, ctx: &Context<'_>, input: UpdateGuestInput) -> Result<Guest> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&input.id, "guest")?;

        let data = UpdateGuest {
            title: input.title,
            first_name: input.first_name,
            last_name: input.last_name,
            suffix: input.suffix,
            email: input.email,
            phone: input.phone,
            rsvp_status: input.rsvp_status.map(Into::into),
            meal: input.meal,
            dietary_restrictions: input.dietary_restrictions,
            is_child: input.is_child,
        };

        let row = service::update(&state.db, state.event_config(), id, data)
            .await
            .map_err(|e| e.extend())?;
        Ok(row.into())
    }

    /// Delete a guest (admin only)
    async fn delete_guest(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id, "guest")?;

        service::delete(&state.db, id)
            .await
            .map_err(|e| e.extend())?;
        Ok(true)
    }

    /// Move a guest into another group, or out of any group (admin only)
    async fn set_guest_group(&self, ctx: &Context<'_>, input: SetGuestGroupInput) -> Result<Guest> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let guest_id = parse_id(&input.guest_id, "guest")?;
        let group_id = input
            .group_id
            .as_ref()
            .map(|id| parse_id(id, "group"))
            .transpose()?;

        let row = service::set_group(&state.db, guest_id, group_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(row.into())
    }
}
