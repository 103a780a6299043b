use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::auth::permissions::require_admin;
use crate::gql::common::helpers::parse_id;
use crate::gql::common::Group;
use crate::state::AppState;

use super::service;
use super::types::{CreateGroupInput, UpdateGroupInput};

#[derive(Default)]
pub struct GroupQuery;

#[Object]
impl GroupQuery {
    /// All groups with their members (admin only)
    async fn groups(&self, ctx: &Context<'_>) -> Result<Vec<Group>> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let groups = service::list(&state.db).await.map_err(|e| e.extend())?;
        Ok(groups.into_iter().map(Group::from).collect())
    }

    /// Get a group by ID (admin only)
    async fn group(&self, ctx: &Context<'_>, id: ID) -> Result<Group> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id, "group")?;

        let group = service::get(&state.db, id).await.map_err(|e| e.extend())?;
        Ok(group.into())
    }
}

#[derive(Default)]
pub struct GroupMutation;

#[Object]
impl GroupMutation {
    /// Create a group, optionally with its first members (admin only)
    async fn create_group(&self, ctx: &Context<'_>, input: CreateGroupInput) -> Result<Group> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let (details, members) = input.into_parts();
        let group = service::create(&state.db, details, members)
            .await
            .map_err(|e| e.extend())?;
        Ok(group.into())
    }

    /// Update a group's name, address or contact details (admin only)
    async fn update_group(&self, ctx: &Context<'_>, input: UpdateGroupInput) -> Result<Group> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&input.id, "group")?;

        let group = service::update(&state.db, id, input.patch())
            .await
            .map_err(|e| e.extend())?;
        Ok(group.into())
    }

    /// Delete a group; its guests are kept without a group (admin only)
    async fn delete_group(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id, "group")?;

        service::delete(&state.db, id)
            .await
            .map_err(|e| e.extend())?;
        Ok(true)
    }
}
