use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::auth::permissions::require_admin;
use crate::state::AppState;

use super::service::{self, Point};
use super::types::{positions_of, TablePosition, TablePositionInput};

#[derive(Default)]
pub struct LayoutQuery;

#[Object]
impl LayoutQuery {
    /// Saved table positions, ordered by table number (admin only)
    async fn floor_layout(&self, ctx: &Context<'_>) -> Result<Vec<TablePosition>> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let layout = service::load(&state.db).await.map_err(|e| e.extend())?;
        Ok(positions_of(layout))
    }
}

#[derive(Default)]
pub struct LayoutMutation;

#[Object]
impl LayoutMutation {
    /// Replace the whole floor layout (admin only)
    async fn save_floor_layout(
        &self,
        ctx: &Context<'_>,
        positions: Vec<TablePositionInput>,
    ) -> Result<Vec<TablePosition>> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let positions: Vec<(i32, Point)> = positions.iter().map(TablePositionInput::entry).collect();
        let layout = service::save(&state.db, &positions)
            .await
            .map_err(|e| e.extend())?;
        Ok(positions_of(layout))
    }
}
