use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use chrono::Utc;

use crate::auth::permissions::require_admin;
use crate::gql::common::helpers::{parse_id, parse_ids};
use crate::gql::subscriptions::publish_seating_event;
use crate::state::AppState;

use super::service::{self, SeatingTarget};
use super::types::{
    AssignSeatsInput, SeatingChangeEvent, SeatingEventType, SeatingResult, SetTableNicknameInput,
    WeddingTable,
};

#[derive(Default)]
pub struct SeatingQuery;

#[Object]
impl SeatingQuery {
    /// All twenty tables with their seated guests (admin only)
    async fn tables(&self, ctx: &Context<'_>) -> Result<Vec<WeddingTable>> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let tables = service::list_tables(&state.db)
            .await
            .map_err(|e| e.extend())?;

        Ok(tables.into_iter().map(WeddingTable::from).collect())
    }

    /// One table by number (admin only)
    async fn table(&self, ctx: &Context<'_>, number: i32) -> Result<WeddingTable> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let table = service::get_table(&state.db, number)
            .await
            .map_err(|e| e.extend())?;

        Ok(table.into())
    }
}

#[derive(Default)]
pub struct SeatingMutation;

#[Object]
impl SeatingMutation {
    /// Seat guests at a table, or clear their table with a null tableNumber.
    /// The whole batch is applied or nothing is (admin only).
    async fn assign_seats(&self, ctx: &Context<'_>, input: AssignSeatsInput) -> Result<SeatingResult> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let group_id = input
            .group_id
            .as_ref()
            .map(|id| parse_id(id, "group"))
            .transpose()?;
        let guest_ids = input
            .guest_ids
            .as_deref()
            .map(|ids| parse_ids(ids, "guest"))
            .transpose()?;

        let target = SeatingTarget::from_request(group_id, guest_ids).map_err(|e| e.extend())?;
        let outcome = service::assign_target(&state.db, target, input.table_number)
            .await
            .map_err(|e| e.extend())?;

        if outcome.moved > 0 {
            let (event_type, message) = match outcome.table_number {
                Some(number) => (
                    SeatingEventType::GuestsSeated,
                    format!("{} guest(s) seated at table {}", outcome.moved, number),
                ),
                None => (
                    SeatingEventType::GuestsUnseated,
                    format!("{} guest(s) unseated", outcome.moved),
                ),
            };
            publish_seating_event(SeatingChangeEvent {
                event_type,
                table_number: outcome.table_number,
                previous_tables: outcome.previous_tables.clone(),
                guest_ids: outcome.guest_ids.iter().map(|id| ID::from(*id)).collect(),
                message,
                timestamp: Utc::now(),
            });
        }

        Ok(outcome.into())
    }

    /// Set or clear a table's display nickname (admin only)
    async fn set_table_nickname(
        &self,
        ctx: &Context<'_>,
        input: SetTableNicknameInput,
    ) -> Result<WeddingTable> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let table = service::set_nickname(&state.db, input.table_number, input.nickname)
            .await
            .map_err(|e| e.extend())?;

        publish_seating_event(SeatingChangeEvent {
            event_type: SeatingEventType::TableRenamed,
            table_number: Some(table.table.number),
            previous_tables: Vec::new(),
            guest_ids: Vec::new(),
            message: match &table.table.nickname {
                Some(nickname) => format!("Table {} renamed to {}", table.table.number, nickname),
                None => format!("Table {} nickname cleared", table.table.number),
            },
            timestamp: Utc::now(),
        });

        Ok(table.into())
    }
}
