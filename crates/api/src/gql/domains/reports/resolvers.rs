use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::auth::permissions::require_admin;
use crate::state::AppState;

use super::service;
use super::types::{MealReport, RsvpSummary};

#[derive(Default)]
pub struct ReportQuery;

#[Object]
impl ReportQuery {
    /// Meal counts and dietary notes for attending guests (admin only)
    async fn meal_report(&self, ctx: &Context<'_>) -> Result<MealReport> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let report = service::meal_report(&state.db)
            .await
            .map_err(|e| e.extend())?;
        Ok(report.into())
    }

    /// RSVP and seating totals (admin only)
    async fn rsvp_summary(&self, ctx: &Context<'_>) -> Result<RsvpSummary> {
        require_admin(ctx)?;
        let state = ctx.data::<AppState>()?;

        let summary = service::rsvp_summary(&state.db)
            .await
            .map_err(|e| e.extend())?;
        Ok(summary.into())
    }
}
