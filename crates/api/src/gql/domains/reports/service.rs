use sqlx::PgPool;

use infra::models::{GuestRow, MealCountRow, RsvpTotalsRow};
use infra::repos::{guest_groups, guests};

use crate::error::DomainError;

/// Label for attending guests who have not picked a meal.
pub const NOT_SELECTED: &str = "Not selected";

#[derive(Debug, Clone)]
pub struct MealReport {
    pub attending: i64,
    pub adults: i64,
    pub children: i64,
    /// Meal label and head count; "Not selected" last.
    pub meals: Vec<(String, i64)>,
    pub dietary: Vec<GuestRow>,
}

#[derive(Debug, Clone)]
pub struct RsvpSummary {
    pub totals: RsvpTotalsRow,
    pub groups: i64,
}

/// Label each count, folding rows that differ only in letter case together.
pub fn label_meal_counts(rows: Vec<MealCountRow>) -> Vec<(String, i64)> {
    let mut meals: Vec<(String, i64)> = Vec::new();
    let mut unselected = 0;

    for row in rows {
        match row.meal.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            None => unselected += row.count,
            Some(meal) => match meals.iter_mut().find(|(m, _)| m.eq_ignore_ascii_case(meal)) {
                Some((_, count)) => *count += row.count,
                None => meals.push((meal.to_string(), row.count)),
            },
        }
    }

    if unselected > 0 {
        meals.push((NOT_SELECTED.to_string(), unselected));
    }
    meals
}

pub async fn meal_report(pool: &PgPool) -> Result<MealReport, DomainError> {
    let totals = guests::totals(pool).await?;
    let meals = label_meal_counts(guests::meal_counts(pool).await?);
    let dietary = guests::list_attending_with_dietary(pool).await?;

    Ok(MealReport {
        attending: totals.attending,
        adults: totals.attending - totals.children_attending,
        children: totals.children_attending,
        meals,
        dietary,
    })
}

pub async fn rsvp_summary(pool: &PgPool) -> Result<RsvpSummary, DomainError> {
    let totals = guests::totals(pool).await?;
    let groups = guest_groups::count(pool).await?;
    Ok(RsvpSummary { totals, groups })
}
