use async_graphql::{SimpleObject, ID};

use super::service;

#[derive(SimpleObject, Clone, Debug)]
pub struct MealCount {
    pub meal: String,
    pub count: i32,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct DietaryNote {
    pub guest_id: ID,
    pub name: String,
    pub table_number: Option<i32>,
    pub restriction: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct MealReport {
    /// Guests who answered YES.
    pub attending: i32,
    pub adults: i32,
    pub children: i32,
    pub meals: Vec<MealCount>,
    /// Attending guests with a dietary restriction, by last then first name.
    pub dietary_restrictions: Vec<DietaryNote>,
}

impl From<service::MealReport> for MealReport {
    fn from(report: service::MealReport) -> Self {
        Self {
            attending: report.attending as i32,
            adults: report.adults as i32,
            children: report.children as i32,
            meals: report
                .meals
                .into_iter()
                .map(|(meal, count)| MealCount {
                    meal,
                    count: count as i32,
                })
                .collect(),
            dietary_restrictions: report
                .dietary
                .into_iter()
                .map(|guest| DietaryNote {
                    guest_id: guest.id.into(),
                    name: guest.full_name(),
                    table_number: guest.table_number,
                    restriction: guest.dietary_restrictions.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct RsvpSummary {
    pub total_guests: i32,
    pub pending: i32,
    pub attending: i32,
    pub declined: i32,
    pub seated: i32,
    pub unseated_attending: i32,
    pub children_attending: i32,
    pub groups: i32,
}

impl From<service::RsvpSummary> for RsvpSummary {
    fn from(summary: service::RsvpSummary) -> Self {
        let totals = summary.totals;
        Self {
            total_guests: totals.total as i32,
            pending: totals.pending as i32,
            attending: totals.attending as i32,
            declined: totals.declined as i32,
            seated: totals.seated as i32,
            unseated_attending: totals.unseated_attending as i32,
            children_attending: totals.children_attending as i32,
            groups: summary.groups as i32,
        }
    }
}
