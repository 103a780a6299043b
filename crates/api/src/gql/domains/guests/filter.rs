//! Admin guest-list filtering.
//!
//! The database narrows rows by the columns it indexes; everything else is
//! decided here so list views and exports agree on what a filter means.

use infra::models::GuestRow;
use infra::repos::{GuestFilter, RsvpStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeatingState {
    #[default]
    Any,
    Seated,
    Unseated,
}

impl From<Option<bool>> for SeatingState {
    fn from(seated: Option<bool>) -> Self {
        match seated {
            None => SeatingState::Any,
            Some(true) => SeatingState::Seated,
            Some(false) => SeatingState::Unseated,
        }
    }
}

/// Every condition that is set must hold.
#[derive(Debug, Clone, Default)]
pub struct GuestListFilter {
    pub rsvp_status: Option<RsvpStatus>,
    pub seating: SeatingState,
    pub table_number: Option<i32>,
    pub is_child: Option<bool>,
    pub has_dietary_restrictions: Option<bool>,
    /// Case-insensitive exact meal name.
    pub meal: Option<String>,
    /// Case-insensitive substring of the full name.
    pub name_contains: Option<String>,
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl GuestListFilter {
    pub fn matches(&self, guest: &GuestRow) -> bool {
        if self.rsvp_status.is_some_and(|s| s != guest.rsvp_status) {
            return false;
        }

        let seated_ok = match self.seating {
            SeatingState::Any => true,
            SeatingState::Seated => guest.table_number.is_some(),
            SeatingState::Unseated => guest.table_number.is_none(),
        };
        if !seated_ok {
            return false;
        }

        if self.table_number.is_some() && self.table_number != guest.table_number {
            return false;
        }
        if self.is_child.is_some_and(|c| c != guest.is_child) {
            return false;
        }
        if let Some(wanted) = self.has_dietary_restrictions {
            if wanted != has_text(guest.dietary_restrictions.as_deref()) {
                return false;
            }
        }

        if let Some(meal) = self.meal.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            let same = guest
                .meal
                .as_deref()
                .is_some_and(|m| m.trim().eq_ignore_ascii_case(meal));
            if !same {
                return false;
            }
        }

        if let Some(needle) = self
            .name_contains
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            let needle = needle.to_lowercase();
            if !guest.full_name().to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, guests: Vec<GuestRow>) -> Vec<GuestRow> {
        guests.into_iter().filter(|g| self.matches(g)).collect()
    }

    /// The part of the filter pushed down to SQL.
    pub fn row_filter(&self) -> GuestFilter {
        GuestFilter {
            group_id: None,
            table_number: self.table_number,
            rsvp_status: self.rsvp_status,
            seated: match self.seating {
                SeatingState::Any => None,
                SeatingState::Seated => Some(true),
                SeatingState::Unseated => Some(false),
            },
        }
    }
}
