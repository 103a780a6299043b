use async_graphql::{Enum, SimpleObject, ID};
use chrono::{DateTime, Utc};

use infra::models::{GroupWithMembers, GuestRow};
use infra::repos::guests::RsvpStatus as RsvpStatusRow;

use super::helpers::group_display_name;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum RsvpStatus {
    #[graphql(name = "PENDING")]
    Pending,
    #[graphql(name = "YES")]
    Yes,
    #[graphql(name = "NO")]
    No,
}

impl From<RsvpStatusRow> for RsvpStatus {
    fn from(status: RsvpStatusRow) -> Self {
        match status {
            RsvpStatusRow::Pending => RsvpStatus::Pending,
            RsvpStatusRow::Yes => RsvpStatus::Yes,
            RsvpStatusRow::No => RsvpStatus::No,
        }
    }
}

impl From<RsvpStatus> for RsvpStatusRow {
    fn from(status: RsvpStatus) -> Self {
        match status {
            RsvpStatus::Pending => RsvpStatusRow::Pending,
            RsvpStatus::Yes => RsvpStatusRow::Yes,
            RsvpStatus::No => RsvpStatusRow::No,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Guest {
    pub id: ID,
    pub group_id: Option<ID>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub table_number: Option<i32>,
    pub meal: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub is_child: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Self {
            full_name: row.full_name(),
            id: row.id.into(),
            group_id: row.group_id.map(|id| id.into()),
            title: row.title,
            first_name: row.first_name,
            last_name: row.last_name,
            suffix: row.suffix,
            email: row.email,
            phone: row.phone,
            rsvp_status: row.rsvp_status.into(),
            table_number: row.table_number,
            meal: row.meal,
            dietary_restrictions: row.dietary_restrictions,
            is_child: row.is_child,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Group {
    pub id: ID,
    pub name: Option<String>,
    /// `name` when set, otherwise derived from the members.
    pub display_name: String,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Members ordered by last name, then first name.
    pub guests: Vec<Guest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupWithMembers> for Group {
    fn from(value: GroupWithMembers) -> Self {
        let GroupWithMembers { group, members } = value;
        Self {
            display_name: group_display_name(group.name.as_deref(), &members),
            id: group.id.into(),
            name: group.name,
            address_line1: group.address_line1,
            address_line2: group.address_line2,
            city: group.city,
            state: group.state,
            postal_code: group.postal_code,
            country: group.country,
            email: group.email,
            phone: group.phone,
            guests: members.into_iter().map(Guest::from).collect(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}
