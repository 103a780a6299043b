use crate::repos::guests::RsvpStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GuestRow {
    pub id: Uuid,
    pub group_id: Option<Uuid>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
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

impl GuestRow {
    /// "Dr. Jane Smith Jr." style name, skipping empty parts.
    pub fn full_name(&self) -> String {
        [
            self.title.as_deref(),
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GuestGroupRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A group together with its members, ordered by last then first name.
#[derive(Debug, Clone)]
pub struct GroupWithMembers {
    pub group: GuestGroupRow,
    pub members: Vec<GuestRow>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WeddingTableRow {
    pub number: i32,
    pub nickname: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MealCountRow {
    pub meal: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct RsvpTotalsRow {
    pub total: i64,
    pub pending: i64,
    pub attending: i64,
    pub declined: i64,
    pub seated: i64,
    pub unseated_attending: i64,
    pub children_attending: i64,
}
