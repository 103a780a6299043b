use async_graphql::{Enum, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use infra::TABLE_CAPACITY;

use crate::gql::common::{Group, Guest};

use super::service::{AssignmentOutcome, TableSummary};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SeatingEventType {
    GuestsSeated,
    GuestsUnseated,
    TableRenamed,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct WeddingTable {
    pub number: i32,
    pub nickname: Option<String>,
    pub capacity: i32,
    pub occupancy: i32,
    pub available_seats: i32,
    pub is_full: bool,
    pub guests: Vec<Guest>,
}

impl From<TableSummary> for WeddingTable {
    fn from(summary: TableSummary) -> Self {
        let occupancy = summary.guests.len() as i32;
        let capacity = TABLE_CAPACITY as i32;
        Self {
            number: summary.table.number,
            nickname: summary.table.nickname,
            capacity,
            occupancy,
            available_seats: (capacity - occupancy).max(0),
            is_full: occupancy >= capacity,
            guests: summary.guests.into_iter().map(Guest::from).collect(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct SeatingResult {
    /// Table the guests now sit at; null when the assignment was cleared.
    pub table_number: Option<i32>,
    /// Guests whose table actually changed.
    pub moved_count: i32,
    /// Groups touched by the request, with every member's current table.
    pub groups: Vec<Group>,
    pub ungrouped_guests: Vec<Guest>,
}

impl From<AssignmentOutcome> for SeatingResult {
    fn from(outcome: AssignmentOutcome) -> Self {
        Self {
            table_number: outcome.table_number,
            moved_count: outcome.moved as i32,
            groups: outcome.groups.into_iter().map(Group::from).collect(),
            ungrouped_guests: outcome
                .ungrouped_guests
                .into_iter()
                .map(Guest::from)
                .collect(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct SeatingChangeEvent {
    pub event_type: SeatingEventType,
    pub table_number: Option<i32>,
    /// Tables the guests were moved away from.
    pub previous_tables: Vec<i32>,
    pub guest_ids: Vec<ID>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// Input types

/// Who to seat: `groupId` alone seats the whole group, `groupId` with
/// `guestIds` seats only those members, `guestIds` alone seats exactly those
/// guests.
#[derive(InputObject)]
pub struct AssignSeatsInput {
    pub group_id: Option<ID>,
    pub guest_ids: Option<Vec<ID>>,
    /// 1 to 20; null clears the assignment.
    pub table_number: Option<i32>,
}

#[derive(InputObject)]
pub struct SetTableNicknameInput {
    pub table_number: i32,
    /// Blank or null removes the nickname.
    pub nickname: Option<String>,
}
