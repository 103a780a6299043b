use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use infra::models::{GroupWithMembers, GuestRow, WeddingTableRow};
use infra::repos::{guest_groups, guests, wedding_tables};
use infra::{is_valid_table_number, TABLE_CAPACITY};

use crate::error::DomainError;

/// Longest nickname accepted for a table.
pub const MAX_NICKNAME_LEN: usize = 60;

/// Which guests a seating request moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatingTarget {
    Guests(Vec<Uuid>),
    WholeGroup(Uuid),
    GroupSubset { group_id: Uuid, member_ids: Vec<Uuid> },
}

impl SeatingTarget {
    /// `{groupId}` seats the whole group, `{groupId, guestIds}` a subset of it,
    /// `{guestIds}` exactly those guests.
    pub fn from_request(
        group_id: Option<Uuid>,
        guest_ids: Option<Vec<Uuid>>,
    ) -> Result<Self, DomainError> {
        match (group_id, guest_ids) {
            (Some(group_id), None) => Ok(SeatingTarget::WholeGroup(group_id)),
            (_, Some(ids)) if ids.is_empty() => Err(DomainError::GuestsNotFound(Vec::new())),
            (Some(group_id), Some(member_ids)) => Ok(SeatingTarget::GroupSubset {
                group_id,
                member_ids,
            }),
            (None, Some(ids)) => Ok(SeatingTarget::Guests(ids)),
            (None, None) => Err(DomainError::validation(
                "Provide a groupId, guestIds, or both",
            )),
        }
    }
}

/// Result of a committed seating change, reloaded after commit.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub table_number: Option<i32>,
    pub guest_ids: Vec<Uuid>,
    /// Guests whose table actually changed.
    pub moved: i64,
    /// Tables the moved guests left, ascending.
    pub previous_tables: Vec<i32>,
    pub groups: Vec<GroupWithMembers>,
    pub ungrouped_guests: Vec<GuestRow>,
}

/// A table with the guests seated at it.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table: WeddingTableRow,
    pub guests: Vec<GuestRow>,
}

pub fn validate_table(table_number: Option<i32>) -> Result<(), DomainError> {
    match table_number {
        Some(n) if !is_valid_table_number(n) => Err(DomainError::InvalidTable(n)),
        _ => Ok(()),
    }
}

/// Decide whether a batch fits at `table_number`.
///
/// `others_seated` counts guests at the table that are not in the batch;
/// `current_tables` holds each batch member's current table. Members already
/// at the table cost nothing. Returns how many seats the batch newly takes.
pub fn check_capacity(
    table_number: i32,
    others_seated: i64,
    current_tables: &[Option<i32>],
) -> Result<i64, DomainError> {
    let to_add = current_tables
        .iter()
        .filter(|current| **current != Some(table_number))
        .count() as i64;
    if to_add == 0 {
        return Ok(0);
    }

    let already_there = current_tables.len() as i64 - to_add;
    let current = others_seated + already_there;
    if current + to_add > TABLE_CAPACITY {
        return Err(DomainError::CapacityExceeded {
            table_number,
            current,
            requested: to_add,
            capacity: TABLE_CAPACITY,
        });
    }

    Ok(to_add)
}

fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

pub async fn assign_target(
    pool: &PgPool,
    target: SeatingTarget,
    table_number: Option<i32>,
) -> Result<AssignmentOutcome, DomainError> {
    match target {
        SeatingTarget::Guests(ids) => assign(pool, table_number, &ids).await,
        SeatingTarget::WholeGroup(group_id) => {
            assign_whole_group(pool, group_id, table_number).await
        }
        SeatingTarget::GroupSubset {
            group_id,
            member_ids,
        } => assign_subset_of_group(pool, group_id, &member_ids, table_number).await,
    }
}

/// Seat `guest_ids` at `table_number`, or clear their table when `None`.
/// All or nothing: a rejected batch leaves every assignment untouched.
pub async fn assign(
    pool: &PgPool,
    table_number: Option<i32>,
    guest_ids: &[Uuid],
) -> Result<AssignmentOutcome, DomainError> {
    validate_table(table_number)?;
    let ids = dedupe(guest_ids);
    if ids.is_empty() {
        return Err(DomainError::GuestsNotFound(Vec::new()));
    }

    let mut tx = pool.begin().await?;
    lock_table(&mut tx, table_number).await?;

    let rows = guests::lock_by_ids(&mut *tx, &ids).await?;
    let missing: Vec<Uuid> = ids
        .iter()
        .filter(|id| !rows.iter().any(|row| row.id == **id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::GuestsNotFound(missing));
    }

    let moved = seat_locked(&mut tx, table_number, &rows).await?;
    tx.commit().await?;

    finish(pool, table_number, rows, moved).await
}

/// Seat every member of a group. Members already at the table cost nothing.
pub async fn assign_whole_group(
    pool: &PgPool,
    group_id: Uuid,
    table_number: Option<i32>,
) -> Result<AssignmentOutcome, DomainError> {
    validate_table(table_number)?;

    let mut tx = pool.begin().await?;
    lock_table(&mut tx, table_number).await?;
    guest_groups::lock(&mut *tx, group_id)
        .await?
        .ok_or(DomainError::GroupNotFound(group_id))?;

    let rows = guests::lock_by_group(&mut *tx, group_id).await?;
    if rows.is_empty() {
        return Err(DomainError::validation("This group has no guests to seat"));
    }

    let moved = seat_locked(&mut tx, table_number, &rows).await?;
    tx.commit().await?;

    finish(pool, table_number, rows, moved).await
}

/// Seat only `member_ids` of a group; other members keep their tables.
pub async fn assign_subset_of_group(
    pool: &PgPool,
    group_id: Uuid,
    member_ids: &[Uuid],
    table_number: Option<i32>,
) -> Result<AssignmentOutcome, DomainError> {
    validate_table(table_number)?;
    let ids = dedupe(member_ids);
    if ids.is_empty() {
        return Err(DomainError::GuestsNotFound(Vec::new()));
    }

    let mut tx = pool.begin().await?;
    lock_table(&mut tx, table_number).await?;
    guest_groups::lock(&mut *tx, group_id)
        .await?
        .ok_or(DomainError::GroupNotFound(group_id))?;

    let rows = guests::lock_by_ids(&mut *tx, &ids).await?;
    let not_members: Vec<Uuid> = ids
        .iter()
        .filter(|id| {
            !rows
                .iter()
                .any(|row| row.id == **id && row.group_id == Some(group_id))
        })
        .copied()
        .collect();
    if !not_members.is_empty() {
        return Err(DomainError::GuestsNotFound(not_members));
    }

    let moved = seat_locked(&mut tx, table_number, &rows).await?;
    tx.commit().await?;

    finish(pool, table_number, rows, moved).await
}

/// Take the target table's row lock. Concurrent requests for the same table
/// queue here, so the count below cannot go stale before the update.
async fn lock_table(
    tx: &mut Transaction<'_, Postgres>,
    table_number: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(number) = table_number {
        wedding_tables::lock(&mut **tx, number)
            .await?
            .ok_or(DomainError::InvalidTable(number))?;
    }
    Ok(())
}

/// Capacity check and update for rows already locked in `tx`.
async fn seat_locked(
    tx: &mut Transaction<'_, Postgres>,
    table_number: Option<i32>,
    rows: &[GuestRow],
) -> Result<i64, DomainError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let moved = match table_number {
        Some(number) => {
            let others = guests::count_at_table_excluding(&mut **tx, number, &ids).await?;
            let current: Vec<Option<i32>> = rows.iter().map(|row| row.table_number).collect();
            check_capacity(number, others, &current)?
        }
        None => rows.iter().filter(|row| row.table_number.is_some()).count() as i64,
    };

    if moved > 0 {
        guests::set_table_number(&mut **tx, &ids, table_number).await?;
    }
    Ok(moved)
}

async fn finish(
    pool: &PgPool,
    table_number: Option<i32>,
    rows: Vec<GuestRow>,
    moved: i64,
) -> Result<AssignmentOutcome, DomainError> {
    let guest_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let mut previous_tables: Vec<i32> = rows
        .iter()
        .filter_map(|row| row.table_number)
        .filter(|number| Some(*number) != table_number)
        .collect();
    previous_tables.sort_unstable();
    previous_tables.dedup();

    let mut group_ids: Vec<Uuid> = Vec::new();
    let mut ungrouped_ids: Vec<Uuid> = Vec::new();
    for row in &rows {
        match row.group_id {
            Some(id) if !group_ids.contains(&id) => group_ids.push(id),
            Some(_) => {}
            None => ungrouped_ids.push(row.id),
        }
    }

    let groups = guest_groups::list_with_members_by_ids(pool, &group_ids).await?;
    let ungrouped_guests = if ungrouped_ids.is_empty() {
        Vec::new()
    } else {
        guests::list_by_ids(pool, &ungrouped_ids).await?
    };

    tracing::info!(
        table_number = ?table_number,
        guests = guest_ids.len(),
        moved,
        "seating updated"
    );

    Ok(AssignmentOutcome {
        table_number,
        guest_ids,
        moved,
        previous_tables,
        groups,
        ungrouped_guests,
    })
}

pub async fn list_tables(pool: &PgPool) -> Result<Vec<TableSummary>, DomainError> {
    let tables = wedding_tables::list(pool).await?;
    let seated = guests::list_seated(pool).await?;

    Ok(tables
        .into_iter()
        .map(|table| TableSummary {
            guests: seated
                .iter()
                .filter(|g| g.table_number == Some(table.number))
                .cloned()
                .collect(),
            table,
        })
        .collect())
}

pub async fn get_table(pool: &PgPool, number: i32) -> Result<TableSummary, DomainError> {
    validate_table(Some(number))?;
    let table = wedding_tables::get(pool, number)
        .await?
        .ok_or(DomainError::InvalidTable(number))?;
    let guests = guests::list_at_table(pool, number).await?;
    Ok(TableSummary { table, guests })
}

/// Trim a nickname; blank clears it.
pub fn normalize_nickname(nickname: Option<String>) -> Result<Option<String>, DomainError> {
    let nickname = nickname
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    if let Some(n) = &nickname {
        if n.chars().count() > MAX_NICKNAME_LEN {
            return Err(DomainError::validation(format!(
                "Table nicknames are limited to {MAX_NICKNAME_LEN} characters"
            )));
        }
    }
    Ok(nickname)
}

pub async fn set_nickname(
    pool: &PgPool,
    number: i32,
    nickname: Option<String>,
) -> Result<TableSummary, DomainError> {
    validate_table(Some(number))?;
    let nickname = normalize_nickname(nickname)?;

    let table = wedding_tables::upsert_nickname(pool, number, nickname).await?;
    let guests = guests::list_at_table(pool, number).await?;
    Ok(TableSummary { table, guests })
}
