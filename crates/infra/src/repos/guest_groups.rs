use std::collections::HashMap;

use crate::models::{GroupWithMembers, GuestGroupRow, GuestRow};
use crate::repos::guests;
use sqlx::{PgExecutor, PgPool, Result as SqlxResult};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct GroupDetails {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: GroupDetails,
) -> SqlxResult<GuestGroupRow> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        INSERT INTO guest_groups (
            name, address_line1, address_line2, city, state, postal_code, country, email, phone
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, address_line1, address_line2, city, state, postal_code, country,
                  email, phone, created_at, updated_at
        "#,
    )
    .bind(data.name)
    .bind(data.address_line1)
    .bind(data.address_line2)
    .bind(data.city)
    .bind(data.state)
    .bind(data.postal_code)
    .bind(data.country)
    .bind(data.email)
    .bind(data.phone)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<GuestGroupRow>> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        SELECT id, name, address_line1, address_line2, city, state, postal_code, country,
               email, phone, created_at, updated_at
        FROM guest_groups
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Lock a group row so concurrent membership or seating changes serialize.
pub async fn lock<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<GuestGroupRow>> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        SELECT id, name, address_line1, address_line2, city, state, postal_code, country,
               email, phone, created_at, updated_at
        FROM guest_groups
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<GuestGroupRow>> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        SELECT id, name, address_line1, address_line2, city, state, postal_code, country,
               email, phone, created_at, updated_at
        FROM guest_groups
        ORDER BY name ASC NULLS LAST, created_at ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn list_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
) -> SqlxResult<Vec<GuestGroupRow>> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        SELECT id, name, address_line1, address_line2, city, state, postal_code, country,
               email, phone, created_at, updated_at
        FROM guest_groups
        WHERE id = ANY($1::uuid[])
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await
}

/// Overwrite every detail column. Callers merge partial input beforehand.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: GroupDetails,
) -> SqlxResult<Option<GuestGroupRow>> {
    sqlx::query_as::<_, GuestGroupRow>(
        r#"
        UPDATE guest_groups
        SET name = $2,
            address_line1 = $3,
            address_line2 = $4,
            city = $5,
            state = $6,
            postal_code = $7,
            country = $8,
            email = $9,
            phone = $10,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, address_line1, address_line2, city, state, postal_code, country,
                  email, phone, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.name)
    .bind(data.address_line1)
    .bind(data.address_line2)
    .bind(data.city)
    .bind(data.state)
    .bind(data.postal_code)
    .bind(data.country)
    .bind(data.email)
    .bind(data.phone)
    .fetch_optional(executor)
    .await
}

/// Delete a group. Members stay, with `group_id` set to NULL by the foreign key.
pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM guest_groups WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_with_members(pool: &PgPool, id: Uuid) -> SqlxResult<Option<GroupWithMembers>> {
    let mut groups = list_with_members_by_ids(pool, &[id]).await?;
    Ok(groups.pop())
}

/// Load groups and their members with two queries. Output follows the order of `ids`;
/// unknown ids are skipped.
pub async fn list_with_members_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> SqlxResult<Vec<GroupWithMembers>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let (groups, members) = fetch_groups_and_members(pool, ids).await?;
    Ok(attach_members(ids, groups, members))
}

pub async fn list_with_members(pool: &PgPool) -> SqlxResult<Vec<GroupWithMembers>> {
    let groups = list(pool).await?;
    let ids: Vec<Uuid> = groups.iter().map(|g| g.id).collect();
    let members = guests::list_by_group_ids(pool, &ids).await?;
    Ok(attach_members(&ids, groups, members))
}

async fn fetch_groups_and_members(
    pool: &PgPool,
    ids: &[Uuid],
) -> SqlxResult<(Vec<GuestGroupRow>, Vec<GuestRow>)> {
    let groups = list_by_ids(pool, ids).await?;
    let members = guests::list_by_group_ids(pool, ids).await?;
    Ok((groups, members))
}

fn attach_members(
    order: &[Uuid],
    groups: Vec<GuestGroupRow>,
    members: Vec<GuestRow>,
) -> Vec<GroupWithMembers> {
    let mut by_group: HashMap<Uuid, Vec<GuestRow>> = HashMap::new();
    for member in members {
        if let Some(group_id) = member.group_id {
            by_group.entry(group_id).or_default().push(member);
        }
    }

    let mut groups: HashMap<Uuid, GuestGroupRow> = groups.into_iter().map(|g| (g.id, g)).collect();
    order
        .iter()
        .filter_map(|id| {
            groups.remove(id).map(|group| GroupWithMembers {
                members: by_group.remove(id).unwrap_or_default(),
                group,
            })
        })
        .collect()
}

pub async fn count<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<i64> {
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guest_groups")
        .fetch_one(executor)
        .await?;
    Ok(result.0)
}
