use crate::{
    models::{GuestRow, MealCountRow, RsvpTotalsRow},
    pagination::LimitOffset,
};
use sqlx::{PgExecutor, Result as SqlxResult};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize)]
#[sqlx(type_name = "rsvp_status", rename_all = "snake_case")]
pub enum RsvpStatus {
    Pending,
    Yes,
    No,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
        }
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RsvpStatus::Pending),
            "yes" => Ok(RsvpStatus::Yes),
            "no" => Ok(RsvpStatus::No),
            _ => Err(format!("Unknown RSVP status: {}", s)),
        }
    }
}

/// Row-level filter understood by the database. Everything is ANDed.
#[derive(Debug, Clone, Default)]
pub struct GuestFilter {
    pub group_id: Option<Uuid>,
    pub table_number: Option<i32>,
    pub rsvp_status: Option<RsvpStatus>,
    /// `Some(true)` = has a table, `Some(false)` = unseated.
    pub seated: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CreateGuest {
    pub group_id: Option<Uuid>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_child: bool,
}

/// Partial update. For the clearable text fields an empty string stores NULL,
/// `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateGuest {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<RsvpStatus>,
    pub meal: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub is_child: Option<bool>,
}

/// One first/last name combination to look up. `first_names` are lowercase
/// alias expansions, `last_name` is lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    pub first_names: Vec<String>,
    pub last_name: String,
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateGuest) -> SqlxResult<GuestRow> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        INSERT INTO guests (group_id, title, first_name, last_name, suffix, email, phone, is_child)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
                  table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        "#,
    )
    .bind(data.group_id)
    .bind(data.title)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.suffix)
    .bind(data.email)
    .bind(data.phone)
    .bind(data.is_child)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: GuestFilter,
    page: Option<LimitOffset>,
) -> SqlxResult<Vec<GuestRow>> {
    let page = page.unwrap_or_default();

    let mut query = sqlx::QueryBuilder::new(
        "SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status, \
         table_number, meal, dietary_restrictions, is_child, created_at, updated_at \
         FROM guests WHERE 1=1",
    );
    push_filter(&mut query, &filter);
    query.push(" ORDER BY last_name ASC, first_name ASC");
    query.push(" LIMIT ");
    query.push_bind(page.limit);
    query.push(" OFFSET ");
    query.push_bind(page.offset);

    query.build_query_as::<GuestRow>().fetch_all(executor).await
}

pub async fn count<'e>(executor: impl PgExecutor<'e>, filter: GuestFilter) -> SqlxResult<i64> {
    let mut query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM guests WHERE 1=1");
    push_filter(&mut query, &filter);

    let result: (i64,) = query.build_query_as().fetch_one(executor).await?;
    Ok(result.0)
}

fn push_filter(query: &mut sqlx::QueryBuilder<'_, sqlx::Postgres>, filter: &GuestFilter) {
    if let Some(group_id) = filter.group_id {
        query.push(" AND group_id = ");
        query.push_bind(group_id);
    }
    if let Some(table_number) = filter.table_number {
        query.push(" AND table_number = ");
        query.push_bind(table_number);
    }
    if let Some(status) = filter.rsvp_status {
        query.push(" AND rsvp_status = ");
        query.push_bind(status);
    }
    match filter.seated {
        Some(true) => {
            query.push(" AND table_number IS NOT NULL");
        }
        Some(false) => {
            query.push(" AND table_number IS NULL");
        }
        None => {}
    }
}

pub async fn list_by_ids<'e>(executor: impl PgExecutor<'e>, ids: &[Uuid]) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE id = ANY($1::uuid[])
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await
}

pub async fn list_by_group_ids<'e>(
    executor: impl PgExecutor<'e>,
    group_ids: &[Uuid],
) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE group_id = ANY($1::uuid[])
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .bind(group_ids)
    .fetch_all(executor)
    .await
}

pub async fn list_at_table<'e>(
    executor: impl PgExecutor<'e>,
    table_number: i32,
) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE table_number = $1
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .bind(table_number)
    .fetch_all(executor)
    .await
}

/// Every guest with a table, ordered by table then name.
pub async fn list_seated<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE table_number IS NOT NULL
        ORDER BY table_number ASC, last_name ASC, first_name ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Lock the given guest rows for the rest of the transaction.
pub async fn lock_by_ids<'e>(executor: impl PgExecutor<'e>, ids: &[Uuid]) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE id = ANY($1::uuid[])
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await
}

/// Lock every member of a group for the rest of the transaction.
pub async fn lock_by_group<'e>(
    executor: impl PgExecutor<'e>,
    group_id: Uuid,
) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE group_id = $1
        ORDER BY id
        FOR UPDATE
        "#,
    )
    .bind(group_id)
    .fetch_all(executor)
    .await
}

/// Guests currently at `table_number` that are not in `excluding`.
pub async fn count_at_table_excluding<'e>(
    executor: impl PgExecutor<'e>,
    table_number: i32,
    excluding: &[Uuid],
) -> SqlxResult<i64> {
    let result: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM guests WHERE table_number = $1 AND NOT (id = ANY($2::uuid[]))",
    )
    .bind(table_number)
    .bind(excluding)
    .fetch_one(executor)
    .await?;

    Ok(result.0)
}

/// Set (or clear, with `None`) the table of every listed guest in one statement.
pub async fn set_table_number<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[Uuid],
    table_number: Option<i32>,
) -> SqlxResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE guests
        SET table_number = $2,
            updated_at = NOW()
        WHERE id = ANY($1::uuid[])
        "#,
    )
    .bind(ids)
    .bind(table_number)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateGuest,
) -> SqlxResult<Option<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        UPDATE guests
        SET title = CASE WHEN $2::text IS NULL THEN title ELSE NULLIF($2, '') END,
            first_name = COALESCE($3, first_name),
            last_name = COALESCE($4, last_name),
            suffix = CASE WHEN $5::text IS NULL THEN suffix ELSE NULLIF($5, '') END,
            email = CASE WHEN $6::text IS NULL THEN email ELSE NULLIF($6, '') END,
            phone = CASE WHEN $7::text IS NULL THEN phone ELSE NULLIF($7, '') END,
            rsvp_status = COALESCE($8, rsvp_status),
            meal = CASE WHEN $9::text IS NULL THEN meal ELSE NULLIF($9, '') END,
            dietary_restrictions = CASE WHEN $10::text IS NULL THEN dietary_restrictions ELSE NULLIF($10, '') END,
            is_child = COALESCE($11, is_child),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
                  table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.title)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.suffix)
    .bind(data.email)
    .bind(data.phone)
    .bind(data.rsvp_status)
    .bind(data.meal)
    .bind(data.dietary_restrictions)
    .bind(data.is_child)
    .fetch_optional(executor)
    .await
}

/// Record one guest's RSVP answer. Meal and dietary text are stored as given.
pub async fn record_rsvp<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    status: RsvpStatus,
    meal: Option<String>,
    dietary_restrictions: Option<String>,
) -> SqlxResult<Option<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        UPDATE guests
        SET rsvp_status = $2,
            meal = $3,
            dietary_restrictions = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
                  table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(meal)
    .bind(dietary_restrictions)
    .fetch_optional(executor)
    .await
}

pub async fn set_group<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    group_id: Option<Uuid>,
) -> SqlxResult<Option<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        UPDATE guests
        SET group_id = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
                  table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(group_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM guests WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Guests whose lowercase last name equals a pair's `last_name` and whose
/// lowercase first name is one of that pair's `first_names`. Pairs are ORed.
pub async fn search_by_name_pairs<'e>(
    executor: impl PgExecutor<'e>,
    pairs: &[NamePair],
    limit: i64,
) -> SqlxResult<Vec<GuestRow>> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = sqlx::QueryBuilder::new(
        "SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status, \
         table_number, meal, dietary_restrictions, is_child, created_at, updated_at \
         FROM guests WHERE ",
    );
    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            query.push(" OR ");
        }
        query.push("(LOWER(last_name) = ");
        query.push_bind(pair.last_name.clone());
        query.push(" AND LOWER(first_name) = ANY(");
        query.push_bind(pair.first_names.clone());
        query.push("::text[]))");
    }
    query.push(" ORDER BY last_name ASC, first_name ASC LIMIT ");
    query.push_bind(limit);

    query.build_query_as::<GuestRow>().fetch_all(executor).await
}

/// Single-token lookup: substring on first or last name, or exact match of
/// the first name against any alias. `pattern` is an escaped `%token%`.
pub async fn search_by_token<'e>(
    executor: impl PgExecutor<'e>,
    pattern: &str,
    first_name_aliases: &[String],
    limit: i64,
) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE first_name ILIKE $1 ESCAPE '\'
           OR LOWER(first_name) = ANY($2::text[])
           OR last_name ILIKE $1 ESCAPE '\'
        ORDER BY last_name ASC, first_name ASC
        LIMIT $3
        "#,
    )
    .bind(pattern)
    .bind(first_name_aliases)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// Meal selections among attending guests. Unselected meals come back as NULL.
pub async fn meal_counts<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<MealCountRow>> {
    sqlx::query_as::<_, MealCountRow>(
        r#"
        SELECT meal, COUNT(*) AS count
        FROM guests
        WHERE rsvp_status = 'yes'
        GROUP BY meal
        ORDER BY meal ASC NULLS LAST
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Attending guests that listed a dietary restriction.
pub async fn list_attending_with_dietary<'e>(
    executor: impl PgExecutor<'e>,
) -> SqlxResult<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(
        r#"
        SELECT id, group_id, title, first_name, last_name, suffix, email, phone, rsvp_status,
               table_number, meal, dietary_restrictions, is_child, created_at, updated_at
        FROM guests
        WHERE rsvp_status = 'yes'
          AND dietary_restrictions IS NOT NULL
          AND BTRIM(dietary_restrictions) <> ''
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn totals<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<RsvpTotalsRow> {
    sqlx::query_as::<_, RsvpTotalsRow>(
        r#"
        SELECT COUNT(*) AS total,
               COUNT(*) FILTER (WHERE rsvp_status = 'pending') AS pending,
               COUNT(*) FILTER (WHERE rsvp_status = 'yes') AS attending,
               COUNT(*) FILTER (WHERE rsvp_status = 'no') AS declined,
               COUNT(*) FILTER (WHERE table_number IS NOT NULL) AS seated,
               COUNT(*) FILTER (WHERE rsvp_status = 'yes' AND table_number IS NULL) AS unseated_attending,
               COUNT(*) FILTER (WHERE rsvp_status = 'yes' AND is_child) AS children_attending
        FROM guests
        "#,
    )
    .fetch_one(executor)
    .await
}
