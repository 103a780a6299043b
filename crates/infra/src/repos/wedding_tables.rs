use crate::models::WeddingTableRow;
use sqlx::{PgExecutor, Result as SqlxResult};

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<WeddingTableRow>> {
    sqlx::query_as::<_, WeddingTableRow>(
        r#"
        SELECT number, nickname, updated_at
        FROM wedding_tables
        ORDER BY number ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    number: i32,
) -> SqlxResult<Option<WeddingTableRow>> {
    sqlx::query_as::<_, WeddingTableRow>(
        r#"
        SELECT number, nickname, updated_at
        FROM wedding_tables
        WHERE number = $1
        "#,
    )
    .bind(number)
    .fetch_optional(executor)
    .await
}

/// Lock one table row for the rest of the transaction. Seating changes that
/// target the same table serialize on this lock.
pub async fn lock<'e>(
    executor: impl PgExecutor<'e>,
    number: i32,
) -> SqlxResult<Option<WeddingTableRow>> {
    sqlx::query_as::<_, WeddingTableRow>(
        r#"
        SELECT number, nickname, updated_at
        FROM wedding_tables
        WHERE number = $1
        FOR UPDATE
        "#,
    )
    .bind(number)
    .fetch_optional(executor)
    .await
}

pub async fn upsert_nickname<'e>(
    executor: impl PgExecutor<'e>,
    number: i32,
    nickname: Option<String>,
) -> SqlxResult<WeddingTableRow> {
    sqlx::query_as::<_, WeddingTableRow>(
        r#"
        INSERT INTO wedding_tables (number, nickname)
        VALUES ($1, $2)
        ON CONFLICT (number) DO UPDATE
        SET nickname = EXCLUDED.nickname,
            updated_at = NOW()
        RETURNING number, nickname, updated_at
        "#,
    )
    .bind(number)
    .bind(nickname)
    .fetch_one(executor)
    .await
}
