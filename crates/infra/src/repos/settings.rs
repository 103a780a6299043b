use crate::models::SettingRow;
use sqlx::{PgExecutor, Result as SqlxResult};

/// Key holding the floor layout document.
pub const FLOOR_LAYOUT_KEY: &str = "floor_layout";

pub async fn get<'e>(executor: impl PgExecutor<'e>, key: &str) -> SqlxResult<Option<SettingRow>> {
    sqlx::query_as::<_, SettingRow>(
        r#"
        SELECT key, value, updated_at
        FROM app_settings
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(executor)
    .await
}

/// Replace the whole value stored under `key`.
pub async fn put<'e>(
    executor: impl PgExecutor<'e>,
    key: &str,
    value: serde_json::Value,
) -> SqlxResult<SettingRow> {
    sqlx::query_as::<_, SettingRow>(
        r#"
        INSERT INTO app_settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value,
            updated_at = NOW()
        RETURNING key, value, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .fetch_one(executor)
    .await
}
