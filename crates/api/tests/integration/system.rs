use infra::TABLE_COUNT;

use crate::common::*;

#[tokio::test]
async fn test_database_is_migrated_and_empty() {
    let db = setup_test_db().await;

    let tables: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wedding_tables")
        .fetch_one(&db.state.db)
        .await
        .unwrap();
    assert_eq!(tables.0, i64::from(TABLE_COUNT));

    let guests: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests")
        .fetch_one(&db.state.db)
        .await
        .unwrap();
    assert_eq!(guests.0, 0);
}
