pub mod models;
pub mod pagination;
pub mod repos;

/// Maximum number of guests seated at one table.
pub const TABLE_CAPACITY: i64 = 10;

/// Tables are numbered `1..=TABLE_COUNT`.
pub const TABLE_COUNT: i32 = 20;

/// Whether `number` names one of the venue's tables.
pub fn is_valid_table_number(number: i32) -> bool {
    (1..=TABLE_COUNT).contains(&number)
}
