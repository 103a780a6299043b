//! Floor plan positions, stored as one JSON document in `app_settings`:
//! `{"<table number>": {"x": 0.25, "y": 0.5}, ...}` with coordinates in [0, 1].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::PgPool;

use infra::is_valid_table_number;
use infra::repos::settings::{self, FLOOR_LAYOUT_KEY};

use crate::error::DomainError;

/// Canvas size older layouts were saved against, in pixels.
pub const LEGACY_CANVAS_WIDTH: f64 = 1200.0;
pub const LEGACY_CANVAS_HEIGHT: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Table number to position, ordered by table.
pub type FloorLayout = BTreeMap<i32, Point>;

/// Bring a stored point into [0, 1]. Points with either coordinate above 1
/// are legacy pixel positions.
pub fn normalize_point(point: Point) -> Point {
    let (x, y) = if point.x > 1.0 || point.y > 1.0 {
        (point.x / LEGACY_CANVAS_WIDTH, point.y / LEGACY_CANVAS_HEIGHT)
    } else {
        (point.x, point.y)
    };
    Point {
        x: x.clamp(0.0, 1.0),
        y: y.clamp(0.0, 1.0),
    }
}

/// Read a stored document, skipping entries that do not name a valid table
/// or are not an `{"x", "y"}` object with finite coordinates.
pub fn decode_layout(value: &Value) -> FloorLayout {
    let Some(entries) = value.as_object() else {
        return FloorLayout::new();
    };

    entries
        .iter()
        .filter_map(|(key, entry)| {
            let number: i32 = key.trim().parse().ok()?;
            if !is_valid_table_number(number) {
                return None;
            }
            // serde would also accept the `[x, y]` sequence form of a struct
            entry.as_object()?;
            let point: Point = serde_json::from_value(entry.clone()).ok()?;
            if !point.x.is_finite() || !point.y.is_finite() {
                return None;
            }
            Some((number, normalize_point(point)))
        })
        .collect()
}

pub fn encode_layout(layout: &FloorLayout) -> Value {
    let mut entries = Map::new();
    for (number, point) in layout {
        let mut coords = Map::new();
        coords.insert("x".to_string(), Value::from(point.x));
        coords.insert("y".to_string(), Value::from(point.y));
        entries.insert(number.to_string(), Value::Object(coords));
    }
    Value::Object(entries)
}

/// Check a full set of positions submitted by the floor plan editor.
pub fn validate_positions(positions: &[(i32, Point)]) -> Result<FloorLayout, DomainError> {
    let mut layout = FloorLayout::new();
    for (number, point) in positions {
        if !is_valid_table_number(*number) {
            return Err(DomainError::InvalidTable(*number));
        }
        let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_range(point.x) || !in_range(point.y) {
            return Err(DomainError::validation(format!(
                "Position for table {number} must lie between 0 and 1"
            )));
        }
        if layout.insert(*number, *point).is_some() {
            return Err(DomainError::validation(format!(
                "Table {number} appears more than once"
            )));
        }
    }
    Ok(layout)
}

pub async fn load(pool: &PgPool) -> Result<FloorLayout, DomainError> {
    let stored = settings::get(pool, FLOOR_LAYOUT_KEY).await?;
    Ok(stored
        .map(|row| decode_layout(&row.value))
        .unwrap_or_default())
}

/// Replace the stored layout with `positions`.
pub async fn save(pool: &PgPool, positions: &[(i32, Point)]) -> Result<FloorLayout, DomainError> {
    let layout = validate_positions(positions)?;
    settings::put(pool, FLOOR_LAYOUT_KEY, encode_layout(&layout)).await?;
    tracing::info!(tables = layout.len(), "floor layout saved");
    Ok(layout)
}
