use async_graphql::{InputObject, SimpleObject};

use super::service::{FloorLayout, Point};

#[derive(SimpleObject, Clone, Debug)]
pub struct TablePosition {
    pub table_number: i32,
    /// Fraction of the floor width, 0 to 1.
    pub x: f64,
    /// Fraction of the floor height, 0 to 1.
    pub y: f64,
}

pub fn positions_of(layout: FloorLayout) -> Vec<TablePosition> {
    layout
        .into_iter()
        .map(|(table_number, point)| TablePosition {
            table_number,
            x: point.x,
            y: point.y,
        })
        .collect()
}

#[derive(InputObject)]
pub struct TablePositionInput {
    pub table_number: i32,
    pub x: f64,
    pub y: f64,
}

impl TablePositionInput {
    pub fn entry(&self) -> (i32, Point) {
        (
            self.table_number,
            Point {
                x: self.x,
                y: self.y,
            },
        )
    }
}
