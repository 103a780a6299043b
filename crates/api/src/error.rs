use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Failures of guest, group and seating operations. Every variant carries
/// enough detail to render a message to the person who made the request.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Table {0} does not exist; tables are numbered 1 to {max}", max = infra::TABLE_COUNT)]
    InvalidTable(i32),

    #[error("{}", guests_not_found_message(.0))]
    GuestsNotFound(Vec<Uuid>),

    #[error("Group not found")]
    GroupNotFound(Uuid),

    #[error(
        "Table {table_number} has {current} of {capacity} seats taken; cannot seat {requested} more"
    )]
    CapacityExceeded {
        table_number: i32,
        current: i64,
        requested: i64,
        capacity: i64,
    },

    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

fn guests_not_found_message(ids: &[Uuid]) -> String {
    match ids.len() {
        0 => "No guests were specified".to_string(),
        1 => format!("Guest {} not found", ids[0]),
        n => format!("{n} guests not found"),
    }
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidTable(_) => "INVALID_TABLE",
            DomainError::GuestsNotFound(_) => "GUESTS_NOT_FOUND",
            DomainError::GroupNotFound(_) => "GROUP_NOT_FOUND",
            DomainError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::Database(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for DomainError {
    fn extend(&self) -> async_graphql::Error {
        let message = match self {
            DomainError::Database(e) => {
                tracing::error!("Database error: {e}");
                "Internal database error".to_string()
            }
            other => other.to_string(),
        };

        async_graphql::Error::new(message).extend_with(|_, e| {
            e.set("code", self.code());
            match self {
                DomainError::InvalidTable(number) => e.set("tableNumber", *number),
                DomainError::GuestsNotFound(ids) => e.set(
                    "guestIds",
                    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                ),
                DomainError::GroupNotFound(id) => e.set("groupId", id.to_string()),
                DomainError::CapacityExceeded {
                    table_number,
                    current,
                    requested,
                    capacity,
                } => {
                    e.set("tableNumber", *table_number);
                    e.set("current", *current);
                    e.set("requested", *requested);
                    e.set("capacity", *capacity);
                }
                DomainError::Validation(_) | DomainError::Database(_) => {}
            }
        })
    }
}
