use async_graphql::ID;
use uuid::Uuid;

use crate::gql::error::ResultExt;
use infra::models::GuestRow;

pub fn parse_id(id: &ID, what: &str) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(id.as_str()).gql_err(&format!("Invalid {what} ID"))
}

/// Parse a list of IDs, dropping duplicates but keeping first-seen order.
pub fn parse_ids(ids: &[ID], what: &str) -> async_graphql::Result<Vec<Uuid>> {
    let mut parsed = Vec::with_capacity(ids.len());
    for id in ids {
        let uuid = parse_id(id, what)?;
        if !parsed.contains(&uuid) {
            parsed.push(uuid);
        }
    }
    Ok(parsed)
}

/// Trim a free-text field; blank becomes `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Name shown for a group: its own name, else one built from its members.
pub fn group_display_name(name: Option<&str>, members: &[GuestRow]) -> String {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    match members {
        [] => "Unnamed group".to_string(),
        [only] => only.full_name(),
        [first, second] => format!("{} & {}", first.full_name(), second.full_name()),
        [first, rest @ ..] => format!("{} & {} others", first.full_name(), rest.len()),
    }
}
