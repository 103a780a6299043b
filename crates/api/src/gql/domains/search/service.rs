use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use infra::models::{GroupWithMembers, GuestRow};
use infra::repos::{guest_groups, guests, NamePair};

use super::aliases::alias_set;
use crate::error::DomainError;

/// Upper bound on matched guest rows per search.
pub const MAX_MATCHES: i64 = 50;

/// How a query is turned into database lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    Empty,
    /// First/last name pairs, tried in both token orders.
    NamePairs(Vec<NamePair>),
    /// One token: substring on either name, or alias match on the first name.
    Token {
        pattern: String,
        first_name_aliases: Vec<String>,
    },
}

/// Split on whitespace, commas and periods, lowercasing each token.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Escape `%`, `_` and `\` so the token is matched literally by `LIKE`.
pub fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn plan_search(query: &str) -> SearchPlan {
    let tokens = tokenize(query);
    match tokens.as_slice() {
        [] => SearchPlan::Empty,
        [token] => SearchPlan::Token {
            pattern: format!("%{}%", escape_like(token)),
            first_name_aliases: alias_set(token).into_iter().collect(),
        },
        [first, .., last] => {
            let pair = |given: &str, family: &str| NamePair {
                first_names: alias_set(given).into_iter().collect(),
                last_name: family.to_string(),
            };
            let mut pairs = vec![pair(first, last)];
            if first != last {
                pairs.push(pair(last, first));
            }
            SearchPlan::NamePairs(pairs)
        }
    }
}

/// One search hit: a real group, or a single groupless guest.
#[derive(Debug, Clone)]
pub enum SearchMatch {
    Group(GroupWithMembers),
    Solo(GuestRow),
}

impl SearchMatch {
    pub fn id(&self) -> Uuid {
        match self {
            SearchMatch::Group(g) => g.group.id,
            SearchMatch::Solo(guest) => guest.id,
        }
    }
}

/// Collapse matched guests into groups in order of first match. Grouped
/// guests are replaced by their group's full member list, loaded in `groups`.
pub fn collect_matches(matched: Vec<GuestRow>, groups: Vec<GroupWithMembers>) -> Vec<SearchMatch> {
    let mut groups: Vec<Option<GroupWithMembers>> = groups.into_iter().map(Some).collect();
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut results = Vec::new();

    for guest in matched {
        match guest.group_id {
            Some(group_id) => {
                if !seen.insert(group_id) {
                    continue;
                }
                let slot = groups
                    .iter_mut()
                    .find(|g| g.as_ref().is_some_and(|g| g.group.id == group_id));
                match slot.and_then(Option::take) {
                    Some(group) => results.push(SearchMatch::Group(group)),
                    // Group vanished between queries; show the guest alone.
                    None => results.push(SearchMatch::Solo(guest)),
                }
            }
            None => {
                if seen.insert(guest.id) {
                    results.push(SearchMatch::Solo(guest));
                }
            }
        }
    }

    results
}

pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<SearchMatch>, DomainError> {
    let matched = match plan_search(query) {
        SearchPlan::Empty => return Ok(Vec::new()),
        SearchPlan::NamePairs(pairs) => {
            guests::search_by_name_pairs(pool, &pairs, MAX_MATCHES).await?
        }
        SearchPlan::Token {
            pattern,
            first_name_aliases,
        } => guests::search_by_token(pool, &pattern, &first_name_aliases, MAX_MATCHES).await?,
    };

    let mut group_ids: Vec<Uuid> = Vec::new();
    for guest in &matched {
        if let Some(id) = guest.group_id {
            if !group_ids.contains(&id) {
                group_ids.push(id);
            }
        }
    }
    let groups = guest_groups::list_with_members_by_ids(pool, &group_ids).await?;

    tracing::debug!(
        matched = matched.len(),
        groups = group_ids.len(),
        "guest search"
    );

    Ok(collect_matches(matched, groups))
}
