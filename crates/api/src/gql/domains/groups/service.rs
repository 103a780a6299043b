use sqlx::PgPool;
use uuid::Uuid;

use infra::models::{GroupWithMembers, GuestGroupRow};
use infra::repos::{guest_groups, guests, CreateGuest, GroupDetails};

use crate::error::DomainError;
use crate::gql::common::helpers::normalize_text;
use crate::gql::common::validation::validate_group_details;
use crate::gql::domains::guests::service::prepare_new_guest;

pub fn details_of(row: &GuestGroupRow) -> GroupDetails {
    GroupDetails {
        name: row.name.clone(),
        address_line1: row.address_line1.clone(),
        address_line2: row.address_line2.clone(),
        city: row.city.clone(),
        state: row.state.clone(),
        postal_code: row.postal_code.clone(),
        country: row.country.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
    }
}

/// Trim every field, turning blanks into `None`.
pub fn normalize_details(details: GroupDetails) -> GroupDetails {
    GroupDetails {
        name: normalize_text(details.name),
        address_line1: normalize_text(details.address_line1),
        address_line2: normalize_text(details.address_line2),
        city: normalize_text(details.city),
        state: normalize_text(details.state).map(|s| s.to_ascii_uppercase()),
        postal_code: normalize_text(details.postal_code),
        country: normalize_text(details.country),
        email: normalize_text(details.email),
        phone: normalize_text(details.phone),
    }
}

/// Apply a partial update: `None` keeps the current value, an empty string
/// clears it.
pub fn merge_details(current: GroupDetails, patch: GroupDetails) -> GroupDetails {
    let pick = |current: Option<String>, patch: Option<String>| match patch {
        Some(value) => Some(value),
        None => current,
    };

    normalize_details(GroupDetails {
        name: pick(current.name, patch.name),
        address_line1: pick(current.address_line1, patch.address_line1),
        address_line2: pick(current.address_line2, patch.address_line2),
        city: pick(current.city, patch.city),
        state: pick(current.state, patch.state),
        postal_code: pick(current.postal_code, patch.postal_code),
        country: pick(current.country, patch.country),
        email: pick(current.email, patch.email),
        phone: pick(current.phone, patch.phone),
    })
}

pub async fn list(pool: &PgPool) -> Result<Vec<GroupWithMembers>, DomainError> {
    Ok(guest_groups::list_with_members(pool).await?)
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<GroupWithMembers, DomainError> {
    guest_groups::get_with_members(pool, id)
        .await?
        .ok_or(DomainError::GroupNotFound(id))
}

/// Create a group and its first members together.
pub async fn create(
    pool: &PgPool,
    details: GroupDetails,
    members: Vec<CreateGuest>,
) -> Result<GroupWithMembers, DomainError> {
    let details = normalize_details(details);
    validate_group_details(&details)?;
    let members = members
        .into_iter()
        .map(prepare_new_guest)
        .collect::<Result<Vec<_>, _>>()?;

    let mut tx = pool.begin().await?;
    let group = guest_groups::create(&mut *tx, details).await?;
    for member in members {
        let member = CreateGuest {
            group_id: Some(group.id),
            ..member
        };
        guests::create(&mut *tx, member).await?;
    }
    tx.commit().await?;

    tracing::info!(group_id = %group.id, "group created");
    get(pool, group.id).await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: GroupDetails,
) -> Result<GroupWithMembers, DomainError> {
    let mut tx = pool.begin().await?;
    let current = guest_groups::lock(&mut *tx, id)
        .await?
        .ok_or(DomainError::GroupNotFound(id))?;

    let details = merge_details(details_of(&current), patch);
    validate_group_details(&details)?;

    guest_groups::update(&mut *tx, id, details)
        .await?
        .ok_or(DomainError::GroupNotFound(id))?;
    tx.commit().await?;

    get(pool, id).await
}

/// Delete a group; its members stay on the list without a group.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DomainError> {
    if !guest_groups::delete(pool, id).await? {
        return Err(DomainError::GroupNotFound(id));
    }
    tracing::info!(group_id = %id, "group deleted");
    Ok(())
}
