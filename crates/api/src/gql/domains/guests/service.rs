use sqlx::PgPool;
use uuid::Uuid;

use infra::models::GuestRow;
use infra::pagination::LimitOffset;
use infra::repos::{guest_groups, guests, CreateGuest, RsvpStatus, UpdateGuest};

use crate::config::EventConfig;
use crate::error::DomainError;
use crate::gql::common::validation::{validate_email, validate_phone};

use super::filter::GuestListFilter;

/// Rows fetched before in-memory filtering; far above any guest list.
const MAX_LISTED_GUESTS: i64 = 5_000;

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn require_name(value: &str, label: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{label} is required")));
    }
    Ok(())
}

/// Trim and check a new guest. Blank optional fields become `None`.
pub fn prepare_new_guest(data: CreateGuest) -> Result<CreateGuest, DomainError> {
    let blank_to_none = |v: Option<String>| trimmed(v).filter(|v| !v.is_empty());

    let data = CreateGuest {
        group_id: data.group_id,
        title: blank_to_none(data.title),
        first_name: data.first_name.trim().to_string(),
        last_name: data.last_name.trim().to_string(),
        suffix: blank_to_none(data.suffix),
        email: blank_to_none(data.email),
        phone: blank_to_none(data.phone),
        is_child: data.is_child,
    };

    require_name(&data.first_name, "First name")?;
    require_name(&data.last_name, "Last name")?;
    if let Some(email) = data.email.as_deref() {
        validate_email(email)?;
    }
    if let Some(phone) = data.phone.as_deref() {
        validate_phone(phone)?;
    }
    Ok(data)
}

/// Trim and check a partial update. Empty strings are kept: they clear the
/// column. A NO answer also clears the meal.
pub fn prepare_guest_update(
    config: &EventConfig,
    data: UpdateGuest,
) -> Result<UpdateGuest, DomainError> {
    let mut data = UpdateGuest {
        title: trimmed(data.title),
        first_name: trimmed(data.first_name),
        last_name: trimmed(data.last_name),
        suffix: trimmed(data.suffix),
        email: trimmed(data.email),
        phone: trimmed(data.phone),
        rsvp_status: data.rsvp_status,
        meal: trimmed(data.meal),
        dietary_restrictions: trimmed(data.dietary_restrictions),
        is_child: data.is_child,
    };

    if let Some(first) = data.first_name.as_deref() {
        require_name(first, "First name")?;
    }
    if let Some(last) = data.last_name.as_deref() {
        require_name(last, "Last name")?;
    }
    if let Some(email) = data.email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email)?;
    }
    if let Some(phone) = data.phone.as_deref().filter(|p| !p.is_empty()) {
        validate_phone(phone)?;
    }

    if data.rsvp_status == Some(RsvpStatus::No) {
        data.meal = Some(String::new());
    } else if let Some(meal) = data.meal.as_deref().filter(|m| !m.is_empty()) {
        let canonical = config.canonical_meal(meal).ok_or_else(|| {
            DomainError::validation(format!("'{meal}' is not one of the meal options"))
        })?;
        data.meal = Some(canonical.to_string());
    }

    Ok(data)
}

/// A meal may only be chosen for a guest whose resulting status is not NO.
pub fn check_meal_status(current: RsvpStatus, data: &UpdateGuest) -> Result<(), DomainError> {
    let status = data.rsvp_status.unwrap_or(current);
    let sets_meal = data.meal.as_deref().is_some_and(|m| !m.is_empty());
    if status == RsvpStatus::No && sets_meal {
        return Err(DomainError::validation(
            "A guest who declined cannot choose a meal",
        ));
    }
    Ok(())
}

pub async fn list(pool: &PgPool, filter: &GuestListFilter) -> Result<Vec<GuestRow>, DomainError> {
    let page = LimitOffset {
        limit: MAX_LISTED_GUESTS,
        offset: 0,
    };
    let rows = guests::list(pool, filter.row_filter(), Some(page)).await?;
    Ok(filter.apply(rows))
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<GuestRow, DomainError> {
    guests::get_by_id(pool, id)
        .await?
        .ok_or_else(|| DomainError::GuestsNotFound(vec![id]))
}

async fn ensure_group(pool: &PgPool, group_id: Option<Uuid>) -> Result<(), DomainError> {
    if let Some(id) = group_id {
        guest_groups::get_by_id(pool, id)
            .await?
            .ok_or(DomainError::GroupNotFound(id))?;
    }
    Ok(())
}

pub async fn create(pool: &PgPool, data: CreateGuest) -> Result<GuestRow, DomainError> {
    let data = prepare_new_guest(data)?;
    ensure_group(pool, data.group_id).await?;

    let guest = guests::create(pool, data).await?;
    tracing::info!(guest_id = %guest.id, "guest created");
    Ok(guest)
}

pub async fn update(
    pool: &PgPool,
    config: &EventConfig,
    id: Uuid,
    data: UpdateGuest,
) -> Result<GuestRow, DomainError> {
    let data = prepare_guest_update(config, data)?;

    let mut tx = pool.begin().await?;
    let current = guests::lock_by_ids(&mut *tx, &[id])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::GuestsNotFound(vec![id]))?;
    check_meal_status(current.rsvp_status, &data)?;

    let guest = guests::update(&mut *tx, id, data)
        .await?
        .ok_or_else(|| DomainError::GuestsNotFound(vec![id]))?;
    tx.commit().await?;
    Ok(guest)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DomainError> {
    if !guests::delete(pool, id).await? {
        return Err(DomainError::GuestsNotFound(vec![id]));
    }
    tracing::info!(guest_id = %id, "guest deleted");
    Ok(())
}

pub async fn set_group(
    pool: &PgPool,
    id: Uuid,
    group_id: Option<Uuid>,
) -> Result<GuestRow, DomainError> {
    ensure_group(pool, group_id).await?;
    guests::set_group(pool, id, group_id)
        .await?
        .ok_or_else(|| DomainError::GuestsNotFound(vec![id]))
}
