use sqlx::PgPool;
use uuid::Uuid;

use infra::models::GroupWithMembers;
use infra::repos::{guest_groups, guests, RsvpStatus};

use crate::config::EventConfig;
use crate::error::DomainError;
use crate::gql::common::helpers::normalize_text;

/// One guest's answer to the invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpAnswer {
    pub guest_id: Uuid,
    pub status: RsvpStatus,
    pub meal: Option<String>,
    pub dietary_restrictions: Option<String>,
}

/// Check a batch of answers and normalize their text. Meals are matched
/// against the configured options and stored in their configured spelling;
/// a NO answer drops the meal.
pub fn prepare_answers(
    config: &EventConfig,
    answers: Vec<RsvpAnswer>,
) -> Result<Vec<RsvpAnswer>, DomainError> {
    if answers.is_empty() {
        return Err(DomainError::validation("At least one response is required"));
    }

    let mut prepared: Vec<RsvpAnswer> = Vec::with_capacity(answers.len());
    for answer in answers {
        if prepared.iter().any(|a| a.guest_id == answer.guest_id) {
            return Err(DomainError::validation(format!(
                "Guest {} has more than one response",
                answer.guest_id
            )));
        }

        let meal = match answer.status {
            RsvpStatus::Pending => {
                return Err(DomainError::validation(
                    "Each response must be YES or NO",
                ))
            }
            RsvpStatus::No => None,
            RsvpStatus::Yes => match normalize_text(answer.meal) {
                Some(meal) => Some(
                    config
                        .canonical_meal(&meal)
                        .map(str::to_string)
                        .ok_or_else(|| {
                            DomainError::validation(format!(
                                "'{meal}' is not one of the meal options"
                            ))
                        })?,
                ),
                None => None,
            },
        };

        prepared.push(RsvpAnswer {
            guest_id: answer.guest_id,
            status: answer.status,
            meal,
            dietary_restrictions: normalize_text(answer.dietary_restrictions),
        });
    }

    Ok(prepared)
}

/// Record a group's answers in one transaction and return the updated group.
/// Table assignments are not touched.
pub async fn submit(
    pool: &PgPool,
    config: &EventConfig,
    group_id: Uuid,
    answers: Vec<RsvpAnswer>,
) -> Result<GroupWithMembers, DomainError> {
    let answers = prepare_answers(config, answers)?;
    let ids: Vec<Uuid> = answers.iter().map(|a| a.guest_id).collect();

    let mut tx = pool.begin().await?;
    guest_groups::lock(&mut *tx, group_id)
        .await?
        .ok_or(DomainError::GroupNotFound(group_id))?;

    let rows = guests::lock_by_ids(&mut *tx, &ids).await?;
    let not_members: Vec<Uuid> = ids
        .iter()
        .filter(|id| {
            !rows
                .iter()
                .any(|row| row.id == **id && row.group_id == Some(group_id))
        })
        .copied()
        .collect();
    if !not_members.is_empty() {
        return Err(DomainError::GuestsNotFound(not_members));
    }

    for answer in &answers {
        guests::record_rsvp(
            &mut *tx,
            answer.guest_id,
            answer.status,
            answer.meal.clone(),
            answer.dietary_restrictions.clone(),
        )
        .await?;
    }
    tx.commit().await?;

    let attending = answers
        .iter()
        .filter(|a| a.status == RsvpStatus::Yes)
        .count();
    tracing::info!(
        group_id = %group_id,
        responses = answers.len(),
        attending,
        "rsvp recorded"
    );

    guest_groups::get_with_members(pool, group_id)
        .await?
        .ok_or(DomainError::GroupNotFound(group_id))
}
