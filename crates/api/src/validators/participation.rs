//! The participation scheduling pipeline.
//!
//! Create: FormatCheck -> OrderCheck -> ReferenceCheck -> OverlapCheck -> write.
//! Update: FormatCheck -> ReferenceLoad -> OrderCheck -> ReferenceCheck ->
//! OverlapCheck (self excluded) -> write.
//!
//! The overlap scan and the write run inside one transaction holding an
//! advisory lock on the `(character, episode)` pair, so two concurrent
//! requests for the same pair serialize instead of both passing the check
//! against the same snapshot.

use episodic_core::error::CoreError;
use episodic_core::interval::{first_conflict, Interval};
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::participation::{
    CreateParticipation, Participation, UpdateParticipation,
};
use episodic_db::repositories::{CharacterRepo, EpisodeRepo, ParticipationRepo};
use episodic_db::DbPool;

use crate::error::AppResult;

/// Runs the create/update/delete pipelines for participations.
pub struct ParticipationValidator;

impl ParticipationValidator {
    /// Validate and persist a new participation.
    pub async fn create(pool: &DbPool, input: &CreateParticipation) -> AppResult<Participation> {
        // FormatCheck + OrderCheck, both pure.
        let init = Timecode::parse(&input.init)?;
        let finish = Timecode::parse(&input.finish)?;
        let candidate = Interval::new(init, finish)?;

        // ReferenceCheck: episode first, then character.
        require_episode(pool, input.episode_id).await?;
        require_character(pool, input.character_id).await?;

        // OverlapCheck + write, serialized per pair.
        let mut tx = pool.begin().await?;
        ParticipationRepo::lock_pair(tx.as_mut(), input.character_id, input.episode_id).await?;

        let existing =
            ParticipationRepo::list_for_pair(tx.as_mut(), input.episode_id, input.character_id)
                .await?;
        check_no_overlap(&candidate, &existing, None)?;

        // Store the canonical zero-padded rendering so lexicographic
        // comparisons on the text columns stay equivalent to numeric ones.
        let row = ParticipationRepo::create_in(
            tx.as_mut(),
            &CreateParticipation {
                character_id: input.character_id,
                episode_id: input.episode_id,
                init: init.to_string(),
                finish: finish.to_string(),
            },
        )
        .await?;
        tx.commit().await?;

        Ok(row)
    }

    /// Validate and persist an update. Unspecified fields keep the stored
    /// values; the overlap check excludes the row's own ID and runs against
    /// the pair the participation will belong to *after* the update.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateParticipation,
    ) -> AppResult<Participation> {
        // FormatCheck on whichever time fields were provided.
        let new_init = input.init.as_deref().map(Timecode::parse).transpose()?;
        let new_finish = input.finish.as_deref().map(Timecode::parse).transpose()?;

        // ReferenceLoad: the row being updated supplies the defaults.
        let current = ParticipationRepo::find_by_id(pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Participation",
                id,
            })?;

        let init = match new_init {
            Some(t) => t,
            None => stored_timecode(&current.init)?,
        };
        let finish = match new_finish {
            Some(t) => t,
            None => stored_timecode(&current.finish)?,
        };
        let character_id = input.character_id.unwrap_or(current.character_id);
        let episode_id = input.episode_id.unwrap_or(current.episode_id);

        // OrderCheck on the effective interval.
        let candidate = Interval::new(init, finish)?;

        // ReferenceCheck on the effective target pair.
        require_episode(pool, episode_id).await?;
        require_character(pool, character_id).await?;

        // OverlapCheck with self-exclusion + write, serialized per pair.
        let mut tx = pool.begin().await?;
        ParticipationRepo::lock_pair(tx.as_mut(), character_id, episode_id).await?;

        let existing =
            ParticipationRepo::list_for_pair(tx.as_mut(), episode_id, character_id).await?;
        check_no_overlap(&candidate, &existing, Some(id))?;

        let row = ParticipationRepo::update_in(
            tx.as_mut(),
            id,
            character_id,
            episode_id,
            &init.to_string(),
            &finish.to_string(),
        )
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Participation",
            id,
        })?;
        tx.commit().await?;

        Ok(row)
    }

    /// Delete a participation. Unconditional once the ID resolves: no
    /// conflict re-check, no cascade.
    pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
        let deleted = ParticipationRepo::delete(pool, id).await?;
        if deleted {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Participation",
                id,
            }
            .into())
        }
    }
}

async fn require_episode(pool: &DbPool, id: DbId) -> AppResult<()> {
    EpisodeRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Episode",
            id,
        })?;
    Ok(())
}

async fn require_character(pool: &DbPool, id: DbId) -> AppResult<()> {
    CharacterRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Character",
            id,
        })?;
    Ok(())
}

/// Parse a timecode that already passed validation on its way into the
/// database. A failure here means the stored data is corrupt.
fn stored_timecode(text: &str) -> Result<Timecode, CoreError> {
    Timecode::parse(text)
        .map_err(|_| CoreError::Internal(format!("stored timecode '{text}' is malformed")))
}

/// Run the pure overlap predicate over the stored rows for one pair.
fn check_no_overlap(
    candidate: &Interval,
    existing: &[Participation],
    exclude: Option<DbId>,
) -> Result<(), CoreError> {
    let intervals = existing
        .iter()
        .map(|p| {
            Ok((
                p.id,
                Interval::new(stored_timecode(&p.init)?, stored_timecode(&p.finish)?).map_err(
                    |_| {
                        CoreError::Internal(format!(
                            "stored participation {} has an inverted interval",
                            p.id
                        ))
                    },
                )?,
            ))
        })
        .collect::<Result<Vec<(DbId, Interval)>, CoreError>>()?;

    if let Some(conflicting) = first_conflict(candidate, &intervals, exclude) {
        return Err(CoreError::Conflict(format!(
            "participation time overlaps with participation {conflicting} \
             for the same character and episode"
        )));
    }
    Ok(())
}
