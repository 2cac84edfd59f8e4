//! Synthetic participation generator for seeded data.
//!
//! For every active episode a handful of active characters is drawn at
//! random and each gets a random on-screen interval inside the episode's
//! runtime. Inserts go through the same pair-locked transaction and overlap
//! check as the API path, so generated data never violates the scheduling
//! invariant; a drawn interval that collides with an existing one is simply
//! skipped.

use episodic_core::error::CoreError;
use episodic_core::interval::{first_conflict, Interval};
use episodic_core::taxonomy::StatusKind;
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::character::Character;
use episodic_db::models::episode::Episode;
use episodic_db::models::participation::CreateParticipation;
use episodic_db::repositories::{CharacterRepo, EpisodeRepo, ParticipationRepo, StatusRepo};
use episodic_db::DbPool;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::EtlError;

/// Shortest generated interval, one minute.
const MIN_SPAN_SECS: u32 = 60;
/// Longest generated interval, ten minutes.
const MAX_SPAN_SECS: u32 = 600;

/// Generate up to `per_episode` participations for every active episode,
/// drawing cast and intervals from `rng`. Returns the number created.
pub async fn generate(
    pool: &DbPool,
    rng: &mut impl Rng,
    per_episode: usize,
) -> Result<u64, EtlError> {
    let episodes = active_episodes(pool).await?;
    let characters = active_characters(pool).await?;
    if characters.is_empty() {
        tracing::warn!("no active characters, nothing to generate");
        return Ok(0);
    }

    let mut created = 0;
    for episode in &episodes {
        let duration = stored_timecode(&episode.duration)?;
        let cast: Vec<&Character> = characters.choose_multiple(rng, per_episode).collect();
        for character in cast {
            let Some(interval) = random_interval(rng, duration) else {
                continue;
            };
            match insert_checked(pool, episode.id, character.id, interval).await {
                Ok(true) => created += 1,
                Ok(false) => {
                    tracing::debug!(
                        episode_id = episode.id,
                        character_id = character.id,
                        "drawn interval overlaps an existing one, skipping"
                    );
                }
                Err(error) => {
                    tracing::warn!(episode_id = episode.id, character_id = character.id, %error,
                        "skipping participation");
                }
            }
        }
    }

    tracing::info!(created, "participation generation finished");
    Ok(created)
}

/// Draw a random interval inside an episode of the given runtime: a start
/// anywhere that leaves room for at least [`MIN_SPAN_SECS`], then a span of
/// one to ten minutes clamped to the remaining runtime.
///
/// Returns `None` for runtimes too short to fit the minimum span.
pub fn random_interval(rng: &mut impl Rng, runtime: Timecode) -> Option<Interval> {
    let total = runtime.seconds();
    if total <= MIN_SPAN_SECS {
        return None;
    }

    let start = rng.random_range(0..total - MIN_SPAN_SECS);
    let span = rng.random_range(MIN_SPAN_SECS..=MAX_SPAN_SECS.min(total - start));
    Interval::new(
        Timecode::from_seconds(start),
        Timecode::from_seconds(start + span),
    )
    .ok()
}

async fn insert_checked(
    pool: &DbPool,
    episode_id: DbId,
    character_id: DbId,
    interval: Interval,
) -> Result<bool, EtlError> {
    let mut tx = pool.begin().await?;
    ParticipationRepo::lock_pair(tx.as_mut(), character_id, episode_id).await?;

    let existing = ParticipationRepo::list_for_pair(tx.as_mut(), episode_id, character_id).await?;
    let mut intervals = Vec::with_capacity(existing.len());
    for row in &existing {
        let start = stored_timecode(&row.init)?;
        let end = stored_timecode(&row.finish)?;
        intervals.push((row.id, Interval::new(start, end)?));
    }
    if first_conflict(&interval, &intervals, None).is_some() {
        tx.rollback().await?;
        return Ok(false);
    }

    ParticipationRepo::create_in(
        tx.as_mut(),
        &CreateParticipation {
            character_id,
            episode_id,
            init: interval.start().to_string(),
            finish: interval.end().to_string(),
        },
    )
    .await?;
    tx.commit().await?;
    Ok(true)
}

async fn active_episodes(pool: &DbPool) -> Result<Vec<Episode>, EtlError> {
    let status = require_active(pool, StatusKind::Episodes).await?;
    Ok(EpisodeRepo::list_by_status(pool, status).await?)
}

async fn active_characters(pool: &DbPool) -> Result<Vec<Character>, EtlError> {
    let status = require_active(pool, StatusKind::Characters).await?;
    Ok(CharacterRepo::list_by_status(pool, status).await?)
}

async fn require_active(pool: &DbPool, kind: StatusKind) -> Result<DbId, EtlError> {
    let status = StatusRepo::find_by_name_and_type(pool, "ACTIVE", kind.as_str())
        .await?
        .ok_or_else(|| {
            EtlError::Core(CoreError::Internal(format!(
                "ACTIVE status is not seeded for {kind}"
            )))
        })?;
    Ok(status.id)
}

/// Parse a timecode that came out of the database. Stored values are always
/// canonical, so a parse failure here is data corruption, not user error.
fn stored_timecode(raw: &str) -> Result<Timecode, EtlError> {
    Timecode::parse(raw)
        .map_err(|_| EtlError::Core(CoreError::Internal(format!("corrupt stored timecode '{raw}'"))))
}
