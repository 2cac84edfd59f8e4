//! Taxonomy seeding and catalog imports.

use std::sync::LazyLock;

use episodic_core::taxonomy::{CategoryKind, StatusKind};
use episodic_core::timecode::Timecode;
use episodic_core::types::DbId;
use episodic_db::models::character::CreateCharacter;
use episodic_db::models::episode::CreateEpisode;
use episodic_db::repositories::{
    CategoryRepo, CharacterRepo, EpisodeRepo, StatusRepo, SubcategoryRepo,
};
use episodic_db::DbPool;
use rand::Rng;
use regex::Regex;

use crate::client::{ApiCharacter, ApiEpisode, CatalogClient};
use crate::error::EtlError;

/// Season/episode code of the upstream catalog, e.g. `S01E07`.
static EPISODE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S(\d+)E(\d+)").expect("valid regex"));

/// Species recorded for upstream characters with an empty species field.
const UNKNOWN_SPECIES: &str = "Unknown";

/// Seed the status taxonomy: both type partitions with their lifecycle
/// statuses. Idempotent.
pub async fn seed_statuses(pool: &DbPool) -> Result<(), EtlError> {
    let characters = StatusRepo::upsert_type(pool, StatusKind::Characters.as_str()).await?;
    let episodes = StatusRepo::upsert_type(pool, StatusKind::Episodes.as_str()).await?;

    StatusRepo::upsert(pool, "ACTIVE", characters.id).await?;
    StatusRepo::upsert(pool, "SUSPENDED", characters.id).await?;
    StatusRepo::upsert(pool, "ACTIVE", episodes.id).await?;
    StatusRepo::upsert(pool, "CANCELLED", episodes.id).await?;

    tracing::info!("status taxonomy seeded");
    Ok(())
}

/// Import every character from the upstream catalog, following pagination
/// until exhausted. Returns the number of characters created.
pub async fn import_characters(pool: &DbPool, client: &CatalogClient) -> Result<u64, EtlError> {
    let active = active_status_id(pool, StatusKind::Characters).await?;
    let mut imported = 0;
    let mut next: Option<String> = None;

    loop {
        let page = client.characters_page(next.as_deref()).await?;
        for character in &page.results {
            match import_character(pool, character, active).await {
                Ok(true) => imported += 1,
                Ok(false) => {} // already present, re-run is a no-op
                Err(error) => {
                    tracing::warn!(upstream_id = character.id, name = %character.name, %error,
                        "skipping character");
                }
            }
        }
        match page.info.next {
            Some(url) => next = Some(url),
            None => break,
        }
    }

    tracing::info!(imported, "character import finished");
    Ok(imported)
}

/// Import every episode from the upstream catalog. The catalog has no
/// runtime data, so each new episode gets a synthetic duration drawn from
/// `rng`. Returns the number of episodes created.
pub async fn import_episodes(
    pool: &DbPool,
    client: &CatalogClient,
    rng: &mut impl Rng,
) -> Result<u64, EtlError> {
    let active = active_status_id(pool, StatusKind::Episodes).await?;
    let mut imported = 0;
    let mut next: Option<String> = None;

    loop {
        let page = client.episodes_page(next.as_deref()).await?;
        for episode in &page.results {
            match import_episode(pool, episode, active, rng).await {
                Ok(true) => imported += 1,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(upstream_id = episode.id, name = %episode.name, %error,
                        "skipping episode");
                }
            }
        }
        match page.info.next {
            Some(url) => next = Some(url),
            None => break,
        }
    }

    tracing::info!(imported, "episode import finished");
    Ok(imported)
}

async fn import_character(
    pool: &DbPool,
    character: &ApiCharacter,
    status_id: DbId,
) -> Result<bool, EtlError> {
    let category = CategoryRepo::upsert(pool, CategoryKind::Species.as_str()).await?;
    let species = if character.species.is_empty() {
        UNKNOWN_SPECIES
    } else {
        &character.species
    };
    let subcategory = SubcategoryRepo::upsert(pool, species, category.id).await?;

    // Idempotency: a same-named character in the same species means this
    // record was imported on an earlier run.
    let existing =
        CharacterRepo::find_duplicate(pool, &character.name, subcategory.id, None, None).await?;
    if existing.is_some() {
        return Ok(false);
    }

    CharacterRepo::create(
        pool,
        &CreateCharacter {
            name: character.name.clone(),
            status_id,
            subcategory_id: subcategory.id,
        },
    )
    .await?;
    Ok(true)
}

async fn import_episode(
    pool: &DbPool,
    episode: &ApiEpisode,
    status_id: DbId,
    rng: &mut impl Rng,
) -> Result<bool, EtlError> {
    let season = season_number(&episode.episode)?;

    let category = CategoryRepo::upsert(pool, CategoryKind::Season.as_str()).await?;
    let subcategory =
        SubcategoryRepo::upsert(pool, &format!("Season {season}"), category.id).await?;

    let existing = EpisodeRepo::find_duplicate(pool, &episode.name, subcategory.id, None).await?;
    if existing.is_some() {
        return Ok(false);
    }

    EpisodeRepo::create(
        pool,
        &CreateEpisode {
            title: episode.name.clone(),
            duration: synthetic_duration(rng).to_string(),
            status_id,
            subcategory_id: subcategory.id,
        },
    )
    .await?;
    Ok(true)
}

/// Extract the season number from an `SxxEyy` code.
pub fn season_number(code: &str) -> Result<u32, EtlError> {
    let caps = EPISODE_CODE_RE
        .captures(code)
        .ok_or_else(|| EtlError::Malformed(format!("invalid episode code '{code}'")))?;
    caps[1]
        .parse()
        .map_err(|_| EtlError::Malformed(format!("invalid season in episode code '{code}'")))
}

/// Draw a synthetic runtime of 20-59 whole minutes.
///
/// 59 is the ceiling, not 60: anything longer cannot be re-parsed under the
/// two-digit `mm:ss` input grammar.
pub fn synthetic_duration(rng: &mut impl Rng) -> Timecode {
    Timecode::from_seconds(rng.random_range(20..=59) * 60)
}

async fn active_status_id(pool: &DbPool, kind: StatusKind) -> Result<DbId, EtlError> {
    let status = StatusRepo::find_by_name_and_type(pool, "ACTIVE", kind.as_str())
        .await?
        .ok_or_else(|| {
            EtlError::Core(episodic_core::error::CoreError::Internal(format!(
                "ACTIVE status is not seeded for {kind}"
            )))
        })?;
    Ok(status.id)
}
