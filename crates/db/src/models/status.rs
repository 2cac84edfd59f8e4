//! Status taxonomy models (`status_types` and `statuses` tables).

use episodic_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A status-type row: the entity kind a group of statuses belongs to
/// (`CHARACTERS` or `EPISODES`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusType {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// A status row from the `statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Status {
    pub id: DbId,
    pub name: String,
    pub status_type_id: DbId,
}

/// A status joined with its owning type, used by the taxonomy guard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusWithType {
    pub id: DbId,
    pub name: String,
    pub status_type_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}
