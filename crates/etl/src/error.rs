use episodic_core::error::CoreError;

/// Errors surfaced by an import run.
///
/// Per-item problems are handled inside the importer (logged and skipped);
/// these variants are for failures that end the run.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    /// The upstream catalog could not be reached or returned garbage.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A domain-level error from `episodic_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream record that cannot be interpreted (bad episode code etc.).
    #[error("malformed upstream record: {0}")]
    Malformed(String),
}
