//! Validation pipelines run before any write reaches the database.
//!
//! Each pipeline is stateless: it takes the pool explicitly, re-reads
//! everything it needs per invocation, and returns the first failure as an
//! explicit error. No write happens until every check has passed.

pub mod character;
pub mod episode;
pub mod participation;
pub mod taxonomy;

pub use character::CharacterValidator;
pub use episode::EpisodeValidator;
pub use participation::ParticipationValidator;
pub use taxonomy::TaxonomyGuard;
