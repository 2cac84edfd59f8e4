//! One-shot catalog importer.
//!
//! Pulls characters and episodes from an upstream REST catalog, seeds the
//! status taxonomy, and can generate synthetic participations for seeded
//! data. Per-item failures are logged and skipped so one malformed upstream
//! record never aborts a whole run; infrastructure failures propagate.

pub mod client;
pub mod error;
pub mod import;
pub mod participations;
