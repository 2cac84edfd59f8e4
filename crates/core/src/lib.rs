//! Domain logic for the Episodic catalog service.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer, the importer, and any future CLI tooling. It holds
//! the timecode codec, the interval-overlap predicate that guards
//! participation scheduling, and the status/category taxonomy partitions.

pub mod error;
pub mod interval;
pub mod taxonomy;
pub mod timecode;
pub mod types;
