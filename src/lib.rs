//! resx-entity
//!
//! Model of localizable resources backed by one file per language
//! (`Resources.resx`, `Resources.de.resx`, …): a [`ResourceEntity`] aggregates the
//! per-language stores, exposes one sorted entry per key and lets a host veto
//! edits before they happen.

pub mod config;
pub mod culture;
pub mod error;
pub mod input;
pub mod manager;
pub mod model;
pub mod ordering;
#[cfg(test)]
mod test_utils;

pub use culture::Culture;
pub use error::EntityError;
pub use manager::ResourceManager;
pub use model::{
    ResourceEntity,
    ResourceTableEntry,
};
