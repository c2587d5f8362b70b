//! The resource entity and its collaborators.
//!
//! - [`ResourceEntity`]: one logical resource spanning all of its languages
//! - [`ResourceLanguage`]: the key/value store of one language
//! - [`ResourceTableEntry`]: one key viewed across all languages
mod entity;
mod entry;
mod events;
mod identity;
mod language;

pub use entity::ResourceEntity;
pub use entry::ResourceTableEntry;
pub use events::{
    ChangedEvent,
    ChangedHandler,
    ChangingEvent,
    ChangingHandler,
    EditOutcome,
    Proceed,
    SubscriptionId,
    Veto,
};
pub use identity::{
    EntityIdentity,
    compare_entities,
};
pub use language::{
    LanguageListener,
    LanguageMap,
    ResourceLanguage,
    SharedLanguages,
};
