//! The logical resource entity: one named resource spanning all of its languages.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::path::{
    Path,
    PathBuf,
};
use std::rc::{
    Rc,
    Weak,
};

use super::entry::ResourceTableEntry;
use super::events::{
    ChangedEvent,
    ChangingEvent,
    EditOutcome,
    EntityEvents,
    Proceed,
    SubscriptionId,
    Veto,
};
use super::identity::{
    EntityIdentity,
    compare_entities,
};
use super::language::{
    LanguageListener,
    LanguageMap,
    ResourceLanguage,
    SharedLanguages,
};
use crate::config::DEFAULT_NEW_KEY_TEMPLATE;
use crate::culture::Culture;
use crate::error::EntityError;
use crate::input::ProjectFile;
use crate::manager::ResourceManager;
use crate::ordering::eq_ignore_case;

/// A localizable resource (e.g. `Resources`) backed by one file per language.
///
/// The entity owns the language stores and keeps one [`ResourceTableEntry`] per
/// distinct key. Right after construction or [`update`](Self::update) the entries
/// are sorted by their upper-cased key; [`add`](Self::add) appends at the end.
///
/// Edits of any language are announced through [`subscribe_changing`](Self::subscribe_changing)
/// (before, may veto) and [`subscribe_changed`](Self::subscribe_changed) (after).
/// Handlers run synchronously while the shared language map is borrowed: entry
/// reads made from a handler return nothing and entry writes fail with
/// [`EntityError::EditInProgress`].
pub struct ResourceEntity {
    owner: Weak<ResourceManager>,
    identity: Rc<EntityIdentity>,
    languages: SharedLanguages,
    entries: Vec<Rc<ResourceTableEntry>>,
    events: Rc<EntityEvents>,
}

impl ResourceEntity {
    /// Creates the entity from its per-language files.
    ///
    /// # Errors
    /// - [`EntityError::InvalidArgument`]: empty `project_name`, `base_name`,
    ///   `directory` or `files`
    /// - [`EntityError::DuplicateLanguage`]: two files resolve to the same language
    pub fn new<F: ProjectFile>(
        owner: &Rc<ResourceManager>,
        project_name: &str,
        base_name: &str,
        directory: impl Into<PathBuf>,
        files: &[F],
    ) -> Result<Self, EntityError> {
        let directory = directory.into();
        EntityError::require_non_empty("project_name", project_name)?;
        EntityError::require_non_empty("base_name", base_name)?;
        if directory.as_os_str().is_empty() {
            return Err(EntityError::invalid_argument("directory", "must not be empty"));
        }
        let Some(first_file) = files.first() else {
            return Err(EntityError::invalid_argument("files", "at least one file is required"));
        };

        let identity = Rc::new(EntityIdentity::new(
            project_name,
            base_name,
            directory,
            first_file.unique_project_name(),
        ));
        let events = Rc::new(EntityEvents::new(Rc::clone(&identity)));
        let languages = build_language_map(files, &events)?;

        let mut entity = Self {
            owner: Rc::downgrade(owner),
            identity,
            languages: Rc::new(RefCell::new(languages)),
            entries: Vec::new(),
            events,
        };
        entity.entries = entity.sorted_entries(HashMap::new());

        tracing::debug!(
            entity = %entity.identity,
            languages = entity.languages.borrow().len(),
            entries = entity.entries.len(),
            "Created resource entity"
        );
        Ok(entity)
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        self.identity.project_name()
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        self.identity.base_name()
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        self.identity.directory()
    }

    #[must_use]
    pub fn relative_path(&self) -> &str {
        self.identity.relative_path()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.identity.display_name()
    }

    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.identity.sort_key()
    }

    #[must_use]
    pub fn identity(&self) -> &EntityIdentity {
        &self.identity
    }

    /// The manager this entity was created by, if it is still alive.
    #[must_use]
    pub fn owner(&self) -> Option<Rc<ResourceManager>> {
        self.owner.upgrade()
    }

    /// Handle to the language map shared with all entries.
    #[must_use]
    pub fn languages(&self) -> SharedLanguages {
        Rc::clone(&self.languages)
    }

    /// Cultures in iteration order; the first one is the neutral language.
    ///
    /// Empty when called from a Changing / Changed handler.
    #[must_use]
    pub fn cultures(&self) -> Vec<Culture> {
        self.languages.try_borrow().map(|languages| languages.cultures()).unwrap_or_default()
    }

    #[must_use]
    pub fn neutral_culture(&self) -> Option<Culture> {
        let languages = self.languages.try_borrow().ok()?;
        languages.first().map(|language| language.culture().clone())
    }

    #[must_use]
    pub fn entries(&self) -> &[Rc<ResourceTableEntry>] {
        &self.entries
    }

    /// Entry with exactly this key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<Rc<ResourceTableEntry>> {
        self.entries.iter().find(|entry| entry.key() == key).cloned()
    }

    /// Removes the key of `entry` from every language, then drops the entry.
    ///
    /// Languages without the key are skipped. A language whose change is vetoed
    /// keeps its value; the entry is dropped regardless.
    ///
    /// # Errors
    /// [`EntityError::InvalidArgument`] when the entry's key is empty.
    pub fn remove(&mut self, entry: &ResourceTableEntry) -> Result<(), EntityError> {
        let key = entry.key();
        EntityError::require_non_empty("key", key)?;

        for language in self.languages.borrow_mut().iter_mut() {
            if let EditOutcome::Vetoed(veto) = language.remove_key(key) {
                tracing::debug!(
                    entity = %self.identity,
                    key,
                    culture = %language.culture(),
                    ?veto,
                    "Key removal vetoed"
                );
            }
        }
        self.entries.retain(|existing| existing.key() != key);

        tracing::debug!(entity = %self.identity, key, "Removed entry");
        Ok(())
    }

    /// Adds `key` with an empty value in the neutral language and appends its entry.
    ///
    /// The new entry goes to the end of [`entries`](Self::entries), not to its
    /// sorted position.
    ///
    /// # Errors
    /// - [`EntityError::InvalidArgument`]: empty key
    /// - [`EntityError::DuplicateKey`]: an entry with exactly this key exists
    pub fn add(&mut self, key: &str) -> Result<Rc<ResourceTableEntry>, EntityError> {
        EntityError::require_non_empty("key", key)?;
        if self.entries.iter().any(|entry| entry.key() == key) {
            return Err(EntityError::DuplicateKey(key.to_string()));
        }

        if let Some(neutral) = self.languages.borrow_mut().first_mut()
            && let EditOutcome::Vetoed(veto) = neutral.force_value(key, "")
        {
            tracing::debug!(
                entity = %self.identity,
                key,
                culture = %neutral.culture(),
                ?veto,
                "Key creation vetoed"
            );
        }

        let entry = Rc::new(ResourceTableEntry::new(
            Rc::clone(&self.identity),
            key,
            Rc::clone(&self.languages),
        ));
        self.entries.push(Rc::clone(&entry));

        tracing::debug!(entity = %self.identity, key, "Added entry");
        Ok(entry)
    }

    /// Adds a key derived from the owner's new key template.
    ///
    /// The template itself is used when free, otherwise `<template>_1`,
    /// `<template>_2`, … until no existing key matches (ignoring case).
    ///
    /// # Errors
    /// Same as [`add`](Self::add).
    pub fn add_new_key(&mut self) -> Result<Rc<ResourceTableEntry>, EntityError> {
        let template = self.new_key_template();
        let is_taken =
            |candidate: &str| self.entries.iter().any(|entry| eq_ignore_case(entry.key(), candidate));

        let mut candidate = template.clone();
        let mut index = 1_u32;
        while is_taken(&candidate) {
            candidate = format!("{template}_{index}");
            index += 1;
        }

        self.add(&candidate)
    }

    /// Adds the language backed by `file`.
    ///
    /// Existing entries see the new language immediately.
    ///
    /// # Errors
    /// [`EntityError::DuplicateLanguage`] when the entity already has that language.
    pub fn add_language(&mut self, file: &impl ProjectFile) -> Result<(), EntityError> {
        let language = load_language(file, &self.events);
        let culture = language.culture().clone();
        self.languages.borrow_mut().insert(language)?;

        tracing::debug!(entity = %self.identity, culture = %culture, "Added language");
        Ok(())
    }

    /// Replaces the languages with the ones backed by `files`.
    ///
    /// Languages missing from `files` are dropped. Entries of surviving keys are
    /// kept (same instances), new keys get new entries, and the sequence is
    /// sorted again.
    ///
    /// # Errors
    /// Same as [`new`](Self::new) for an empty file list or duplicate languages;
    /// the entity is left unchanged on error.
    pub fn update<F: ProjectFile>(&mut self, files: &[F]) -> Result<(), EntityError> {
        if files.is_empty() {
            return Err(EntityError::invalid_argument("files", "at least one file is required"));
        }
        let languages = build_language_map(files, &self.events)?;
        *self.languages.borrow_mut() = languages;

        let existing =
            self.entries.drain(..).map(|entry| (entry.key().to_string(), entry)).collect();
        self.entries = self.sorted_entries(existing);

        tracing::debug!(
            entity = %self.identity,
            languages = self.languages.borrow().len(),
            entries = self.entries.len(),
            "Updated resource entity"
        );
        Ok(())
    }

    /// Asks the Changing subscribers whether `culture` may be edited.
    ///
    /// Without any subscriber nobody granted permission, so the answer is `false`.
    #[must_use]
    pub fn can_edit(&self, culture: &Culture) -> bool {
        if self.events.changing.is_empty() {
            return false;
        }
        self.events.raise_changing(culture).is_ok()
    }

    /// Subscribes to edits about to happen; returning a [`Veto`] cancels the edit.
    pub fn subscribe_changing(
        &self,
        handler: impl Fn(&ChangingEvent<'_>) -> Result<Proceed, Veto> + 'static,
    ) -> SubscriptionId {
        self.events.changing.subscribe(Rc::new(handler))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe_changing(&self, id: SubscriptionId) -> bool {
        self.events.changing.unsubscribe(id)
    }

    pub fn subscribe_changed(&self, handler: impl Fn(&ChangedEvent<'_>) + 'static) -> SubscriptionId {
        self.events.changed.subscribe(Rc::new(handler))
    }

    pub fn unsubscribe_changed(&self, id: SubscriptionId) -> bool {
        self.events.changed.unsubscribe(id)
    }

    fn new_key_template(&self) -> String {
        self.owner.upgrade().map_or_else(
            || DEFAULT_NEW_KEY_TEMPLATE.to_string(),
            |owner| owner.settings().new_key_template.clone(),
        )
    }

    /// One entry per distinct key, sorted; entries found in `existing` are reused.
    fn sorted_entries(
        &self,
        mut existing: HashMap<String, Rc<ResourceTableEntry>>,
    ) -> Vec<Rc<ResourceTableEntry>> {
        let keys = self.languages.borrow().distinct_keys();
        keys.into_iter()
            .map(|key| {
                existing.remove(&key).unwrap_or_else(|| {
                    Rc::new(ResourceTableEntry::new(
                        Rc::clone(&self.identity),
                        key,
                        Rc::clone(&self.languages),
                    ))
                })
            })
            .collect()
    }
}

/// Loads the store of `file` and subscribes the entity's forwarder to it.
fn load_language(file: &impl ProjectFile, events: &Rc<EntityEvents>) -> ResourceLanguage {
    let mut language = ResourceLanguage::new(file);
    language.set_listener(Rc::clone(events) as Rc<dyn LanguageListener>);
    language
}

fn build_language_map<F: ProjectFile>(
    files: &[F],
    events: &Rc<EntityEvents>,
) -> Result<LanguageMap, EntityError> {
    let languages = files.iter().map(|file| load_language(file, events)).collect();
    LanguageMap::from_languages(languages)
}

impl PartialEq for ResourceEntity {
    fn eq(&self, other: &Self) -> bool {
        compare_entities(Some(self), Some(other)) == Ordering::Equal
    }
}

impl Eq for ResourceEntity {}

impl PartialOrd for ResourceEntity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResourceEntity {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_entities(Some(self), Some(other))
    }
}

impl Hash for ResourceEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for ResourceEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Debug for ResourceEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntity")
            .field("identity", &self.identity)
            .field("languages", &self.cultures())
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
