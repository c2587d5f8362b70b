//! Cross-language view of a single resource key.

use std::fmt;
use std::rc::Rc;

use super::events::EditOutcome;
use super::identity::EntityIdentity;
use super::language::{
    LanguageMap,
    ResourceLanguage,
    SharedLanguages,
};
use crate::culture::Culture;
use crate::error::EntityError;

/// One key of a resource entity, read and written across all of its languages.
///
/// The entry holds the entity's [`SharedLanguages`] handle instead of a copy, so
/// languages added to the entity later are visible without recreating it.
///
/// Changing / Changed handlers run while a write holds the shared map. Reads made
/// from a handler return nothing and writes fail with
/// [`EntityError::EditInProgress`]; the event itself carries what a handler
/// needs to look at.
pub struct ResourceTableEntry {
    entity: Rc<EntityIdentity>,
    key: String,
    languages: SharedLanguages,
}

impl ResourceTableEntry {
    #[must_use]
    pub fn new(entity: Rc<EntityIdentity>, key: impl Into<String>, languages: SharedLanguages) -> Self {
        Self { entity, key: key.into(), languages }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entity this entry belongs to.
    #[must_use]
    pub fn entity(&self) -> &EntityIdentity {
        &self.entity
    }

    /// Cultures currently available through this entry.
    #[must_use]
    pub fn cultures(&self) -> Vec<Culture> {
        self.read(|languages| Some(languages.cultures())).unwrap_or_default()
    }

    /// Value in `culture`; `None` when the language is unknown or lacks the key.
    #[must_use]
    pub fn value(&self, culture: &Culture) -> Option<String> {
        self.read(|languages| languages.get(culture)?.value(&self.key).map(str::to_string))
    }

    #[must_use]
    pub fn comment(&self, culture: &Culture) -> Option<String> {
        self.read(|languages| languages.get(culture)?.comment(&self.key).map(str::to_string))
    }

    /// Whether `culture` has no translation for this key (absent or empty).
    #[must_use]
    pub fn is_missing(&self, culture: &Culture) -> bool {
        self.value(culture).is_none_or(|value| value.is_empty())
    }

    /// Writes the value in `culture`, creating the key there when needed.
    ///
    /// # Errors
    /// - [`EntityError::UnknownLanguage`]: the entity has no such language
    /// - [`EntityError::EditInProgress`]: called from a Changing / Changed handler
    pub fn set_value(&self, culture: &Culture, value: &str) -> Result<EditOutcome, EntityError> {
        self.write(culture, |language| language.force_value(&self.key, value))
    }

    /// Writes the comment in `culture`; an empty comment clears it.
    ///
    /// # Errors
    /// Same as [`set_value`](Self::set_value).
    pub fn set_comment(&self, culture: &Culture, comment: &str) -> Result<EditOutcome, EntityError> {
        self.write(culture, |language| language.set_comment(&self.key, comment))
    }

    /// Runs `read` unless an edit currently holds the languages.
    fn read<T>(&self, read: impl FnOnce(&LanguageMap) -> Option<T>) -> Option<T> {
        let Ok(languages) = self.languages.try_borrow() else {
            tracing::debug!(key = self.key.as_str(), "Read during an edit skipped");
            return None;
        };
        read(&languages)
    }

    fn write(
        &self,
        culture: &Culture,
        write: impl FnOnce(&mut ResourceLanguage) -> EditOutcome,
    ) -> Result<EditOutcome, EntityError> {
        let mut languages =
            self.languages.try_borrow_mut().map_err(|_| EntityError::EditInProgress)?;
        let language = languages
            .get_mut(culture)
            .ok_or_else(|| EntityError::UnknownLanguage(culture.clone()))?;
        Ok(write(language))
    }
}

impl fmt::Debug for ResourceTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceTableEntry")
            .field("entity", &self.entity.display_name())
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::input::ResourceFile;
    use crate::model::language::{
        LanguageMap,
        ResourceLanguage,
    };

    fn shared(files: &[ResourceFile]) -> SharedLanguages {
        let languages = files.iter().map(ResourceLanguage::new).collect();
        Rc::new(RefCell::new(LanguageMap::from_languages(languages).unwrap()))
    }

    fn entry(key: &str, languages: &SharedLanguages) -> ResourceTableEntry {
        let identity = Rc::new(EntityIdentity::new("App", "Resources", "/src/App", None));
        ResourceTableEntry::new(identity, key, Rc::clone(languages))
    }

    #[rstest]
    fn reads_values_per_culture() {
        let languages = shared(&[
            ResourceFile::new("Resources.resx").with_node("Title", "Title"),
            ResourceFile::new("Resources.de.resx").with_node("Title", ""),
        ]);
        let entry = entry("Title", &languages);

        assert_that!(entry.value(&Culture::neutral()), some(eq("Title")));
        assert_that!(entry.value(&Culture::new("DE")), some(eq("")));
        assert_that!(entry.value(&Culture::new("fr")), none());
        assert_that!(entry.is_missing(&Culture::new("de")), eq(true));
        assert_that!(entry.is_missing(&Culture::neutral()), eq(false));
    }

    #[rstest]
    fn set_value_creates_key_in_language() {
        let languages = shared(&[
            ResourceFile::new("Resources.resx").with_node("Title", "Title"),
            ResourceFile::new("Resources.de.resx"),
        ]);
        let entry = entry("Title", &languages);

        let outcome = entry.set_value(&Culture::new("de"), "Titel").unwrap();

        assert_that!(outcome, eq(&EditOutcome::Applied));
        assert_that!(entry.value(&Culture::new("de")), some(eq("Titel")));
    }

    #[rstest]
    fn set_value_in_unknown_language_fails() {
        let languages = shared(&[ResourceFile::new("Resources.resx")]);
        let entry = entry("Title", &languages);

        let result = entry.set_value(&Culture::new("fr"), "Titre");

        assert_that!(result, err(eq(&EntityError::UnknownLanguage(Culture::new("fr")))));
    }

    #[rstest]
    fn language_inserted_later_is_visible() {
        let languages = shared(&[ResourceFile::new("Resources.resx").with_node("Title", "Title")]);
        let entry = entry("Title", &languages);

        languages
            .borrow_mut()
            .insert(ResourceLanguage::new(
                &ResourceFile::new("Resources.fr.resx").with_node("Title", "Titre"),
            ))
            .unwrap();

        assert_that!(entry.cultures().len(), eq(2));
        assert_that!(entry.value(&Culture::new("fr")), some(eq("Titre")));
    }

    #[rstest]
    fn comments_round_through_the_store() {
        let languages = shared(&[ResourceFile::new("Resources.resx").with_node("Title", "Title")]);
        let entry = entry("Title", &languages);

        let outcome = entry.set_comment(&Culture::neutral(), "window caption").unwrap();

        assert_that!(outcome.is_applied(), eq(true));
        assert_that!(entry.comment(&Culture::neutral()), some(eq("window caption")));
    }
}
