//! Per-language key/value stores and the map shared by an entity's entries.

use std::cell::RefCell;
use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::rc::Rc;

use super::events::{
    EditOutcome,
    Proceed,
    Veto,
};
use crate::culture::Culture;
use crate::error::EntityError;
use crate::input::ProjectFile;
use crate::ordering::compare_keys;

/// Receives the notifications of a [`ResourceLanguage`].
pub trait LanguageListener {
    /// Called before every write; a [`Veto`] aborts it.
    fn before_change(&self, language: &ResourceLanguage) -> Result<Proceed, Veto>;

    /// Called after a write was applied.
    fn after_change(&self, language: &ResourceLanguage);
}

/// Value and comment stored under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NodeData {
    value: String,
    comment: Option<String>,
}

/// The resources of one language, backed by one physical file.
pub struct ResourceLanguage {
    culture: Culture,
    file_path: PathBuf,
    nodes: BTreeMap<String, NodeData>,
    is_modified: bool,
    listener: Option<Rc<dyn LanguageListener>>,
}

impl ResourceLanguage {
    /// Creates the store from the nodes of `file`.
    ///
    /// When a key occurs more than once, the last occurrence wins.
    pub fn new(file: &impl ProjectFile) -> Self {
        let nodes = file
            .nodes()
            .into_iter()
            .map(|node| (node.key, NodeData { value: node.value, comment: node.comment }))
            .collect();

        Self {
            culture: Culture::new(file.language_name()),
            file_path: file.file_path().to_path_buf(),
            nodes,
            is_modified: false,
            listener: None,
        }
    }

    /// Language name, `""` for the neutral language.
    #[must_use]
    pub fn name(&self) -> &str {
        self.culture.name()
    }

    #[must_use]
    pub const fn culture(&self) -> &Culture {
        &self.culture
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Keys in ordinal order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.nodes.get(key).map(|node| node.value.as_str())
    }

    #[must_use]
    pub fn comment(&self, key: &str) -> Option<&str> {
        self.nodes.get(key).and_then(|node| node.comment.as_deref())
    }

    /// Whether any write was applied since the store was loaded.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Attaches the listener notified on every write, replacing any previous one.
    pub fn set_listener(&mut self, listener: Rc<dyn LanguageListener>) {
        self.listener = Some(listener);
    }

    /// Removes `key`. Absent keys are a no-op and raise nothing.
    pub fn remove_key(&mut self, key: &str) -> EditOutcome {
        if !self.nodes.contains_key(key) {
            return EditOutcome::Unchanged;
        }
        self.apply(|nodes| {
            nodes.remove(key);
        })
    }

    /// Sets the value of `key`, creating the key when it does not exist yet.
    pub fn force_value(&mut self, key: &str, value: &str) -> EditOutcome {
        if self.nodes.get(key).is_some_and(|node| node.value == value) {
            return EditOutcome::Unchanged;
        }
        self.apply(|nodes| {
            nodes.entry(key.to_string()).or_default().value = value.to_string();
        })
    }

    /// Sets the comment of `key`, creating the key with an empty value when needed.
    ///
    /// An empty comment clears it.
    pub fn set_comment(&mut self, key: &str, comment: &str) -> EditOutcome {
        let comment = (!comment.is_empty()).then(|| comment.to_string());
        if self.nodes.get(key).is_some_and(|node| node.comment == comment) {
            return EditOutcome::Unchanged;
        }
        self.apply(|nodes| {
            nodes.entry(key.to_string()).or_default().comment = comment;
        })
    }

    /// Runs `mutation` between the listener's `before_change` and `after_change`.
    fn apply(&mut self, mutation: impl FnOnce(&mut BTreeMap<String, NodeData>)) -> EditOutcome {
        let listener = self.listener.clone();

        if let Some(listener) = &listener
            && let Err(veto) = listener.before_change(self)
        {
            return EditOutcome::Vetoed(veto);
        }

        mutation(&mut self.nodes);
        self.is_modified = true;

        if let Some(listener) = &listener {
            listener.after_change(self);
        }
        EditOutcome::Applied
    }
}

impl fmt::Debug for ResourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceLanguage")
            .field("culture", &self.culture)
            .field("file_path", &self.file_path)
            .field("keys", &self.nodes.len())
            .field("is_modified", &self.is_modified)
            .field("listener", &self.listener.as_ref().map(|_| "<LanguageListener>"))
            .finish()
    }
}

/// The languages of one entity, looked up by culture (case-insensitive).
///
/// Iteration order is the order of insertion; the entity inserts its initial
/// languages sorted by culture, so the neutral language comes first.
#[derive(Debug, Default)]
pub struct LanguageMap {
    languages: Vec<ResourceLanguage>,
}

/// Handle to a [`LanguageMap`] shared by an entity and all of its table entries.
///
/// Languages inserted through any clone of the handle are visible to every
/// holder, including entries created before the insertion.
pub type SharedLanguages = Rc<RefCell<LanguageMap>>;

impl LanguageMap {
    /// Builds a map from `languages` sorted by culture.
    ///
    /// # Errors
    /// [`EntityError::DuplicateLanguage`] when two stores share a culture.
    pub fn from_languages(mut languages: Vec<ResourceLanguage>) -> Result<Self, EntityError> {
        languages.sort_by(|a, b| a.culture.cmp(&b.culture));

        for pair in languages.windows(2) {
            if let [previous, next] = pair
                && previous.culture == next.culture
            {
                return Err(EntityError::DuplicateLanguage(next.culture.clone()));
            }
        }

        Ok(Self { languages })
    }

    /// Appends `language` after the existing ones.
    ///
    /// # Errors
    /// [`EntityError::DuplicateLanguage`] when the culture is already present.
    pub fn insert(&mut self, language: ResourceLanguage) -> Result<(), EntityError> {
        if self.contains(&language.culture) {
            return Err(EntityError::DuplicateLanguage(language.culture));
        }
        self.languages.push(language);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    #[must_use]
    pub fn contains(&self, culture: &Culture) -> bool {
        self.get(culture).is_some()
    }

    #[must_use]
    pub fn get(&self, culture: &Culture) -> Option<&ResourceLanguage> {
        self.languages.iter().find(|language| language.culture == *culture)
    }

    pub fn get_mut(&mut self, culture: &Culture) -> Option<&mut ResourceLanguage> {
        self.languages.iter_mut().find(|language| language.culture == *culture)
    }

    /// The neutral (default) language: the first one in iteration order.
    #[must_use]
    pub fn first(&self) -> Option<&ResourceLanguage> {
        self.languages.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut ResourceLanguage> {
        self.languages.first_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceLanguage> {
        self.languages.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ResourceLanguage> {
        self.languages.iter_mut()
    }

    #[must_use]
    pub fn cultures(&self) -> Vec<Culture> {
        self.languages.iter().map(|language| language.culture.clone()).collect()
    }

    /// Union of the keys of all languages, without duplicates, sorted by their
    /// upper-invariant form.
    #[must_use]
    pub fn distinct_keys(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self.languages.iter().flat_map(ResourceLanguage::keys).collect();
        let mut keys: Vec<String> = unique.into_iter().map(str::to_string).collect();
        keys.sort_by(|a, b| compare_keys(a, b));
        keys
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::input::ResourceFile;

    /// Counts notifications and vetoes every change while `veto` is set.
    #[derive(Default)]
    struct RecordingListener {
        veto: Cell<bool>,
        before: Cell<usize>,
        after: Cell<usize>,
    }

    impl LanguageListener for RecordingListener {
        fn before_change(&self, _language: &ResourceLanguage) -> Result<Proceed, Veto> {
            self.before.set(self.before.get() + 1);
            if self.veto.get() { Err(Veto::with_reason("locked")) } else { Ok(Proceed) }
        }

        fn after_change(&self, _language: &ResourceLanguage) {
            self.after.set(self.after.get() + 1);
        }
    }

    fn language(path: &str, nodes: &[(&str, &str)]) -> ResourceLanguage {
        let file = nodes
            .iter()
            .fold(ResourceFile::new(path), |file, (key, value)| file.with_node(*key, *value));
        ResourceLanguage::new(&file)
    }

    fn listened(nodes: &[(&str, &str)]) -> (ResourceLanguage, Rc<RecordingListener>) {
        let mut store = language("Resources.de.resx", nodes);
        let listener = Rc::new(RecordingListener::default());
        store.set_listener(Rc::clone(&listener) as Rc<dyn LanguageListener>);
        (store, listener)
    }

    #[rstest]
    fn new_reads_file_nodes() {
        let store = language("Resources.de.resx", &[("B", "b"), ("A", "a")]);

        assert_that!(store.name(), eq("de"));
        assert_that!(store.keys().collect::<Vec<_>>(), elements_are![eq(&"A"), eq(&"B")]);
        assert_that!(store.value("A"), some(eq("a")));
        assert_that!(store.is_modified(), eq(false));
    }

    #[rstest]
    fn force_value_creates_missing_key() {
        let (mut store, listener) = listened(&[]);

        let outcome = store.force_value("Title", "Titel");

        assert_that!(outcome, eq(&EditOutcome::Applied));
        assert_that!(store.value("Title"), some(eq("Titel")));
        assert_that!(store.is_modified(), eq(true));
        assert_that!(listener.before.get(), eq(1));
        assert_that!(listener.after.get(), eq(1));
    }

    #[rstest]
    fn force_value_with_same_value_is_unchanged() {
        let (mut store, listener) = listened(&[("Title", "Titel")]);

        let outcome = store.force_value("Title", "Titel");

        assert_that!(outcome, eq(&EditOutcome::Unchanged));
        assert_that!(listener.before.get(), eq(0));
        assert_that!(store.is_modified(), eq(false));
    }

    #[rstest]
    fn remove_absent_key_raises_nothing() {
        let (mut store, listener) = listened(&[("Title", "Titel")]);

        let outcome = store.remove_key("Missing");

        assert_that!(outcome, eq(&EditOutcome::Unchanged));
        assert_that!(listener.before.get(), eq(0));
        assert_that!(listener.after.get(), eq(0));
    }

    #[rstest]
    fn vetoed_write_leaves_store_untouched() {
        let (mut store, listener) = listened(&[("Title", "Titel")]);
        listener.veto.set(true);

        let removed = store.remove_key("Title");
        let forced = store.force_value("Other", "x");

        assert_that!(removed, eq(&EditOutcome::Vetoed(Veto::with_reason("locked"))));
        assert_that!(forced.is_vetoed(), eq(true));
        assert_that!(store.value("Title"), some(eq("Titel")));
        assert_that!(store.contains_key("Other"), eq(false));
        assert_that!(store.is_modified(), eq(false));
        assert_that!(listener.after.get(), eq(0));
    }

    #[rstest]
    fn set_comment_creates_key_and_clears_with_empty() {
        let (mut store, _listener) = listened(&[]);

        assert_that!(store.set_comment("Title", "shown in header"), eq(&EditOutcome::Applied));
        assert_that!(store.value("Title"), some(eq("")));
        assert_that!(store.comment("Title"), some(eq("shown in header")));

        assert_that!(store.set_comment("Title", ""), eq(&EditOutcome::Applied));
        assert_that!(store.comment("Title"), none());
    }

    #[rstest]
    fn map_sorts_languages_and_rejects_duplicates() {
        let map = LanguageMap::from_languages(vec![
            language("Resources.fr.resx", &[]),
            language("Resources.resx", &[]),
            language("Resources.de.resx", &[]),
        ])
        .unwrap();

        assert_that!(
            map.cultures().iter().map(ToString::to_string).collect::<Vec<_>>(),
            elements_are![eq(""), eq("de"), eq("fr")]
        );
        assert_that!(map.first().map(ResourceLanguage::name), some(eq("")));

        let duplicate = LanguageMap::from_languages(vec![
            language("Resources.de.resx", &[]),
            language("Other.DE.resx", &[]),
        ]);
        assert_that!(duplicate, err(eq(&EntityError::DuplicateLanguage(Culture::new("de")))));
    }

    #[rstest]
    fn insert_appends_and_rejects_known_culture() {
        let mut map = LanguageMap::from_languages(vec![language("Resources.resx", &[])]).unwrap();

        map.insert(language("Resources.de.resx", &[])).unwrap();
        let result = map.insert(language("Resources.DE.resx", &[]));

        assert_that!(map.len(), eq(2));
        assert_that!(map.contains(&Culture::new("De")), eq(true));
        assert_that!(result, err(anything()));
    }

    #[rstest]
    fn distinct_keys_are_unique_and_sorted_ignoring_case() {
        let map = LanguageMap::from_languages(vec![
            language("Resources.resx", &[("beta", "1"), ("Alpha", "2"), ("a_b", "3")]),
            language("Resources.de.resx", &[("alpha", "x"), ("beta", "y"), ("AZ", "z")]),
        ])
        .unwrap();

        assert_that!(
            map.distinct_keys(),
            elements_are![eq("Alpha"), eq("alpha"), eq("AZ"), eq("a_b"), eq("beta")]
        );
    }
}
