//! Owner of resource entities.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::{
    ConfigManager,
    MatcherError,
    ModelSettings,
    ResourceFileMatcher,
};
use crate::error::EntityError;
use crate::input::{
    ProjectFile,
    ResourceFile,
};
use crate::model::ResourceEntity;
use crate::ordering::upper_invariant;

/// Creates resource entities and hands them its settings.
///
/// Entities keep a weak reference to their manager; dropping the manager does
/// not invalidate them, `add_new_key` then falls back to the default template.
#[derive(Debug)]
pub struct ResourceManager {
    settings: ModelSettings,
    matcher: ResourceFileMatcher,
}

/// Files of one entity: same directory and base name.
#[derive(Debug)]
struct FileGroup {
    directory: PathBuf,
    base_name: String,
    files: Vec<ResourceFile>,
}

impl ResourceManager {
    /// # Errors
    /// Invalid include or exclude patterns.
    pub fn new(settings: ModelSettings) -> Result<Self, MatcherError> {
        let matcher = ResourceFileMatcher::new(&settings)?;
        Ok(Self { settings, matcher })
    }

    /// Uses the settings currently held by `config`.
    ///
    /// # Errors
    /// Invalid include or exclude patterns.
    pub fn from_config(config: &ConfigManager) -> Result<Self, MatcherError> {
        Self::new(config.get_settings().clone())
    }

    #[must_use]
    pub const fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Groups `files` by directory and base name and creates one entity per group.
    ///
    /// Files not matching the configured patterns are skipped. Grouping ignores
    /// case; the first file of a group supplies the spelling of its names. The
    /// entities are returned in entity order.
    ///
    /// # Errors
    /// Any error of [`ResourceEntity::new`], e.g. two files of one group
    /// resolving to the same language.
    pub fn create_entities(
        self: &Rc<Self>,
        project_name: &str,
        files: Vec<ResourceFile>,
    ) -> Result<Vec<ResourceEntity>, EntityError> {
        let mut groups: BTreeMap<(String, String), FileGroup> = BTreeMap::new();

        for file in files {
            if !self.matcher.is_resource_file(file.file_path()) {
                tracing::debug!(path = %file.file_path().display(), "Skipping non-resource file");
                continue;
            }

            let group_key = (
                upper_invariant(&file.directory().to_string_lossy()),
                upper_invariant(file.base_name()),
            );
            groups
                .entry(group_key)
                .or_insert_with(|| FileGroup {
                    directory: file.directory().to_path_buf(),
                    base_name: file.base_name().to_string(),
                    files: Vec::new(),
                })
                .files
                .push(file);
        }

        let mut entities = groups
            .into_values()
            .map(|group| {
                ResourceEntity::new(
                    self,
                    project_name,
                    &group.base_name,
                    group.directory,
                    &group.files,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        entities.sort();

        tracing::debug!(project_name, entities = entities.len(), "Created resource entities");
        Ok(entities)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::culture::Culture;

    fn manager() -> Rc<ResourceManager> {
        Rc::new(ResourceManager::new(ModelSettings::default()).unwrap())
    }

    #[rstest]
    fn groups_languages_of_one_resource() {
        let files = vec![
            ResourceFile::new("/src/App/Properties/Resources.de.resx").with_node("Title", "Titel"),
            ResourceFile::new("/src/App/Properties/Resources.resx").with_node("Title", "Title"),
            ResourceFile::new("/src/App/Properties/Errors.resx").with_node("NotFound", "Not found"),
        ];

        let entities = manager().create_entities("App", files).unwrap();

        assert_that!(
            entities.iter().map(ToString::to_string).collect::<Vec<_>>(),
            elements_are![eq("App - Errors"), eq("App - Resources")]
        );
        assert_that!(
            entities[1].cultures(),
            elements_are![eq(&Culture::neutral()), eq(&Culture::new("de"))]
        );
    }

    #[rstest]
    fn same_base_name_in_other_directory_is_another_entity() {
        let files = vec![
            ResourceFile::new("/src/App/A/Resources.resx"),
            ResourceFile::new("/src/App/B/Resources.resx"),
        ];

        let entities = manager().create_entities("App", files).unwrap();

        assert_that!(entities.len(), eq(2));
    }

    #[rstest]
    fn sharp_s_and_double_s_are_separate_groups() {
        let files = vec![
            ResourceFile::new("/src/App/Maße.resx"),
            ResourceFile::new("/src/App/MASSE.resx"),
            ResourceFile::new("/src/App/masse.de.resx"),
        ];

        let entities = manager().create_entities("App", files).unwrap();

        assert_that!(
            entities.iter().map(ToString::to_string).collect::<Vec<_>>(),
            elements_are![eq("App - MASSE"), eq("App - Maße")]
        );
        assert_that!(entities[0].cultures().len(), eq(2));
    }

    #[rstest]
    fn skips_files_outside_patterns() {
        let files = vec![
            ResourceFile::new("/src/App/Resources.resx"),
            ResourceFile::new("/src/App/bin/Debug/Resources.resx"),
            ResourceFile::new("/src/App/App.csproj"),
        ];

        let entities = manager().create_entities("App", files).unwrap();

        assert_that!(entities.len(), eq(1));
        assert_that!(entities[0].directory(), eq(std::path::Path::new("/src/App")));
    }

    #[rstest]
    fn duplicate_language_in_group_fails() {
        let files = vec![
            ResourceFile::new("/src/App/Resources.de.resx"),
            ResourceFile::new("/src/App/resources.DE.resx"),
        ];

        let result = manager().create_entities("App", files);

        assert_that!(result, err(eq(&EntityError::DuplicateLanguage(Culture::new("de")))));
    }

    #[rstest]
    fn entities_keep_a_weak_owner() {
        let manager = manager();
        let entities =
            manager.create_entities("App", vec![ResourceFile::new("/src/App/Resources.resx")]).unwrap();

        assert_that!(entities[0].owner().is_some(), eq(true));
        drop(manager);
        assert_that!(entities[0].owner().is_none(), eq(true));
    }
}
