//! Naming and ordering of resource entities.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::path::{
    Path,
    PathBuf,
};

use super::entity::ResourceEntity;
use crate::ordering::{
    compare_ignore_case,
    hash_ignore_case,
    rfind_ignore_case,
};

/// Separator between project name and the rest of the display name.
const NAME_SEPARATOR: &str = " - ";

/// Names of a resource entity, computed once at construction.
///
/// Shared between the entity and its table entries, which report it as the
/// source of their edits.
#[derive(Debug, Clone)]
pub struct EntityIdentity {
    project_name: String,
    base_name: String,
    directory: PathBuf,
    relative_path: String,
    display_name: String,
    sort_key: String,
}

impl EntityIdentity {
    /// Builds the identity; `unique_project_name` is the project-relative name of
    /// the first backing file, if any.
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        base_name: impl Into<String>,
        directory: impl Into<PathBuf>,
        unique_project_name: Option<&str>,
    ) -> Self {
        let project_name = project_name.into();
        let base_name = base_name.into();
        let directory = directory.into();

        let relative_path = relative_path(&directory, unique_project_name);
        let display_name = format!("{project_name}{NAME_SEPARATOR}{relative_path}{base_name}");
        let sort_key = format!("{NAME_SEPARATOR}{display_name}{}", directory.display());

        Self { project_name, base_name, directory, relative_path, display_name, sort_key }
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the directory relative to the project root, ending with `/`;
    /// empty when it cannot be determined.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// `"<project> - <relative path><base name>"`
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }
}

impl PartialEq for EntityIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EntityIdentity {}

impl PartialOrd for EntityIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        compare_ignore_case(&self.sort_key, &other.sort_key)
    }
}

impl Hash for EntityIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.sort_key, state);
    }
}

impl fmt::Display for EntityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Orders two optional entities.
///
/// `None` sorts below any entity, an entity is always equal to itself, all other
/// pairs compare their sort keys case-insensitively. The comparison operators,
/// `Ord` and `Hash` of [`ResourceEntity`] all agree with this function.
#[must_use]
pub fn compare_entities(a: Option<&ResourceEntity>, b: Option<&ResourceEntity>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) if std::ptr::eq(a, b) => Ordering::Equal,
        (Some(a), Some(b)) => a.identity().cmp(b.identity()),
    }
}

/// Locates the project-relative directory of an entity.
///
/// The directory part of `unique_project_name` is searched (case-insensitively,
/// last occurrence) as a path segment of `directory`; the relative path is
/// everything from that segment on.
///
/// # Examples
/// - `/src/MyProj/sub/` + `sub/Strings.resx` → `sub/`
/// - `/src/MyProj/Properties` + `MyProj/MyProj.csproj` → `MyProj/Properties/`
/// - no unique project name, or no match → empty
fn relative_path(directory: &Path, unique_project_name: Option<&str>) -> String {
    let Some(unique_project_name) = unique_project_name else {
        return String::new();
    };

    let unique_project_name = unique_project_name.replace('\\', "/");
    let Some((project_folder, _)) = unique_project_name.rsplit_once('/') else {
        return String::new();
    };
    if project_folder.is_empty() {
        return String::new();
    }

    let directory = directory.to_string_lossy().replace('\\', "/");
    let directory = format!("{}/", directory.trim_end_matches('/'));
    let pattern = format!("/{project_folder}/");

    rfind_ignore_case(&directory, &pattern)
        .and_then(|index| directory.get(index + 1..))
        .map(str::to_string)
        .unwrap_or_default()
}
