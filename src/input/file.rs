//! Resource file input definitions

use std::path::{
    Path,
    PathBuf,
};

use crate::culture::{
    Culture,
    is_culture_name,
};

/// A single key of a resource file as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub key: String,
    pub value: String,
    pub comment: Option<String>,
}

impl ResourceNode {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), comment: None }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A physical file backing one language of a resource entity.
///
/// Parsing the file format is the implementor's job; the model only needs the
/// language, the project-relative identity and the parsed nodes.
pub trait ProjectFile {
    fn file_path(&self) -> &Path;

    /// Language name of the file, `""` for the neutral file.
    fn language_name(&self) -> String;

    /// Project-relative name used to compute the entity's relative path.
    ///
    /// `None` when the file is not part of a project.
    fn unique_project_name(&self) -> Option<&str>;

    /// Nodes the language store starts with.
    fn nodes(&self) -> Vec<ResourceNode>;
}

/// In-memory [`ProjectFile`] whose language is derived from its file name.
///
/// # Examples
/// - `Properties/Resources.resx` → base name `Resources`, neutral
/// - `Properties/Resources.de-DE.resx` → base name `Resources`, `de-DE`
/// - `Forms/Main.Designer.resx` → base name `Main.Designer`, neutral
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    file_path: PathBuf,
    base_name: String,
    culture: Culture,
    unique_project_name: Option<String>,
    nodes: Vec<ResourceNode>,
}

impl ResourceFile {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let (base_name, culture) = split_file_name(&file_path);
        Self { file_path, base_name, culture, unique_project_name: None, nodes: Vec::new() }
    }

    #[must_use]
    pub fn with_unique_project_name(mut self, unique_project_name: impl Into<String>) -> Self {
        self.unique_project_name = Some(unique_project_name.into());
        self
    }

    #[must_use]
    pub fn with_node(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.nodes.push(ResourceNode::new(key, value));
        self
    }

    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = ResourceNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// File name without extension and culture suffix.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub const fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Directory containing the file; empty for a bare file name.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

impl ProjectFile for ResourceFile {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn language_name(&self) -> String {
        self.culture.name().to_string()
    }

    fn unique_project_name(&self) -> Option<&str> {
        self.unique_project_name.as_deref()
    }

    fn nodes(&self) -> Vec<ResourceNode> {
        self.nodes.clone()
    }
}

/// Splits `Name.culture.ext` into base name and culture.
///
/// The last dotted segment of the stem is only treated as a culture when it
/// looks like one; otherwise the whole stem is the base name.
fn split_file_name(file_path: &Path) -> (String, Culture) {
    let stem = file_path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();

    match stem.rsplit_once('.') {
        Some((base_name, suffix)) if !base_name.is_empty() && is_culture_name(suffix) => {
            (base_name.to_string(), Culture::new(suffix))
        }
        _ => (stem, Culture::neutral()),
    }
}
