//! Per-language resource files consumed by the model.
pub mod file;

pub use file::{
    ProjectFile,
    ResourceFile,
    ResourceNode,
};
