//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use crate::config::ModelSettings;
use crate::input::ResourceFile;
use crate::manager::ResourceManager;
use crate::model::ResourceEntity;

/// デフォルト設定の `ResourceManager` を作成する
pub(crate) fn manager() -> Rc<ResourceManager> {
    Rc::new(ResourceManager::new(ModelSettings::default()).unwrap())
}

/// テスト用の `ResourceFile` を作成する
///
/// # Arguments
/// * `path` - リソースファイルのパス（例: "/src/App/Resources.de.resx"）
/// * `nodes` - キーと値のペア
pub(crate) fn resx(path: &str, nodes: &[(&str, &str)]) -> ResourceFile {
    nodes.iter().fold(ResourceFile::new(path), |file, (key, value)| file.with_node(*key, *value))
}

/// プロジェクト `App` の `/src/App/Properties/Resources` エンティティを作成する
pub(crate) fn entity(owner: &Rc<ResourceManager>, files: &[ResourceFile]) -> ResourceEntity {
    ResourceEntity::new(owner, "App", "Resources", "/src/App/Properties", files).unwrap()
}

/// エントリー順のキー一覧
pub(crate) fn keys(entity: &ResourceEntity) -> Vec<String> {
    entity.entries().iter().map(|entry| entry.key().to_string()).collect()
}
