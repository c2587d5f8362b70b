//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    ModelSettings,
};

/// ワークスペースルートで探す設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".resx-entity.json";

/// ワークスペースから設定を読み込む
///
/// `.resx-entity.json` ファイルを探して読み込む
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<ModelSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(&config_path)?;
    let settings: ModelSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
