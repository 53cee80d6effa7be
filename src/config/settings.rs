// src/config/settings.rs
//! ホスト (JS 側) から渡されるランタイム設定だよ。
//! JSON で受け取って、足りない項目はデフォルト値で埋める。

use serde::{Deserialize, Serialize};

use super::board::MAX_PATH_DEPTH;

/// ゲームの動作設定。
///
/// ```json
/// { "max_path_depth": 12, "auto_resolve_after_move": true, "seed": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ヒント探索の深さ上限。
    pub max_path_depth: usize,
    /// カード移動のあとに自動で組札送りをするかどうか。
    pub auto_resolve_after_move: bool,
    /// 配り直しの乱数シード。`None` ならOSの乱数を使う。
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_path_depth: MAX_PATH_DEPTH,
            auto_resolve_after_move: false,
            seed: None,
        }
    }
}

impl Settings {
    /// JSON 文字列から設定を読み込む。
    /// 探索の深さは 1..=MAX_PATH_DEPTH に丸めるよ (再帰の深さを有界に保つため)。
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut settings: Settings = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse settings JSON: {}", e))?;
        settings.max_path_depth = settings.max_path_depth.clamp(1, MAX_PATH_DEPTH);
        Ok(settings)
    }
}
