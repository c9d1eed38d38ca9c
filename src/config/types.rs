use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 環境變數：介面語言（例如 `zh-TW`）
pub const LANGUAGE_ENV_VAR: &str = "PICTURE_DISTRIBUTOR_LANG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PictureExtensionTable {
    #[serde(rename = "PICTURE_FILE")]
    pub picture_file: Vec<String>,
    #[serde(rename = "RAW_FILE")]
    pub raw_file: Vec<String>,
}

impl PictureExtensionTable {
    #[must_use]
    pub fn extensions_set(&self) -> HashSet<String> {
        self.picture_file
            .iter()
            .chain(&self.raw_file)
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    /// 依副檔名判斷是否為圖片（不分大小寫）
    #[must_use]
    pub fn is_picture_file(&self, path: &Path) -> bool {
        let extensions = self.extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    EnUs,
    ZhTw,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::ZhTw];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }

    /// 解析語言代碼，接受 `zh-TW`、`zh_TW`、`zh_TW.UTF-8` 等寫法
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code
            .split('.')
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-")
            .to_lowercase();

        match normalized.as_str() {
            "en" | "en-us" => Some(Self::EnUs),
            "zh" | "zh-tw" | "zh-hant" => Some(Self::ZhTw),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 執行期設定（僅存在記憶體中，不會寫入檔案）
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub picture_extension_table: PictureExtensionTable,
    pub settings: Settings,
}
