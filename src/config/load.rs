use crate::config::types::{Config, LANGUAGE_ENV_VAR, Language, PictureExtensionTable, Settings};
use anyhow::{Context, Result};
use log::warn;

/// 編譯時嵌入的圖片副檔名表（不需要外部檔案）
const PICTURE_EXTENSIONS_JSON: &str = include_str!("data/picture_extensions.json");

impl Config {
    pub fn new() -> Result<Self> {
        let picture_extension_table = Self::load_embedded_extension_table()?;
        let settings = Settings::from_env();

        Ok(Self {
            picture_extension_table,
            settings,
        })
    }

    /// 從編譯時嵌入的 JSON 載入圖片副檔名表
    fn load_embedded_extension_table() -> Result<PictureExtensionTable> {
        serde_json::from_str(PICTURE_EXTENSIONS_JSON).context("無法解析嵌入的圖片副檔名設定")
    }
}

impl Settings {
    /// 從環境變數讀取設定，未設定或無法辨識時使用預設值
    #[must_use]
    pub fn from_env() -> Self {
        let language = match std::env::var(LANGUAGE_ENV_VAR) {
            Ok(code) => Language::from_code(&code).unwrap_or_else(|| {
                warn!("無法辨識的語言代碼 {code}，使用預設語言");
                Language::default()
            }),
            Err(_) => Language::default(),
        };

        Self { language }
    }
}
