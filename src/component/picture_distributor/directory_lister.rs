//! 目錄列舉
//!
//! 只讀取指定目錄的直接子項目，依種類過濾並以名稱字典序排序

use super::error::DistributeError;
use log::warn;
use std::ffi::OsString;
use std::fs::{self, FileType};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// 要列出的項目種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 一般檔案（圖片來源）
    File,
    /// 資料夾（分配目的地）
    Directory,
}

impl EntryKind {
    fn matches(self, file_type: FileType) -> bool {
        match self {
            Self::File => file_type.is_file(),
            Self::Directory => file_type.is_dir(),
        }
    }
}

/// 取得項目的種類，符號連結以連結目標判斷
fn resolved_file_type(entry: &DirEntry) -> Option<FileType> {
    if !entry.path_is_symlink() {
        return Some(entry.file_type());
    }
    match fs::metadata(entry.path()) {
        Ok(metadata) => Some(metadata.file_type()),
        Err(e) => {
            warn!("無法讀取連結目標 {}: {e}", entry.path().display());
            None
        }
    }
}

/// 列出 `directory` 底下符合 `kind` 的直接子項目名稱
///
/// 符號連結會被追蹤，以連結目標的種類判斷。無法讀取的單一項目（例如失效的連結）
/// 會被略過；目錄本身無法讀取時回傳錯誤。
pub fn enumerate(directory: &Path, kind: EntryKind) -> Result<Vec<OsString>, DistributeError> {
    if !directory.is_dir() {
        return Err(DistributeError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut names = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() > 0 => {
                warn!("讀取目錄項目失敗: {e}");
                continue;
            }
            Err(source) => {
                return Err(DistributeError::ReadDirectory {
                    path: directory.to_path_buf(),
                    source,
                });
            }
        };

        let Some(file_type) = resolved_file_type(&entry) else {
            continue;
        };

        if kind.matches(file_type) {
            names.push(entry.file_name().to_os_string());
        }
    }

    Ok(names)
}
