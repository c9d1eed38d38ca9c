//! 分配流程的錯誤類型

use std::path::PathBuf;
use thiserror::Error;

/// 錯誤分類，決定前端要顯示哪一種訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 尚未選擇圖片資料夾或子資料夾目錄
    SelectionMissing,
    /// 圖片數量無法被子資料夾數量整除
    UnevenDistribution,
    /// 檔案系統操作失敗
    IoFailure,
}

#[derive(Error, Debug)]
pub enum DistributeError {
    #[error("missing folder selection: choose both a picture folder and a directory with subfolders")]
    SelectionMissing,

    #[error(
        "non-whole-number ratio: {pictures} pictures cannot be split evenly across {destinations} subfolders"
    )]
    UnevenDistribution { pictures: usize, destinations: usize },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to create folder {path}: {source}")]
    CreateTargetDir {
        path: PathBuf,
        copied: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    CopyPicture {
        from: PathBuf,
        to: PathBuf,
        copied: usize,
        #[source]
        source: std::io::Error,
    },
}

impl DistributeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SelectionMissing => ErrorKind::SelectionMissing,
            Self::UnevenDistribution { .. } => ErrorKind::UnevenDistribution,
            Self::DirectoryNotFound { .. }
            | Self::ReadDirectory { .. }
            | Self::CreateTargetDir { .. }
            | Self::CopyPicture { .. } => ErrorKind::IoFailure,
        }
    }

    /// 失敗前已完成的複製數量（這些檔案不會被還原）
    #[must_use]
    pub const fn copied_before_failure(&self) -> usize {
        match self {
            Self::CreateTargetDir { copied, .. } | Self::CopyPicture { copied, .. } => *copied,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            DistributeError::SelectionMissing.kind(),
            ErrorKind::SelectionMissing
        );
        assert_eq!(
            DistributeError::UnevenDistribution {
                pictures: 5,
                destinations: 2
            }
            .kind(),
            ErrorKind::UnevenDistribution
        );

        let copy_error = DistributeError::CopyPicture {
            from: PathBuf::from("/pictures/a.jpg"),
            to: PathBuf::from("/students/Jones/04_09_2024/a.jpg"),
            copied: 3,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(copy_error.kind(), ErrorKind::IoFailure);
        assert_eq!(copy_error.copied_before_failure(), 3);
    }

    #[test]
    fn test_uneven_message_names_counts() {
        let message = DistributeError::UnevenDistribution {
            pictures: 5,
            destinations: 2,
        }
        .to_string();

        assert!(message.contains("non-whole-number ratio"));
        assert!(message.contains('5'));
        assert!(message.contains('2'));
    }
}
