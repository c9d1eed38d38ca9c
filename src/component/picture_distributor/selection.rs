//! 選擇狀態
//!
//! 使用者每次選擇資料夾都會重新掃描並產生新的 [`SelectionState`]，
//! 分配計算只依賴這個不可變的狀態。

use super::directory_lister::{EntryKind, enumerate};
use super::distributor::{DistributionPlan, plan};
use super::error::DistributeError;
use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// 圖片來源資料夾中的檔案（依名稱排序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSet {
    source_dir: PathBuf,
    names: Vec<OsString>,
}

impl PictureSet {
    /// 掃描圖片資料夾中的所有檔案
    pub fn scan(source_dir: &Path) -> Result<Self, DistributeError> {
        let names = enumerate(source_dir, EntryKind::File)?;
        Ok(Self {
            source_dir: source_dir.to_path_buf(),
            names,
        })
    }

    #[must_use]
    pub fn from_names<I, S>(source_dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut names: Vec<OsString> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self {
            source_dir: source_dir.into(),
            names,
        }
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    #[must_use]
    pub fn names(&self) -> &[OsString] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// 目的地目錄底下的子資料夾（依名稱排序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSet {
    root: PathBuf,
    folders: Vec<PathBuf>,
}

impl DestinationSet {
    /// 掃描目錄中的所有子資料夾
    pub fn scan(root: &Path) -> Result<Self, DistributeError> {
        let folders = enumerate(root, EntryKind::Directory)?
            .into_iter()
            .map(|name| root.join(name))
            .collect();
        Ok(Self {
            root: root.to_path_buf(),
            folders,
        })
    }

    #[must_use]
    pub fn from_folder_names<I, S>(root: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let root = root.into();
        let mut names: Vec<OsString> = names.into_iter().map(Into::into).collect();
        names.sort();
        let folders = names.into_iter().map(|name| root.join(name)).collect();
        Self { root, folders }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// 子資料夾的顯示名稱
    pub fn display_names(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.folders.iter().map(|folder| folder_display_name(folder))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// 取得資料夾最後一段名稱，用於顯示與日誌
#[must_use]
pub fn folder_display_name(folder: &Path) -> Cow<'_, str> {
    folder
        .file_name()
        .map_or_else(|| folder.to_string_lossy(), |name| name.to_string_lossy())
}

/// 每個子資料夾分到的圖片數（僅供顯示）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    PerDestination(f64),
    NoDestinations,
}

impl Ratio {
    /// 是否為整數比例
    #[must_use]
    pub fn is_whole(self) -> bool {
        matches!(self, Self::PerDestination(value) if value.fract() == 0.0)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerDestination(value) => write!(f, "{value:.2}"),
            Self::NoDestinations => write!(f, "-"),
        }
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_ratio(picture_count: usize, destination_count: usize) -> Ratio {
    if destination_count == 0 {
        return Ratio::NoDestinations;
    }
    Ratio::PerDestination(picture_count as f64 / destination_count as f64)
}

/// 目前選擇的圖片資料夾與子資料夾目錄
///
/// 重新選擇時會以新的集合整個取代舊的集合。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pictures: Option<PictureSet>,
    destinations: Option<DestinationSet>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pictures(self, pictures: PictureSet) -> Self {
        Self {
            pictures: Some(pictures),
            ..self
        }
    }

    #[must_use]
    pub fn with_destinations(self, destinations: DestinationSet) -> Self {
        Self {
            destinations: Some(destinations),
            ..self
        }
    }

    #[must_use]
    pub const fn pictures(&self) -> Option<&PictureSet> {
        self.pictures.as_ref()
    }

    #[must_use]
    pub const fn destinations(&self) -> Option<&DestinationSet> {
        self.destinations.as_ref()
    }

    /// 圖片資料夾選好之後才有比例可顯示
    #[must_use]
    pub fn ratio(&self) -> Option<Ratio> {
        let pictures = self.pictures.as_ref()?;
        let destination_count = self.destinations.as_ref().map_or(0, DestinationSet::len);
        Some(compute_ratio(pictures.len(), destination_count))
    }

    /// 兩個資料夾都已選擇且非空時回傳兩個集合
    pub fn require(&self) -> Result<(&PictureSet, &DestinationSet), DistributeError> {
        match (&self.pictures, &self.destinations) {
            (Some(pictures), Some(destinations))
                if !pictures.is_empty() && !destinations.is_empty() =>
            {
                Ok((pictures, destinations))
            }
            _ => Err(DistributeError::SelectionMissing),
        }
    }

    pub fn plan(&self) -> Result<DistributionPlan, DistributeError> {
        let (pictures, destinations) = self.require()?;
        plan(pictures, destinations)
    }
}
