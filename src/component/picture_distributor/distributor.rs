//! 平均分配與複製
//!
//! 依排序後的順序把圖片切成連續區塊，分給每個子資料夾，
//! 再把每個區塊複製到子資料夾內以日期命名的資料夾。

use super::error::DistributeError;
use super::selection::{DestinationSet, PictureSet, folder_display_name};
use crate::tools::{date_folder_name, ensure_directory_exists, today_folder_name};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// 計算每個區塊的大小
///
/// 前 `total % buckets` 個區塊比其他區塊多一張。
#[must_use]
pub fn split_counts(total: usize, buckets: usize) -> Vec<usize> {
    if buckets == 0 {
        return Vec::new();
    }
    let base = total / buckets;
    let remainder = total % buckets;
    (0..buckets)
        .map(|index| base + usize::from(index < remainder))
        .collect()
}

/// 單一子資料夾分到的圖片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub destination: PathBuf,
    pub pictures: Vec<OsString>,
}

/// 分配計畫：每個子資料夾依序對應一段連續的圖片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    assignments: Vec<Assignment>,
}

impl DistributionPlan {
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[must_use]
    pub fn picture_count(&self) -> usize {
        self.assignments.iter().map(|a| a.pictures.len()).sum()
    }

    /// 依區塊大小切分圖片，不檢查整除
    fn partition(pictures: &PictureSet, destinations: &DestinationSet) -> Self {
        let counts = split_counts(pictures.len(), destinations.len());
        let mut remaining = pictures.names();

        let assignments = destinations
            .folders()
            .iter()
            .zip(counts)
            .map(|(destination, count)| {
                let (block, rest) = remaining.split_at(count);
                remaining = rest;
                Assignment {
                    destination: destination.clone(),
                    pictures: block.to_vec(),
                }
            })
            .collect();

        Self { assignments }
    }
}

/// 建立分配計畫
///
/// 兩個集合都不可為空，且圖片數量必須能被子資料夾數量整除。
pub fn plan(
    pictures: &PictureSet,
    destinations: &DestinationSet,
) -> Result<DistributionPlan, DistributeError> {
    if pictures.is_empty() || destinations.is_empty() {
        return Err(DistributeError::SelectionMissing);
    }

    if pictures.len() % destinations.len() != 0 {
        return Err(DistributeError::UnevenDistribution {
            pictures: pictures.len(),
            destinations: destinations.len(),
        });
    }

    let plan = DistributionPlan::partition(pictures, destinations);
    debug!(
        "分配計畫: {} 張圖片 / {} 個子資料夾",
        plan.picture_count(),
        plan.assignments().len()
    );
    Ok(plan)
}

/// 單一子資料夾的複製數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationCopies {
    pub destination: PathBuf,
    pub copied: usize,
}

/// 複製結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// 計畫中的複製數
    pub attempted: usize,
    /// 成功的複製數
    pub succeeded: usize,
    /// 本次使用的日期資料夾名稱
    pub date_folder: String,
    pub destinations: Vec<DestinationCopies>,
}

impl CopyReport {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.attempted == self.succeeded
    }
}

/// 執行分配計畫
///
/// 日期資料夾名稱在建立時決定，同一次執行不會跨越兩個日期。
#[derive(Debug, Clone)]
pub struct Distributor {
    date_folder: String,
}

impl Default for Distributor {
    fn default() -> Self {
        Self::new()
    }
}

impl Distributor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            date_folder: today_folder_name(),
        }
    }

    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date_folder: date_folder_name(date),
        }
    }

    #[must_use]
    pub fn date_folder(&self) -> &str {
        &self.date_folder
    }

    /// 子資料夾內的日期資料夾路徑
    #[must_use]
    pub fn target_dir(&self, destination: &Path) -> PathBuf {
        destination.join(&self.date_folder)
    }

    pub fn execute(
        &self,
        plan: &DistributionPlan,
        source_dir: &Path,
    ) -> Result<CopyReport, DistributeError> {
        self.execute_with_progress(plan, source_dir, |_, _| {})
    }

    /// 執行複製，每完成一張呼叫一次 `on_copied(圖片名稱, 子資料夾)`
    ///
    /// 第一個錯誤就停止，已複製的檔案保留在原處。
    pub fn execute_with_progress<F>(
        &self,
        plan: &DistributionPlan,
        source_dir: &Path,
        mut on_copied: F,
    ) -> Result<CopyReport, DistributeError>
    where
        F: FnMut(&OsStr, &Path),
    {
        let mut report = CopyReport {
            attempted: plan.picture_count(),
            date_folder: self.date_folder.clone(),
            ..CopyReport::default()
        };

        for assignment in plan.assignments() {
            let target_dir = self.target_dir(&assignment.destination);
            ensure_directory_exists(&target_dir).map_err(|source| {
                DistributeError::CreateTargetDir {
                    path: target_dir.clone(),
                    copied: report.succeeded,
                    source,
                }
            })?;

            let destination_name = folder_display_name(&assignment.destination);
            let mut copied = 0;

            for picture in &assignment.pictures {
                let from = source_dir.join(picture);
                let to = target_dir.join(picture);

                fs::copy(&from, &to).map_err(|source| DistributeError::CopyPicture {
                    from: from.clone(),
                    to: to.clone(),
                    copied: report.succeeded,
                    source,
                })?;

                info!(
                    "已複製 {} 到 {}",
                    picture.to_string_lossy(),
                    destination_name
                );
                copied += 1;
                report.succeeded += 1;
                on_copied(picture, &assignment.destination);
            }

            report.destinations.push(DestinationCopies {
                destination: assignment.destination.clone(),
                copied,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::picture_distributor::ErrorKind;
    use tempfile::TempDir;

    fn pictures(names: &[&str]) -> PictureSet {
        PictureSet::from_names("/pictures", names.iter().copied())
    }

    fn destinations(names: &[&str]) -> DestinationSet {
        DestinationSet::from_folder_names("/students", names.iter().copied())
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()
    }

    #[test]
    fn test_split_counts_even() {
        assert_eq!(split_counts(4, 2), vec![2, 2]);
        assert_eq!(split_counts(9, 3), vec![3, 3, 3]);
    }

    #[test]
    fn test_split_counts_remainder_goes_first() {
        assert_eq!(split_counts(5, 2), vec![3, 2]);
        assert_eq!(split_counts(7, 3), vec![3, 2, 2]);
        assert_eq!(split_counts(2, 4), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_split_counts_no_buckets() {
        assert!(split_counts(5, 0).is_empty());
    }

    #[test]
    fn test_split_counts_sizes_differ_by_at_most_one() {
        for total in 0..40 {
            for buckets in 1..8 {
                let counts = split_counts(total, buckets);
                assert_eq!(counts.len(), buckets);
                assert_eq!(counts.iter().sum::<usize>(), total);

                let max = counts.iter().max().copied().unwrap_or(0);
                let min = counts.iter().min().copied().unwrap_or(0);
                assert!(max - min <= 1, "total={total} buckets={buckets}");
            }
        }
    }

    #[test]
    fn test_plan_contiguous_blocks_in_destination_order() {
        let plan = plan(
            &pictures(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"]),
            &destinations(&["Smith", "Jones"]),
        )
        .unwrap();

        let assignments = plan.assignments();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].destination, Path::new("/students/Jones"));
        assert_eq!(assignments[0].pictures, ["a.jpg", "b.jpg"]);
        assert_eq!(assignments[1].destination, Path::new("/students/Smith"));
        assert_eq!(assignments[1].pictures, ["c.jpg", "d.jpg"]);
    }

    #[test]
    fn test_plan_covers_every_picture_once() {
        let names: Vec<String> = (0..12).map(|i| format!("img_{i:02}.jpg")).collect();
        let picture_set = PictureSet::from_names("/pictures", names.clone());
        let plan = plan(&picture_set, &destinations(&["A", "B", "C"])).unwrap();

        let flattened: Vec<OsString> = plan
            .assignments()
            .iter()
            .flat_map(|a| a.pictures.iter().cloned())
            .collect();

        assert_eq!(flattened, picture_set.names());
        assert!(plan.assignments().iter().all(|a| a.pictures.len() == 4));
        assert_eq!(plan.picture_count(), 12);
    }

    #[test]
    fn test_plan_rejects_uneven_ratio() {
        let result = plan(
            &pictures(&["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"]),
            &destinations(&["Smith", "Jones"]),
        );

        assert!(matches!(
            result,
            Err(DistributeError::UnevenDistribution {
                pictures: 5,
                destinations: 2
            })
        ));
    }

    #[test]
    fn test_plan_rejects_empty_inputs() {
        assert!(matches!(
            plan(&pictures(&[]), &destinations(&["Smith"])),
            Err(DistributeError::SelectionMissing)
        ));
        assert!(matches!(
            plan(&pictures(&["a.jpg"]), &destinations(&[])),
            Err(DistributeError::SelectionMissing)
        ));
    }

    #[test]
    fn test_partition_with_remainder() {
        let plan = DistributionPlan::partition(
            &pictures(&["a", "b", "c", "d", "e"]),
            &destinations(&["A", "B"]),
        );

        assert_eq!(plan.assignments()[0].pictures, ["a", "b", "c"]);
        assert_eq!(plan.assignments()[1].pictures, ["d", "e"]);
    }

    #[test]
    fn test_distributor_date_folder() {
        let distributor = Distributor::for_date(test_date());
        assert_eq!(distributor.date_folder(), "04_09_2024");
        assert_eq!(
            distributor.target_dir(Path::new("/students/Smith")),
            Path::new("/students/Smith/04_09_2024")
        );
    }

    #[test]
    fn test_execute_copies_into_date_folders() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("pictures");
        let root = temp_dir.path().join("students");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(root.join("Jones")).unwrap();
        fs::create_dir_all(root.join("Smith")).unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
            fs::write(source.join(name), name).unwrap();
        }

        let picture_set = PictureSet::scan(&source).unwrap();
        let destination_set = DestinationSet::scan(&root).unwrap();
        let plan = plan(&picture_set, &destination_set).unwrap();

        let distributor = Distributor::for_date(test_date());
        let mut seen = Vec::new();
        let report = distributor
            .execute_with_progress(&plan, &source, |picture, _| seen.push(picture.to_owned()))
            .unwrap();

        assert_eq!(report.attempted, 4);
        assert_eq!(report.succeeded, 4);
        assert!(report.is_complete());
        assert_eq!(report.date_folder, "04_09_2024");
        assert_eq!(seen, ["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);

        let jones = root.join("Jones/04_09_2024");
        let smith = root.join("Smith/04_09_2024");
        assert_eq!(fs::read_to_string(jones.join("a.jpg")).unwrap(), "a.jpg");
        assert!(jones.join("b.jpg").exists());
        assert!(smith.join("c.jpg").exists());
        assert!(smith.join("d.jpg").exists());
        assert!(!smith.join("a.jpg").exists());

        // 來源檔案保留
        assert!(source.join("a.jpg").exists());
    }

    #[test]
    fn test_execute_missing_source_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("pictures");
        let root = temp_dir.path().join("students");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.jpg"), "a").unwrap();

        let plan = plan(
            &PictureSet::from_names(&source, ["a.jpg", "b.jpg"]),
            &DestinationSet::from_folder_names(&root, ["Jones", "Smith"]),
        )
        .unwrap();

        let result = Distributor::for_date(test_date()).execute(&plan, &source);

        let error = result.unwrap_err();
        assert!(matches!(error, DistributeError::CopyPicture { .. }));
        assert_eq!(error.copied_before_failure(), 1);
        assert!(root.join("Jones/04_09_2024/a.jpg").exists());
    }

    #[test]
    fn test_execute_target_dir_blocked_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("pictures");
        let root = temp_dir.path().join("students");
        fs::create_dir_all(&source).unwrap();
        fs::create_dir_all(root.join("Jones")).unwrap();
        fs::create_dir_all(root.join("Smith")).unwrap();
        fs::write(source.join("a.jpg"), "a").unwrap();
        fs::write(source.join("b.jpg"), "b").unwrap();
        // 同名的一般檔案擋住日期資料夾
        fs::write(root.join("Smith/04_09_2024"), "not a folder").unwrap();

        let plan = plan(
            &PictureSet::scan(&source).unwrap(),
            &DestinationSet::scan(&root).unwrap(),
        )
        .unwrap();

        let error = Distributor::for_date(test_date())
            .execute(&plan, &source)
            .unwrap_err();

        assert!(matches!(
            error,
            DistributeError::CreateTargetDir { copied: 1, .. }
        ));
        assert_eq!(error.kind(), ErrorKind::IoFailure);
        assert!(root.join("Jones/04_09_2024/a.jpg").exists());
        assert!(root.join("Smith/04_09_2024").is_file());
    }
}
