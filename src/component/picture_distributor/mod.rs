//! 圖片平均分配元件
//!
//! 把圖片資料夾中的檔案平均分給目錄底下的每個子資料夾，
//! 並複製到各子資料夾內以當天日期命名的資料夾

mod directory_lister;
mod distributor;
mod error;
mod main;
mod selection;

pub use directory_lister::{EntryKind, enumerate};
pub use distributor::{
    Assignment, CopyReport, DestinationCopies, DistributionPlan, Distributor, plan, split_counts,
};
pub use error::{DistributeError, ErrorKind};
pub use main::PictureDistributor;
pub use selection::{
    DestinationSet, PictureSet, Ratio, SelectionState, compute_ratio, folder_display_name,
};
