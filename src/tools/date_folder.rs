//! 日期資料夾命名
//!
//! 每次分配時，圖片會被複製到目的地底下以當天日期命名的資料夾（月_日_年）

use chrono::{Local, NaiveDate};

/// 日期資料夾格式：兩位數月、兩位數日、四位數年，以底線分隔
pub const DATE_FOLDER_FORMAT: &str = "%m_%d_%Y";

#[must_use]
pub fn date_folder_name(date: NaiveDate) -> String {
    date.format(DATE_FOLDER_FORMAT).to_string()
}

/// 以本地時間的今天產生資料夾名稱
#[must_use]
pub fn today_folder_name() -> String {
    date_folder_name(Local::now().date_naive())
}
