use super::distributor::{CopyReport, DistributionPlan, Distributor, plan};
use super::error::{DistributeError, ErrorKind};
use super::selection::{
    DestinationSet, PictureSet, Ratio, SelectionState, folder_display_name,
};
use crate::config::Config;
use crate::pause;
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};

/// 清單最多顯示的項目數
const DISPLAY_LIMIT: usize = 20;

/// 圖片平均分配元件
pub struct PictureDistributor {
    config: Config,
}

impl PictureDistributor {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self, term: &Term) -> Result<()> {
        let mut selection = SelectionState::new();

        loop {
            term.clear_screen()?;
            println!("{}", style(t!("distributor.title")).cyan().bold());
            println!("{}", style(t!("common.esc_hint")).dim());

            self.print_selection(&selection);

            let options = vec![
                t!("distributor.opt_choose_subfolders"),
                t!("distributor.opt_choose_pictures"),
                t!("distributor.opt_move"),
                t!("distributor.back"),
            ];

            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("distributor.prompt"))
                .items(&options)
                .default(0)
                .interact_on_opt(term)?;

            match choice {
                Some(0) => {
                    if let Some(destinations) = self.choose_destinations(term)? {
                        selection = selection.with_destinations(destinations);
                    }
                }
                Some(1) => {
                    if let Some(pictures) = self.choose_pictures(term)? {
                        selection = selection.with_pictures(pictures);
                    }
                }
                Some(2) => {
                    self.move_pictures(&selection)?;
                    pause(term)?;
                }
                Some(3) | None => break,
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    fn choose_destinations(&self, term: &Term) -> Result<Option<DestinationSet>> {
        let Some(root) = self.prompt_directory(term, &t!("distributor.prompt_subfolder_root"))?
        else {
            return Ok(None);
        };

        match DestinationSet::scan(&root) {
            Ok(destinations) => {
                info!(
                    "選擇子資料夾目錄: {} ({} 個子資料夾)",
                    root.display(),
                    destinations.len()
                );
                Ok(Some(destinations))
            }
            Err(e) => {
                self.print_error(&e);
                pause(term)?;
                Ok(None)
            }
        }
    }

    fn choose_pictures(&self, term: &Term) -> Result<Option<PictureSet>> {
        let Some(source_dir) =
            self.prompt_directory(term, &t!("distributor.prompt_picture_folder"))?
        else {
            return Ok(None);
        };

        match PictureSet::scan(&source_dir) {
            Ok(pictures) => {
                info!(
                    "選擇圖片資料夾: {} ({} 個檔案)",
                    source_dir.display(),
                    pictures.len()
                );
                Ok(Some(pictures))
            }
            Err(e) => {
                self.print_error(&e);
                pause(term)?;
                Ok(None)
            }
        }
    }

    /// 輸入資料夾路徑，空白代表取消
    fn prompt_directory(&self, term: &Term, prompt: &str) -> Result<Option<PathBuf>> {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                let path = clean_path_input(input);
                if path.is_empty() {
                    return Ok(());
                }
                validate_directory_exists(Path::new(path)).map_err(|e| e.to_string())
            })
            .interact_text_on(term)?;

        let path = clean_path_input(&input);
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(path)))
    }

    fn confirm_move(&self) -> Result<bool> {
        let confirm = Confirm::new()
            .with_prompt(t!("distributor.confirm"))
            .default(true)
            .interact()?;
        Ok(confirm)
    }

    fn move_pictures(&self, selection: &SelectionState) -> Result<()> {
        let prepared = selection.require().and_then(|(pictures, destinations)| {
            Ok((pictures, destinations, plan(pictures, destinations)?))
        });

        let (pictures, destinations, plan) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                self.print_error(&e);
                return Ok(());
            }
        };

        let distributor = Distributor::new();
        self.print_plan_preview(&plan, destinations, &distributor);

        if !self.confirm_move()? {
            println!("{}", style(t!("distributor.cancelled")).yellow());
            return Ok(());
        }

        let progress_bar = ProgressBar::new(plan.picture_count() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        let result = distributor.execute_with_progress(
            &plan,
            pictures.source_dir(),
            |picture, destination| {
                progress_bar.set_message(format!(
                    "{} → {}",
                    picture.to_string_lossy(),
                    folder_display_name(destination)
                ));
                progress_bar.inc(1);
            },
        );

        match result {
            Ok(report) => {
                progress_bar.finish_and_clear();
                self.print_result(&report);
            }
            Err(e) => {
                progress_bar.abandon();
                self.print_error(&e);
            }
        }

        Ok(())
    }

    fn print_selection(&self, selection: &SelectionState) {
        println!();

        match selection.destinations() {
            Some(destinations) => {
                println!(
                    "{}",
                    style(t!("distributor.total_subfolders", count = destinations.len())).green()
                );
                println!("  {}", style(destinations.root().display()).dim());
                let names: Vec<String> = destinations
                    .display_names()
                    .map(|name| name.into_owned())
                    .collect();
                print_limited(&names, |name| format!("  {} {name}", style("•").dim()));
            }
            None => println!(
                "{}",
                style(t!("distributor.total_subfolders", count = 0)).dim()
            ),
        }

        println!();

        match selection.pictures() {
            Some(pictures) => {
                println!(
                    "{}",
                    style(t!("distributor.total_pictures", count = pictures.len())).green()
                );
                println!("  {}", style(pictures.source_dir().display()).dim());

                let table = &self.config.picture_extension_table;
                let mut unrecognized = 0;
                let lines: Vec<String> = pictures
                    .names()
                    .iter()
                    .map(|name| {
                        let display = name.to_string_lossy();
                        if table.is_picture_file(Path::new(name)) {
                            format!("  {} {display}", style("•").dim())
                        } else {
                            unrecognized += 1;
                            format!("  {} {display}", style("?").yellow())
                        }
                    })
                    .collect();
                print_limited(&lines, String::clone);

                if unrecognized > 0 {
                    warn!("圖片資料夾中有 {unrecognized} 個非圖片副檔名的檔案");
                    println!(
                        "{}",
                        style(t!("distributor.unrecognized", count = unrecognized)).yellow()
                    );
                }
            }
            None => println!(
                "{}",
                style(t!("distributor.total_pictures", count = 0)).dim()
            ),
        }

        println!();

        match selection.ratio() {
            Some(ratio @ Ratio::PerDestination(_)) => {
                let line = t!("distributor.ratio", ratio = ratio);
                if ratio.is_whole() {
                    println!("{}", style(line).cyan());
                } else {
                    println!("{}", style(line).yellow());
                }
            }
            Some(Ratio::NoDestinations) => {
                println!("{}", style(t!("distributor.no_subfolders")).dim());
            }
            None => {}
        }

        println!();
    }

    fn print_plan_preview(
        &self,
        plan: &DistributionPlan,
        destinations: &DestinationSet,
        distributor: &Distributor,
    ) {
        println!();
        println!(
            "{}",
            style(t!(
                "distributor.preview_title",
                pictures = plan.picture_count(),
                subfolders = destinations.len(),
                date = distributor.date_folder()
            ))
            .green()
        );

        let lines: Vec<String> = plan
            .assignments()
            .iter()
            .map(|assignment| {
                let first = assignment
                    .pictures
                    .first()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let last = assignment
                    .pictures
                    .last()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!(
                    "  {} {} ({}) : {first} … {last}",
                    style("→").dim(),
                    style(folder_display_name(&assignment.destination)).cyan(),
                    assignment.pictures.len()
                )
            })
            .collect();
        print_limited(&lines, String::clone);

        debug!("分配計畫: {plan:?}");
        println!();
    }

    fn print_result(&self, report: &CopyReport) {
        println!();
        println!("{}", style(t!("distributor.result_title")).cyan().bold());
        println!(
            "  {}",
            style(t!(
                "distributor.result_copied",
                succeeded = report.succeeded,
                attempted = report.attempted
            ))
            .green()
        );
        println!(
            "  {}",
            t!("distributor.result_date_folder", date = report.date_folder.as_str())
        );
        println!();
        println!("{}", style(t!("distributor.success")).green().bold());

        info!(
            "分配完成 - 成功: {}/{}，日期資料夾: {}",
            report.succeeded, report.attempted, report.date_folder
        );
        if let Ok(json) = serde_json::to_string(report) {
            debug!("複製報告: {json}");
        }
    }

    fn print_error(&self, error: &DistributeError) {
        let message = match error.kind() {
            ErrorKind::SelectionMissing => t!("distributor.error_selection_missing"),
            ErrorKind::UnevenDistribution => t!("distributor.error_uneven"),
            ErrorKind::IoFailure => t!("distributor.error_io"),
        };

        warn!("分配失敗: {error}");
        println!();
        println!("{} {}", style(t!("common.error")).red().bold(), style(message).red());
        println!("  {}", style(error).dim());

        let copied = error.copied_before_failure();
        if copied > 0 {
            println!(
                "  {}",
                style(t!("distributor.error_partial", count = copied)).yellow()
            );
        }
    }
}

/// 去除前後空白與拖放路徑時終端機加上的引號
fn clean_path_input(input: &str) -> &str {
    input.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn print_limited<T>(items: &[T], render: impl Fn(&T) -> String) {
    let display_count = items.len().min(DISPLAY_LIMIT);
    for item in items.iter().take(display_count) {
        println!("{}", render(item));
    }
    if items.len() > display_count {
        println!(
            "  {} {}",
            style("⋯").dim(),
            t!("common.more", count = items.len() - display_count)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  /home/pictures  "), "/home/pictures");
        assert_eq!(clean_path_input("'/home/my pictures'"), "/home/my pictures");
        assert_eq!(clean_path_input("\"C:\\Photos\"\n"), "C:\\Photos");
        assert_eq!(clean_path_input("   "), "");
    }
}
