use crate::component::PictureDistributor;
use crate::config::Config;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;

pub fn run_picture_distributor(term: &Term, config: &Config) -> Result<()> {
    let distributor = PictureDistributor::new(config.clone());

    if let Err(e) = distributor.run(term) {
        eprintln!("{} {}", style(t!("common.error")).red().bold(), e);
        crate::pause(term)?;
    }

    Ok(())
}
