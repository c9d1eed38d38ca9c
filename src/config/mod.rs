pub mod load;
pub mod types;

pub use types::{Config, LANGUAGE_ENV_VAR, Language, PictureExtensionTable, Settings};
