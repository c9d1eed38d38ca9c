mod date_folder;
mod path_validator;

pub use date_folder::{DATE_FOLDER_FORMAT, date_folder_name, today_folder_name};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
