mod handlers;
mod main_menu;

pub use handlers::run_picture_distributor;
pub use main_menu::show_main_menu;
