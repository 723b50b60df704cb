mod board_page;
mod download_page;
mod location_page;
mod not_found;

pub use board_page::BoardPage;
pub use download_page::DownloadPage;
pub use location_page::LocationPage;
pub use not_found::NotFound;
