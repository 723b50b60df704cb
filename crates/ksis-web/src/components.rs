mod file_card;
mod file_card_title;
mod file_thumbnail;
mod map_widget;
mod resource_modal;
mod site_header;
mod tab_button;
mod tab_navigation;

pub use file_card::FileCard;
pub use file_card_title::FileCardTitle;
pub use file_thumbnail::FileThumbnail;
pub use map_widget::MapWidget;
pub use resource_modal::ResourceModal;
pub use site_header::SiteHeader;
pub use tab_button::TabButton;
pub use tab_navigation::TabNavigation;
