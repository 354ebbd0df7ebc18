pub mod list_status;
pub mod locate_button;
pub mod music_item;
pub mod options_popup;
pub mod title_tag;

pub use self::list_status::{list_empty, list_footer};
pub use self::locate_button::render_locate_button;
pub use self::music_item::MusicItem;
pub use self::options_popup::render_options_popup;
