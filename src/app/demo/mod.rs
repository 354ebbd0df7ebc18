//! In-memory collaborators that drive the list in the binary.

pub mod catalog;
pub mod local;
pub mod player;
pub mod popup;

pub use catalog::PagedCatalog;
pub use local::LocalLibrary;
pub use player::QueuePlayer;
pub use popup::OptionsPopup;
