pub mod binds;
pub mod catalog;
pub mod colors;
pub mod format;
pub mod list;
pub mod logging;

pub use binds::BindsConfig;
pub use catalog::CatalogConfig;
pub use colors::{ColorsConfig, Palette};
pub use format::Config;
pub use list::ListConfig;
pub use logging::LoggingConfig;
