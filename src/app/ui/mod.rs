pub mod animation;
pub mod locate;
pub mod music_list;
pub mod renderer;
pub mod utils;
pub mod viewport;
pub mod widgets;

pub use music_list::{ListHints, MusicList, ScrollInput};
pub use renderer::render;
