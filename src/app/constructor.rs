use super::App;
use crate::app::binds::{Action, KeyBinds};
use crate::app::cli::Args;
use crate::app::config::Config;
use crate::app::demo::{LocalLibrary, OptionsPopup, PagedCatalog, QueuePlayer};
use crate::app::ui::music_list::{play_on_long_press, play_pressed_only};
use crate::app::ui::{ListHints, MusicList};
use std::path::PathBuf;

/// Trait for App construction
pub trait AppConstructor {
    fn new_with_config(config: Config, args: Args) -> color_eyre::Result<Self>
    where
        Self: Sized;
}

impl AppConstructor for App {
    /// Construct a new instance of [`App`] from a loaded config.
    fn new_with_config(mut config: Config, args: Args) -> color_eyre::Result<Self> {
        if let Some(show_index) = args.show_index {
            config.list.show_index = show_index;
        }

        let (key_map, mut config_warnings) = config.binds.build_key_map();
        let key_binds = KeyBinds::new(key_map);
        let hints = ListHints {
            retry: config.binds.hint(Action::Retry),
            locate: config.binds.hint(Action::Locate),
        };

        let catalog_path = args
            .catalog
            .or_else(|| config.catalog.path.as_ref().map(PathBuf::from));
        let catalog = match &catalog_path {
            Some(path) => {
                let catalog = PagedCatalog::from_file(path, &config.catalog)?;
                crate::app::logging::log_catalog_source(
                    &path.display().to_string(),
                    catalog.total(),
                    catalog.page_size(),
                );
                catalog
            }
            None => {
                let catalog = PagedCatalog::sample(&config.catalog);
                crate::app::logging::log_catalog_source(
                    "built-in sample",
                    catalog.total(),
                    catalog.page_size(),
                );
                catalog
            }
        };

        let mut library = LocalLibrary::new();
        for key in library.extend_row_keys(catalog.local_keys()) {
            config_warnings.push(format!("Ignoring malformed local track key: '{}'", key));
        }
        for warning in &config_warnings {
            log::warn!("{}", warning);
        }

        let mut list = MusicList::new(&config.list)
            .with_header(catalog.sheet().map(|sheet| sheet.title.clone()))
            .with_sheet(catalog.sheet().cloned());
        if !config.list.replace_queue_on_press {
            list = list.with_item_press(play_pressed_only());
        }
        if config.list.long_press_plays {
            list = list.with_item_long_press(play_on_long_press());
        }

        Ok(Self {
            running: false,
            palette: config.colors.palette(),
            config,
            key_binds,
            hints,
            list,
            player: QueuePlayer::new(),
            library,
            popup: OptionsPopup::default(),
            catalog,
            show_config_warnings_popup: !config_warnings.is_empty(),
            config_warnings,
            needs_redraw: true,
        })
    }
}
