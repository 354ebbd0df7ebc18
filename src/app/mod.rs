use crate::app::binds::KeyBinds;
use crate::app::config::{Config, Palette};
use crate::app::demo::{LocalLibrary, OptionsPopup, PagedCatalog, QueuePlayer};
use crate::app::services::Services;
use crate::app::ui::{ListHints, MusicList};
use std::time::Instant;

pub use crate::app::constructor::AppConstructor;
pub use crate::app::main_loop::AppMainLoop;

// Module declarations
pub mod binds;
pub mod cli;
pub mod config;
pub mod constructor;
pub mod demo;
pub mod event_handlers;
pub mod logging;
pub mod main_loop;
pub mod services;
pub mod terminal;
pub mod ui;

/// Application state
pub struct App {
    pub running: bool,
    pub config: Config,
    pub palette: Palette,
    pub key_binds: KeyBinds,
    pub hints: ListHints,
    pub list: MusicList,
    pub player: QueuePlayer,
    pub library: LocalLibrary,
    pub popup: OptionsPopup,
    pub catalog: PagedCatalog,
    pub config_warnings: Vec<String>,
    pub show_config_warnings_popup: bool,
    /// Set by input handlers; cleared after the next draw
    pub needs_redraw: bool,
}

impl App {
    /// Hand the list its collaborators for one interaction.
    pub fn with_services<R>(
        &mut self,
        f: impl FnOnce(&mut MusicList, &mut Services<'_>) -> R,
    ) -> R {
        let mut services = Services {
            engine: &mut self.player,
            local: &self.library,
            panels: &mut self.popup,
        };
        f(&mut self.list, &mut services)
    }

    /// Advance data delivery, timers and animations. Returns true when the
    /// screen needs a redraw.
    pub fn update(&mut self, now: Instant) -> bool {
        let delivered = self.catalog.poll(now);
        if delivered {
            self.list.set_tracks(self.catalog.tracks().to_vec());
        }
        let ticked = self.list.tick(now, &mut self.catalog);
        delivered || ticked
    }

    /// Earliest instant at which [`App::update`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.list.next_deadline(), self.catalog.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }
}
