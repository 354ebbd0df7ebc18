use crossterm::event::{
    Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

use super::App;
use crate::app::binds::Action;
use crate::app::logging::log_user_interaction;
use crate::app::services::PlaybackEngine;
use crate::app::ui::ScrollInput;

/// Trait for event handling
pub trait EventHandlers {
    fn handle_crossterm_events(&mut self, now: Instant) -> color_eyre::Result<()>;
    fn on_key_event(&mut self, key: KeyEvent, now: Instant);
    fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant);
    fn on_action(&mut self, action: Action, now: Instant);
    fn quit(&mut self);
}

impl EventHandlers for App {
    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, now: Instant) -> color_eyre::Result<()> {
        match crossterm::event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, now),
            Event::Mouse(mouse) => self.on_mouse_event(mouse, now),
            Event::Resize(_, _) => self.needs_redraw = true,
            _ => {}
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        // Any key dismisses the config warnings popup
        if self.show_config_warnings_popup {
            self.show_config_warnings_popup = false;
            self.needs_redraw = true;
            return;
        }

        if let Some(action) = self.key_binds.handle_key(key, self.popup.is_open()) {
            self.on_action(action, now);
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        if self.show_config_warnings_popup || self.popup.is_open() {
            if let MouseEventKind::Down(_) = mouse.kind {
                self.show_config_warnings_popup = false;
                self.popup.close();
                self.needs_redraw = true;
            }
            return;
        }

        let current = self.player.current_track().cloned();
        let step = self.config.list.wheel_step.max(1) as isize;
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.list
                    .scroll(ScrollInput::Wheel(step), current.as_ref(), now)
            }
            MouseEventKind::ScrollUp => {
                self.list
                    .scroll(ScrollInput::Wheel(-step), current.as_ref(), now)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.list.hits_locate_button(mouse.column, mouse.row) {
                    self.on_action(Action::Locate, now);
                    return;
                }
                let Some(index) = self.list.row_at(mouse.column, mouse.row) else {
                    return;
                };
                // A click on the selected row plays it
                if self.list.viewport().selected() == Some(index) {
                    self.on_action(Action::PlaySelected, now);
                } else {
                    self.list.select(index);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(index) = self.list.row_at(mouse.column, mouse.row) {
                    self.list.select(index);
                    log_user_interaction("long press", Some(&index.to_string()));
                    self.with_services(|list, services| list.long_press_selected(services));
                }
            }
            _ => return,
        }
        self.needs_redraw = true;
    }

    fn on_action(&mut self, action: Action, now: Instant) {
        log_user_interaction(&format!("{:?}", action), None);
        let current = self.player.current_track().cloned();

        match action {
            Action::Quit => self.quit(),
            Action::Close => self.popup.close(),
            Action::ScrollUp => self
                .list
                .scroll(ScrollInput::Select(-1), current.as_ref(), now),
            Action::ScrollDown => self
                .list
                .scroll(ScrollInput::Select(1), current.as_ref(), now),
            Action::PageUp => self
                .list
                .scroll(ScrollInput::Page(-1), current.as_ref(), now),
            Action::PageDown => self
                .list
                .scroll(ScrollInput::Page(1), current.as_ref(), now),
            Action::GoToTop => self.list.scroll(ScrollInput::Top, current.as_ref(), now),
            Action::GoToBottom => self.list.scroll(ScrollInput::Bottom, current.as_ref(), now),
            Action::PlaySelected => {
                self.with_services(|list, services| list.press_selected(services))
            }
            Action::TrackOptions => {
                self.with_services(|list, services| list.open_options_selected(services))
            }
            Action::Locate => {
                if self.list.activate_locate(current.as_ref(), now).is_none() {
                    log::trace!("Locate ignored while the button is hidden");
                }
            }
            Action::Retry => self.list.retry(&mut self.catalog),
            Action::NextTrack => self.player.next(),
            Action::PreviousTrack => self.player.previous(),
        }
        self.needs_redraw = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
