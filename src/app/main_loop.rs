use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;

use super::App;
use crate::app::event_handlers::EventHandlers;

/// How long to wait for input between polls
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Redraw cadence while something on screen animates
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(self, terminal: DefaultTerminal) -> color_eyre::Result<()>
    where
        Self: Sized;
}

/// Resolves with the signal name once SIGINT or SIGTERM arrives.
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(mut sigint), Ok(mut sigterm)) => tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        },
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Failed to set up signal handlers: {}", e);
            std::future::pending().await
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "Ctrl-C",
        Err(e) => {
            log::warn!("Failed to set up Ctrl-C handler: {}", e);
            std::future::pending().await
        }
    }
}

impl AppMainLoop for App {
    /// Run the application's main loop.
    async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.catalog.start();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let mut last_frame: Option<Instant> = None;

        log::info!("Entering event-driven main loop");

        while self.running {
            let now = Instant::now();
            let changed = self.update(now);
            let frame_due = self.list.is_animating()
                && last_frame.is_none_or(|last| now.duration_since(last) >= FRAME_INTERVAL);

            if changed || frame_due || self.needs_redraw {
                terminal.draw(|frame| crate::app::ui::render(frame, &mut self, now))?;
                self.needs_redraw = false;
                last_frame = Some(now);
            }

            // Wake for the overlay timer or a page delivery even without input
            let deadline = self
                .next_deadline()
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = tokio::time::sleep(INPUT_POLL_INTERVAL) => {
                    while crossterm::event::poll(Duration::ZERO)? {
                        self.handle_crossterm_events(Instant::now())?;
                    }
                }

                _ = tokio::time::sleep_until(deadline) => {
                    log::trace!("Deadline reached");
                }

                signal = &mut shutdown => {
                    log::info!("Received {}, shutting down gracefully", signal);
                    self.quit();
                }
            }
        }

        log::info!("Exiting main loop");
        self.list.dispose();

        Ok(())
    }
}
