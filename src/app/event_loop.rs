// Event loop: background sources first, then input, then at most one draw

use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::backend::Backend;

use super::App;
use crate::action::Action;
use crate::config::ConfigEvent;
use crate::error::{DeckError, Result};

const INPUT_POLL_MS: u64 = 16;

impl<B: Backend> App<B> {
    /// Apply finished previews. Returns true if anything changed on screen.
    pub(super) fn poll_previews(&mut self) -> bool {
        let mut changed = false;
        for stamped in self.loader.drain() {
            changed |= self.accept_preview(stamped);
        }
        changed
    }

    pub(super) fn poll_config(&mut self) -> Result<()> {
        let events = match self.config_watcher.as_mut() {
            Some(watcher) => watcher.poll_events(),
            None => Vec::new(),
        };

        for event in events {
            match event {
                ConfigEvent::Changed(path) => {
                    self.dispatch(Action::ConfigChanged(path))?;
                    self.mark_dirty();
                }
                ConfigEvent::Error(msg) => {
                    tracing::warn!("Config watcher error: {}", msg);
                }
            }
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        let tick_interval = Duration::from_millis(self.config_manager.app_config().general.tick_interval_ms);

        loop {
            // ---- 1. Background sources ----

            if self.poll_previews() {
                self.mark_dirty();
            }

            if self.last_tick.elapsed() >= tick_interval {
                self.dispatch(Action::Tick)?;
                self.last_tick = Instant::now();
            }

            self.poll_config()?;

            if self.should_quit {
                break;
            }

            // ---- 2. User input ----

            if event::poll(Duration::from_millis(INPUT_POLL_MS))
                .map_err(|e| DeckError::Terminal(e.to_string()))?
            {
                let event = event::read().map_err(|e| DeckError::Terminal(e.to_string()))?;
                self.mark_dirty();
                self.handle_event(event)?;
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }
}
