// Key handling and action dispatch

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;

use super::App;
use crate::action::Action;
use crate::components::preview::PreviewContent;
use crate::components::Component;
use crate::epoch::Stamped;
use crate::error::Result;
use crate::input::focus::FocusArea;

impl<B: Backend> App<B> {
    pub(super) fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = self.handle_key(&key) {
                    self.dispatch(action)?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse)?,
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        // The dialog is modal for the keyboard as well.
        if self.dialog.is_visible() {
            return self.dialog.handle_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::ShowQuitDialog),
            KeyCode::Tab => return Some(Action::FocusNext),
            KeyCode::BackTab => return Some(Action::FocusPrev),
            _ => {}
        }

        if let Some(action) = self.layout.handle_key(key) {
            return Some(action);
        }

        match self.focus.current() {
            FocusArea::FileList => self.file_list.handle_key(key),
            FocusArea::Preview => self.preview.handle_key(key),
        }
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                tracing::info!("quit requested");
                self.should_quit = true;
            }
            Action::Tick => {}
            Action::ShowQuitDialog | Action::DismissDialog => self.dialog.update(&action),
            Action::FocusNext => {
                self.focus.next();
                self.status.set_focus(self.focus.current());
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.status.set_focus(self.focus.current());
            }
            Action::FocusArea(area) => {
                self.focus.focus(area);
                self.status.update(&action);
            }
            Action::SelectNext | Action::SelectPrev | Action::Select(_) | Action::ScrollFiles(_) => {
                self.file_list.update(&action);
            }
            Action::OpenSelected => {
                let index = self.file_list.selected_index();
                self.dispatch(Action::Open(index))?;
            }
            Action::Open(index) => self.open_entry(index),
            Action::ScrollPreview(_) => self.preview.update(&action),
            Action::SetSidebarWidth(_) | Action::GrowSidebar | Action::ShrinkSidebar => {
                self.layout.update(&action);
            }
            Action::ConfigChanged(path) => self.reload_config(&path),
        }
        Ok(())
    }

    /// Descend into a directory or start loading a file preview.
    fn open_entry(&mut self, index: usize) {
        let Some(entry) = self.file_list.entry(index).cloned() else {
            return;
        };

        if !entry.is_dir {
            self.preview.begin_loading(entry.path.clone());
            self.loader.request(self.epoch, entry.path);
            return;
        }

        match self.file_list.set_root(entry.path.clone()) {
            Ok(()) => {
                let epoch = self.epoch.bump();
                // Regions from the old listing are meaningless now.
                self.mouse.reset();
                self.hover = None;
                self.preview.clear();
                tracing::info!(root = %entry.path.display(), epoch = epoch.value(), "switched root");
                self.status.set_last_action(format!("opened {}", entry.name));
            }
            Err(e) => {
                tracing::warn!("Cannot open {}: {}", entry.path.display(), e);
                self.status.set_last_action(format!("cannot open {}: {}", entry.name, e));
            }
        }
    }

    /// Apply a finished preview if it belongs to the current epoch.
    pub(super) fn accept_preview(&mut self, stamped: Stamped<PreviewContent>) -> bool {
        if !self.epoch.accepts(&stamped) {
            tracing::debug!(
                path = %stamped.value.path.display(),
                stale = stamped.epoch.value(),
                current = self.epoch.value(),
                "dropping stale preview"
            );
            return false;
        }
        self.preview.set_content(stamped.into_inner())
    }
}
