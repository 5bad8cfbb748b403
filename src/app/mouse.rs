// Mouse routing: the handler classifies, this decides what each region does.

use std::time::Instant;

use crossterm::event::MouseEvent;
use ratatui::backend::Backend;

use super::App;
use crate::action::Action;
use crate::components::{DeckData, DeckRegion};
use crate::error::Result;
use crate::input::focus::FocusArea;
use crate::mouse::{geometry, MouseAction, MouseActionKind, RawMouseEvent, Region};

type DeckAction = MouseAction<DeckRegion, DeckData>;

impl<B: Backend> App<B> {
    pub(super) fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        self.handle_mouse_at(mouse, Instant::now())
    }

    pub(super) fn handle_mouse_at(&mut self, event: impl Into<RawMouseEvent>, now: Instant) -> Result<()> {
        let action = self.mouse.handle_at(event, now);
        if let Some(text) = describe(&action) {
            self.status.set_last_action(text);
        }
        self.route_mouse(action)
    }

    fn route_mouse(&mut self, action: DeckAction) -> Result<()> {
        match action.kind {
            MouseActionKind::Hover => {
                self.hover = action.region.map(|region| (region.id, region.data));
            }
            MouseActionKind::Click => {
                if let Some(region) = action.region {
                    self.on_click(region, action.x, action.y)?;
                }
            }
            MouseActionKind::DoubleClick => match action.region {
                Some(Region {
                    id: DeckRegion::FileRow,
                    data: DeckData::Row(index),
                    ..
                }) => {
                    self.dispatch(Action::Select(index))?;
                    self.dispatch(Action::Open(index))?;
                }
                // Anything else behaves like a second single click.
                Some(region) => self.on_click(region, action.x, action.y)?,
                None => {}
            },
            MouseActionKind::RightClick => {
                if let Some(Region {
                    id: DeckRegion::FileRow,
                    data: DeckData::Row(index),
                    ..
                }) = action.region
                {
                    if !self.dialog.is_visible() {
                        self.dispatch(Action::Select(index))?;
                    }
                }
            }
            MouseActionKind::ScrollUp | MouseActionKind::ScrollDown => {
                self.on_scroll(action.x, action.y, action.delta)?;
            }
            MouseActionKind::Drag => {
                if action.drag_region == Some(DeckRegion::Divider) {
                    if let Some(start) = self.mouse.drag_start_value() {
                        let width = self.layout.dragged_width(start, action.drag_dx);
                        self.dispatch(Action::SetSidebarWidth(width))?;
                    }
                }
            }
            MouseActionKind::DragEnd => {
                if action.drag_region == Some(DeckRegion::Divider) {
                    tracing::info!(width = self.layout.sidebar_width(), "sidebar resized");
                }
            }
            MouseActionKind::ScrollLeft | MouseActionKind::ScrollRight | MouseActionKind::None => {}
        }
        Ok(())
    }

    fn on_click(&mut self, region: Region<DeckRegion, DeckData>, x: u16, y: u16) -> Result<()> {
        match (region.id, region.data) {
            (DeckRegion::FilePane, _) => self.dispatch(Action::FocusArea(FocusArea::FileList))?,
            (DeckRegion::FileRow, DeckData::Row(index)) => {
                self.dispatch(Action::FocusArea(FocusArea::FileList))?;
                self.dispatch(Action::Select(index))?;
            }
            (DeckRegion::FileRow, DeckData::None) => {}
            (DeckRegion::Divider, _) => {
                self.mouse
                    .start_drag(x, y, DeckRegion::Divider, i32::from(self.layout.sidebar_width()));
            }
            (DeckRegion::Preview, _) => self.dispatch(Action::FocusArea(FocusArea::Preview))?,
            (DeckRegion::StatusButton, _) => self.dispatch(Action::ShowQuitDialog)?,
            (DeckRegion::ModalConfirm, _) => self.dispatch(Action::Quit)?,
            (DeckRegion::ModalCancel, _) => self.dispatch(Action::DismissDialog)?,
            (DeckRegion::ModalBackdrop, _) => {}
        }
        Ok(())
    }

    /// Wheel events carry no region; the pane under the pointer scrolls.
    fn on_scroll(&mut self, x: u16, y: u16, delta: i32) -> Result<()> {
        if self.dialog.is_visible() {
            return Ok(());
        }
        if geometry::contains(self.panes.files, x, y) {
            self.dispatch(Action::ScrollFiles(delta))?;
        } else if geometry::contains(self.panes.preview, x, y) {
            self.dispatch(Action::ScrollPreview(delta))?;
        }
        Ok(())
    }
}

/// Status-bar text for an action. Motion and no-ops are not worth reporting.
fn describe(action: &DeckAction) -> Option<String> {
    let target = match &action.region {
        Some(Region {
            id,
            data: DeckData::Row(index),
            ..
        }) => format!("{} #{}", id.label(), index),
        Some(region) => region.id.label().to_string(),
        None => "nothing".to_string(),
    };

    let text = match action.kind {
        MouseActionKind::Click => format!("click {}", target),
        MouseActionKind::DoubleClick => format!("double-click {}", target),
        MouseActionKind::RightClick => format!("right-click {}", target),
        MouseActionKind::ScrollUp
        | MouseActionKind::ScrollDown
        | MouseActionKind::ScrollLeft
        | MouseActionKind::ScrollRight => format!("{:?} {:+}", action.kind, action.delta).to_lowercase(),
        MouseActionKind::Drag => format!("drag {:+},{:+}", action.drag_dx, action.drag_dy),
        MouseActionKind::DragEnd => format!("drag end {:+},{:+}", action.drag_dx, action.drag_dy),
        MouseActionKind::Hover | MouseActionKind::None => return None,
    };
    Some(text)
}
