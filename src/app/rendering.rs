// Rendering: draw() lays out the screen and registers every region for the frame

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use super::App;
use crate::components::{Component, RenderContext};
use crate::error::{DeckError, Result};
use crate::input::focus::FocusArea;

impl<B: Backend> App<B> {
    fn split_screen(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], chunks[1])
    }

    fn inner_height(area: Rect) -> u16 {
        Block::default().borders(Borders::ALL).inner(area).height
    }

    /// Draw one frame.
    ///
    /// The hit map is rebuilt from scratch: cleared first, then filled in
    /// paint order so that whatever is drawn on top is also hit first. The
    /// quit dialog goes last.
    pub(super) fn draw(&mut self) -> Result<()> {
        let size = self
            .terminal
            .size()
            .map_err(|e| DeckError::Terminal(e.to_string()))?;
        let screen = Rect::new(0, 0, size.width, size.height);
        let (main_area, status_area) = Self::split_screen(screen);

        self.layout.set_total_width(main_area.width);
        let panes = self.layout.split(main_area);
        self.file_list.set_viewport(Self::inner_height(panes.files));
        self.preview.set_viewport(Self::inner_height(panes.preview));
        self.panes = panes;

        self.mouse.clear();

        let base = RenderContext::new(self.config_manager.theme())
            .with_hover(self.hover)
            .with_dragging(self.mouse.drag_region().copied());
        let files_ctx = base.focused(self.focus.is_focused(FocusArea::FileList));
        let preview_ctx = base.focused(self.focus.is_focused(FocusArea::Preview));

        let hits = self.mouse.hitmap_mut();
        let file_list = &self.file_list;
        let layout = &self.layout;
        let preview = &self.preview;
        let status = &self.status;
        let dialog = &self.dialog;

        self.terminal
            .draw(|frame| {
                let screen = frame.area();
                file_list.render(frame, panes.files, &files_ctx, hits);
                layout.render(frame, panes.divider, &base, hits);
                preview.render(frame, panes.preview, &preview_ctx, hits);
                status.render(frame, status_area, &base, hits);
                dialog.render(frame, screen, &base, hits);
            })
            .map_err(|e| DeckError::Terminal(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture;
    use crate::action::Action;
    use crate::components::{DeckData, DeckRegion};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_regions_follow_paint_order() {
        let fx = fixture();
        let ids: Vec<DeckRegion> = fx.app.mouse.hitmap().regions().iter().map(|r| r.id).collect();

        // Pane, five rows, divider, preview, status button.
        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], DeckRegion::FilePane);
        assert_eq!(ids[6], DeckRegion::Divider);
        assert_eq!(ids[7], DeckRegion::Preview);
        assert_eq!(ids[8], DeckRegion::StatusButton);
    }

    #[test]
    fn test_redraw_replaces_regions() {
        let mut fx = fixture();
        fx.app.draw().unwrap();
        assert_eq!(fx.app.mouse.hitmap().len(), 9);

        fx.app.dispatch(Action::SetSidebarWidth(40)).unwrap();
        fx.app.draw().unwrap();
        let divider = fx
            .app
            .mouse
            .hitmap()
            .regions()
            .iter()
            .find(|r| r.id == DeckRegion::Divider)
            .unwrap();
        assert_eq!(divider.rect.x, 40);
    }

    #[test]
    fn test_dialog_registers_last() {
        let mut fx = fixture();
        fx.app.dispatch(Action::ShowQuitDialog).unwrap();
        fx.app.draw().unwrap();

        let regions = fx.app.mouse.hitmap().regions();
        let tail: Vec<DeckRegion> = regions[regions.len() - 3..].iter().map(|r| r.id).collect();
        assert_eq!(
            tail,
            vec![DeckRegion::ModalBackdrop, DeckRegion::ModalConfirm, DeckRegion::ModalCancel]
        );

        // Rows underneath are still registered but unreachable.
        assert!(regions.iter().any(|r| r.data == DeckData::Row(1)));
        assert_eq!(fx.app.mouse.hitmap().test(5, 2).unwrap().id, DeckRegion::ModalBackdrop);
    }
}
