use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::components::{Component, DeckData, DeckHitMap, DeckRegion, RenderContext};
use crate::mouse::geometry::centered;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 7;
const CONFIRM_LABEL: &str = "[ Quit ]";
const CANCEL_LABEL: &str = "[ Cancel ]";
const BUTTON_GAP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialogLayout {
    pub dialog: Rect,
    pub confirm: Rect,
    pub cancel: Rect,
}

/// Quit confirmation. While visible it covers the whole screen with a
/// backdrop region so nothing underneath can be clicked.
pub struct ConfirmDialog {
    visible: bool,
    message: String,
}

impl ConfirmDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            visible: false,
            message: message.into(),
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn layout(&self, area: Rect) -> DialogLayout {
        let dialog = centered(area, DIALOG_WIDTH.min(area.width), DIALOG_HEIGHT.min(area.height));
        let inner = Block::default().borders(Borders::ALL).inner(dialog);

        let confirm_width = CONFIRM_LABEL.len() as u16;
        let cancel_width = CANCEL_LABEL.len() as u16;
        let row_width = confirm_width + BUTTON_GAP + cancel_width;
        let start_x = inner.x + inner.width.saturating_sub(row_width) / 2;
        let button_y = inner.y + inner.height.saturating_sub(1);

        DialogLayout {
            dialog,
            confirm: Rect::new(start_x, button_y, confirm_width, 1).intersection(inner),
            cancel: Rect::new(start_x + confirm_width + BUTTON_GAP, button_y, cancel_width, 1)
                .intersection(inner),
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if !self.visible {
            return None;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Quit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                Some(Action::DismissDialog)
            }
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::ShowQuitDialog => self.show(),
            Action::DismissDialog => self.dismiss(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap) {
        if !self.visible {
            return;
        }
        let theme = ctx.theme;
        let layout = self.layout(area);

        hits.add_rect(DeckRegion::ModalBackdrop, area.x, area.y, area.width, area.height, DeckData::None);
        for (id, rect) in [
            (DeckRegion::ModalConfirm, layout.confirm),
            (DeckRegion::ModalCancel, layout.cancel),
        ] {
            hits.add_rect(id, rect.x, rect.y, rect.width, rect.height, DeckData::None);
        }

        frame.render_widget(Clear, layout.dialog);

        let border = Style::default().fg(theme.modal.border.to_color());
        let block = Block::default()
            .title(" Quit ")
            .title_style(border.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(layout.dialog);
        frame.render_widget(block, layout.dialog);

        let message = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.colors.foreground.to_color()));
        frame.render_widget(message, Rect::new(inner.x, inner.y + 1, inner.width, 1).intersection(inner));

        let confirm_hovered = ctx.is_hovered(DeckRegion::ModalConfirm, DeckData::None);
        let cancel_hovered = ctx.is_hovered(DeckRegion::ModalCancel, DeckData::None);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CONFIRM_LABEL, theme.button_style(confirm_hovered)))),
            layout.confirm,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CANCEL_LABEL, theme.button_style(cancel_hovered)))),
            layout.cancel,
        );
    }
}
