use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::components::{Component, DeckData, DeckHitMap, DeckRegion, RenderContext};
use crate::input::focus::FocusArea;

const QUIT_LABEL: &str = "[q] quit";

#[derive(Debug, Default)]
pub struct StatusBar {
    focus: FocusArea,
    last_action: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focus(&mut self, focus: FocusArea) {
        self.focus = focus;
    }

    pub fn set_last_action(&mut self, text: impl Into<String>) {
        self.last_action = text.into();
    }

    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    pub fn button_rect(area: Rect) -> Rect {
        let width = (QUIT_LABEL.len() as u16).min(area.width);
        Rect::new(area.right().saturating_sub(width), area.y, width, area.height.min(1))
    }

    fn hover_text(hover: Option<(DeckRegion, DeckData)>) -> String {
        match hover {
            None => "-".to_string(),
            Some((id, DeckData::Row(index))) => format!("{} #{}", id.label(), index),
            Some((id, DeckData::None)) => id.label().to_string(),
        }
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: &KeyEvent) -> Option<Action> {
        None
    }

    fn update(&mut self, action: &Action) {
        if let Action::FocusArea(area) = action {
            self.focus = *area;
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap) {
        let theme = ctx.theme;
        let button = Self::button_rect(area);
        hits.add_rect(DeckRegion::StatusButton, button.x, button.y, button.width, button.height, DeckData::None);

        let accent = Style::default().fg(theme.colors.accent.to_color());
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.focus.label()), accent),
            Span::styled("│ hover: ", theme.muted_style()),
            Span::raw(Self::hover_text(ctx.hover)),
            Span::styled(" │ ", theme.muted_style()),
            Span::raw(self.last_action.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width.saturating_sub(button.width), area.height));

        let hovered = ctx.is_hovered(DeckRegion::StatusButton, DeckData::None);
        frame.render_widget(Paragraph::new(Span::styled(QUIT_LABEL, theme.button_style(hovered))), button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_button_hugs_right_edge() {
        let rect = StatusBar::button_rect(Rect::new(0, 23, 80, 1));
        assert_eq!(rect, Rect::new(72, 23, 8, 1));
    }

    #[test]
    fn test_hover_text() {
        assert_eq!(StatusBar::hover_text(None), "-");
        assert_eq!(
            StatusBar::hover_text(Some((DeckRegion::FileRow, DeckData::Row(4)))),
            "file row #4"
        );
        assert_eq!(StatusBar::hover_text(Some((DeckRegion::Divider, DeckData::None))), "divider");
    }

    #[test]
    fn test_render_registers_quit_button() {
        let mut status = StatusBar::new();
        status.set_last_action("click file row #2");
        assert_eq!(status.last_action(), "click file row #2");

        let theme = Theme::default();
        let ctx = RenderContext::new(&theme);
        let mut hits = DeckHitMap::new();
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                status.render(frame, area, &ctx, &mut hits)
            })
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits.test(39, 0).unwrap().id, DeckRegion::StatusButton);
        assert!(hits.test(5, 0).is_none());
    }
}
