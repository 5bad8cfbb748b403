use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::components::{Component, DeckData, DeckHitMap, DeckRegion, RenderContext};
use crate::config::LayoutConfig;
use crate::mouse::geometry::apply_delta;

const RESIZE_STEP: u16 = 2;
const DIVIDER_WIDTH: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Grow,
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaneAreas {
    pub files: Rect,
    pub divider: Rect,
    pub preview: Rect,
}

/// Two-column split with a draggable divider between the file pane and the
/// preview. Width is tracked in cells, bounded by a minimum and by a share of
/// the screen width.
#[derive(Debug, Clone)]
pub struct PaneLayout {
    sidebar_width: u16,
    min_width: u16,
    max_percent: u16,
    total_width: u16,
}

impl PaneLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            sidebar_width: config.sidebar_width,
            min_width: config.min_sidebar_width,
            max_percent: config.max_sidebar_percent.min(100),
            total_width: 0,
        }
    }

    /// Pick up new bounds from a reloaded config, keeping the current width.
    pub fn apply_config(&mut self, config: &LayoutConfig) {
        self.min_width = config.min_sidebar_width;
        self.max_percent = config.max_sidebar_percent.min(100);
        self.sidebar_width = self.clamp(self.sidebar_width);
    }

    pub fn sidebar_width(&self) -> u16 {
        self.sidebar_width
    }

    /// Screen width from the last layout pass. Zero means unknown and
    /// disables the percentage bound.
    pub fn set_total_width(&mut self, width: u16) {
        self.total_width = width;
        self.sidebar_width = self.clamp(self.sidebar_width);
    }

    pub fn max_width(&self) -> u16 {
        if self.total_width == 0 {
            return u16::MAX;
        }
        let share = (self.total_width as u32 * self.max_percent as u32 / 100) as u16;
        share.max(self.min_width)
    }

    fn clamp(&self, width: u16) -> u16 {
        width.clamp(self.min_width, self.max_width())
    }

    pub fn set_sidebar_width(&mut self, width: u16) {
        self.sidebar_width = self.clamp(width);
    }

    pub fn resize(&mut self, direction: ResizeDirection) {
        let width = match direction {
            ResizeDirection::Grow => self.sidebar_width.saturating_add(RESIZE_STEP),
            ResizeDirection::Shrink => self.sidebar_width.saturating_sub(RESIZE_STEP),
        };
        self.set_sidebar_width(width);
    }

    /// Width for a divider dragged `dx` cells from where it was grabbed.
    pub fn dragged_width(&self, start_width: i32, dx: i32) -> u16 {
        apply_delta(start_width, dx, self.min_width, self.max_width())
    }

    pub fn split(&self, area: Rect) -> PaneAreas {
        let files_width = self.sidebar_width.min(area.width.saturating_sub(DIVIDER_WIDTH));
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(files_width),
                Constraint::Length(DIVIDER_WIDTH),
                Constraint::Min(0),
            ])
            .split(area);

        PaneAreas {
            files: chunks[0],
            divider: chunks[1],
            preview: chunks[2],
        }
    }
}

impl Component for PaneLayout {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('[') => Some(Action::ShrinkSidebar),
            KeyCode::Char(']') => Some(Action::GrowSidebar),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::GrowSidebar => self.resize(ResizeDirection::Grow),
            Action::ShrinkSidebar => self.resize(ResizeDirection::Shrink),
            Action::SetSidebarWidth(width) => self.set_sidebar_width(*width),
            _ => {}
        }
    }

    /// Draws the divider column only; `area` is the divider rect from `split`.
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap) {
        hits.add_rect(DeckRegion::Divider, area.x, area.y, area.width, area.height, DeckData::None);

        let hovered = ctx.is_hovered(DeckRegion::Divider, DeckData::None);
        let dragging = ctx.is_dragging(DeckRegion::Divider);
        let style = ctx.theme.divider_style(hovered, dragging);
        let glyph = if dragging || hovered { "┃" } else { "│" };
        let lines: Vec<Line> = (0..area.height).map(|_| Line::from(glyph)).collect();
        frame.render_widget(Paragraph::new(lines).style(style), area);
    }
}
