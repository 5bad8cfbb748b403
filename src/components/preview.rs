use std::io::Read;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::components::{Component, DeckData, DeckHitMap, DeckRegion, RenderContext};

const MAX_PREVIEW_BYTES: u64 = 64 * 1024;
const MAX_PREVIEW_LINES: usize = 2000;

/// Result of reading a file for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewContent {
    pub path: PathBuf,
    pub body: Result<Vec<String>, String>,
}

/// Read the head of a file as lossy UTF-8 lines. Runs off the UI thread.
pub fn load_preview(path: &Path) -> PreviewContent {
    let body = read_head(path).map_err(|e| e.to_string());
    PreviewContent {
        path: path.to_path_buf(),
        body,
    }
}

fn read_head(path: &Path) -> std::io::Result<Vec<String>> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)?
        .take(MAX_PREVIEW_BYTES)
        .read_to_end(&mut bytes)?;

    if bytes.contains(&0) {
        return Ok(vec!["(binary file)".to_string()]);
    }

    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .take(MAX_PREVIEW_LINES)
        .map(|line| line.replace('\t', "    "))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum PreviewState {
    #[default]
    Empty,
    Loading(PathBuf),
    Loaded { path: PathBuf, lines: Vec<String> },
    Failed { path: PathBuf, message: String },
}

#[derive(Debug, Default)]
pub struct Preview {
    state: PreviewState,
    offset: usize,
    viewport_rows: usize,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_loading(&mut self, path: PathBuf) {
        self.state = PreviewState::Loading(path);
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.state = PreviewState::Empty;
        self.offset = 0;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PreviewState::Loading(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            PreviewState::Empty => None,
            PreviewState::Loading(path)
            | PreviewState::Loaded { path, .. }
            | PreviewState::Failed { path, .. } => Some(path),
        }
    }

    pub fn lines(&self) -> &[String] {
        match &self.state {
            PreviewState::Loaded { lines, .. } => lines.as_slice(),
            _ => &[],
        }
    }

    /// Accept a finished load. Returns false when the content is for a file
    /// other than the one currently being loaded.
    pub fn set_content(&mut self, content: PreviewContent) -> bool {
        match &self.state {
            PreviewState::Loading(path) if *path == content.path => {}
            _ => return false,
        }

        self.state = match content.body {
            Ok(lines) => PreviewState::Loaded {
                path: content.path,
                lines,
            },
            Err(message) => PreviewState::Failed {
                path: content.path,
                message,
            },
        };
        self.offset = 0;
        true
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_viewport(&mut self, rows: u16) {
        self.viewport_rows = rows as usize;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (self.offset as i64 + delta as i64).clamp(0, self.max_offset() as i64);
        self.offset = target as usize;
    }

    fn max_offset(&self) -> usize {
        self.lines().len().saturating_sub(self.viewport_rows)
    }

    fn title(&self) -> String {
        match self.path().and_then(|p| p.file_name()) {
            Some(name) => format!(" {} ", name.to_string_lossy()),
            None => " Preview ".to_string(),
        }
    }
}

impl Component for Preview {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollPreview(1)),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollPreview(-1)),
            KeyCode::PageDown => Some(Action::ScrollPreview(self.viewport_rows.max(1) as i32)),
            KeyCode::PageUp => Some(Action::ScrollPreview(-(self.viewport_rows.max(1) as i32))),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        if let Action::ScrollPreview(delta) = action {
            self.scroll_by(*delta);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap) {
        let theme = ctx.theme;
        hits.add_rect(DeckRegion::Preview, area.x, area.y, area.width, area.height, DeckData::None);

        let block = Block::default()
            .title(self.title())
            .title_style(theme.title_style(ctx.focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(ctx.focused));

        let lines: Vec<Line> = match &self.state {
            PreviewState::Empty => vec![Line::from(Span::styled(
                "Double-click a file to preview it",
                theme.muted_style(),
            ))],
            PreviewState::Loading(_) => {
                vec![Line::from(Span::styled("Loading...", theme.muted_style()))]
            }
            PreviewState::Failed { message, .. } => vec![Line::from(Span::styled(
                message.clone(),
                ratatui::style::Style::default().fg(theme.colors.error.to_color()),
            ))],
            PreviewState::Loaded { lines, .. } => lines
                .iter()
                .skip(self.offset)
                .map(|line| Line::from(line.as_str()))
                .collect(),
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
