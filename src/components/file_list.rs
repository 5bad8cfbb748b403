use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::action::Action;
use crate::components::{Component, DeckData, DeckHitMap, DeckRegion, RenderContext};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FileEntry {
    fn display_name(&self) -> String {
        if self.is_dir && self.name != ".." {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Flat listing of one directory. Rows beyond the viewport are not registered
/// as regions, so clicks can only ever land on what is drawn.
pub struct FileList {
    root: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    offset: usize,
    viewport_rows: usize,
}

impl FileList {
    pub fn new(root: PathBuf) -> Result<Self> {
        let entries = read_entries(&root)?;
        Ok(Self {
            root,
            entries,
            selected: 0,
            offset: 0,
            viewport_rows: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.selected)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Replace the listing with the contents of `root`.
    pub fn set_root(&mut self, root: PathBuf) -> Result<()> {
        self.entries = read_entries(&root)?;
        self.root = root;
        self.selected = 0;
        self.offset = 0;
        Ok(())
    }

    /// Number of rows the last layout pass gave this pane.
    pub fn set_viewport(&mut self, rows: u16) {
        self.viewport_rows = rows as usize;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        self.ensure_selected_visible();
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.select(self.selected + 1);
        }
    }

    fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Move the viewport without touching the selection.
    pub fn scroll_by(&mut self, delta: i32) {
        let target = (self.offset as i64 + delta as i64).clamp(0, self.max_offset() as i64);
        self.offset = target as usize;
    }

    fn max_offset(&self) -> usize {
        self.entries.len().saturating_sub(self.viewport_rows)
    }

    fn ensure_selected_visible(&mut self) {
        if self.viewport_rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport_rows {
            self.offset = self.selected + 1 - self.viewport_rows;
        }
    }

    fn title(&self) -> String {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());
        format!(" {} ", name)
    }
}

/// Directories first, then files, each group sorted case-insensitively.
/// A `..` entry leads the list when the directory has a parent.
pub fn read_entries(root: &Path) -> Result<Vec<FileEntry>> {
    let mut entries: Vec<FileEntry> = std::fs::read_dir(root)?
        .flatten()
        .map(|entry| {
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    if let Some(parent) = root.parent() {
        entries.insert(
            0,
            FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            },
        );
    }

    Ok(entries)
}

impl Component for FileList {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Enter => Some(Action::OpenSelected),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::SelectNext => self.select_next(),
            Action::SelectPrev => self.select_prev(),
            Action::Select(index) => self.select(*index),
            Action::ScrollFiles(delta) => self.scroll_by(*delta),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap) {
        let theme = ctx.theme;
        let block = Block::default()
            .title(self.title())
            .title_style(theme.title_style(ctx.focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(ctx.focused));
        let inner = block.inner(area);

        // Pane first so rows registered after it win inside the list.
        hits.add_rect(DeckRegion::FilePane, area.x, area.y, area.width, area.height, DeckData::None);

        let visible = self
            .entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(inner.height as usize);

        let mut items = Vec::new();
        for (row, (index, entry)) in visible.enumerate() {
            hits.add_rect(
                DeckRegion::FileRow,
                inner.x,
                inner.y + row as u16,
                inner.width,
                1,
                DeckData::Row(index),
            );

            let hovered = ctx.is_hovered(DeckRegion::FileRow, DeckData::Row(index));
            let style = theme.item_style(entry.is_dir, index == self.selected, hovered);
            items.push(ListItem::new(Line::from(Span::raw(entry.display_name()))).style(style));
        }

        if items.is_empty() {
            let empty = ListItem::new(Line::from(Span::styled("(empty)", theme.muted_style())));
            frame.render_widget(List::new(vec![empty]).block(block), area);
        } else {
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}
