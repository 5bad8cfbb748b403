pub mod confirm_dialog;
pub mod file_list;
pub mod pane_layout;
pub mod preview;
pub mod status_bar;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::config::Theme;
use crate::mouse::{HitMap, MouseHandler};

pub use confirm_dialog::ConfirmDialog;
pub use file_list::FileList;
pub use pane_layout::PaneLayout;
pub use preview::Preview;
pub use status_bar::StatusBar;

/// Clickable things on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckRegion {
    FilePane,
    FileRow,
    Divider,
    Preview,
    StatusButton,
    ModalConfirm,
    ModalCancel,
    ModalBackdrop,
}

impl DeckRegion {
    pub fn label(&self) -> &'static str {
        match self {
            DeckRegion::FilePane => "file pane",
            DeckRegion::FileRow => "file row",
            DeckRegion::Divider => "divider",
            DeckRegion::Preview => "preview",
            DeckRegion::StatusButton => "quit button",
            DeckRegion::ModalConfirm => "confirm",
            DeckRegion::ModalCancel => "cancel",
            DeckRegion::ModalBackdrop => "backdrop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckData {
    #[default]
    None,
    /// Absolute index into the file list.
    Row(usize),
}

pub type DeckHitMap = HitMap<DeckRegion, DeckData>;
pub type DeckMouse = MouseHandler<DeckRegion, DeckData>;

/// What a pane needs to know about the rest of the frame while drawing.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub focused: bool,
    /// Region under the pointer as of the last motion event.
    pub hover: Option<(DeckRegion, DeckData)>,
    /// Region the handler has a drag armed on, if any.
    pub dragging: Option<DeckRegion>,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            focused: false,
            hover: None,
            dragging: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_hover(mut self, hover: Option<(DeckRegion, DeckData)>) -> Self {
        self.hover = hover;
        self
    }

    pub fn with_dragging(mut self, dragging: Option<DeckRegion>) -> Self {
        self.dragging = dragging;
        self
    }

    pub fn is_hovered(&self, id: DeckRegion, data: DeckData) -> bool {
        self.hover == Some((id, data))
    }

    pub fn is_dragging(&self, id: DeckRegion) -> bool {
        self.dragging == Some(id)
    }
}

/// A pane draws itself and registers the regions it occupies in the same pass.
pub trait Component {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Action>;

    fn update(&mut self, action: &Action);

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext, hits: &mut DeckHitMap);
}
