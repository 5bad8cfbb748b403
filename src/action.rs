use std::path::PathBuf;

use crate::input::focus::FocusArea;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    ShowQuitDialog,
    DismissDialog,

    FocusNext,
    FocusPrev,
    FocusArea(FocusArea),

    SelectNext,
    SelectPrev,
    Select(usize),
    /// Open the entry at this index: descend into a directory or preview a file.
    Open(usize),
    OpenSelected,

    ScrollFiles(i32),
    ScrollPreview(i32),

    SetSidebarWidth(u16),
    GrowSidebar,
    ShrinkSidebar,

    ConfigChanged(PathBuf),
}
