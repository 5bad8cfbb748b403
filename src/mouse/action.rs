use super::hitmap::Region;

/// Classification of a single mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseActionKind {
    Click,
    DoubleClick,
    RightClick,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    Drag,
    DragEnd,
    Hover,
    None,
}

/// The one action produced for each raw event.
///
/// `region` is a copy of the hit region at the event position (absent for
/// misses, scrolls and drag motion). `delta` is the signed scroll amount,
/// negative for up/left. `drag_dx`/`drag_dy` are offsets from the drag anchor
/// and `drag_region` names the region the drag was armed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseAction<K, D> {
    pub kind: MouseActionKind,
    pub region: Option<Region<K, D>>,
    pub x: u16,
    pub y: u16,
    pub delta: i32,
    pub drag_dx: i32,
    pub drag_dy: i32,
    pub drag_region: Option<K>,
}

impl<K, D> MouseAction<K, D> {
    pub fn new(kind: MouseActionKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            region: None,
            x,
            y,
            delta: 0,
            drag_dx: 0,
            drag_dy: 0,
            drag_region: None,
        }
    }

    pub fn with_region(mut self, region: Option<Region<K, D>>) -> Self {
        self.region = region;
        self
    }

    pub fn with_delta(mut self, delta: i32) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_drag(mut self, region: K, dx: i32, dy: i32) -> Self {
        self.drag_region = Some(region);
        self.drag_dx = dx;
        self.drag_dy = dy;
        self
    }

    #[inline]
    pub fn is(&self, kind: MouseActionKind) -> bool {
        self.kind == kind
    }

    pub fn region_id(&self) -> Option<&K> {
        self.region.as_ref().map(|region| &region.id)
    }

    pub fn data(&self) -> Option<&D> {
        self.region.as_ref().map(|region| &region.data)
    }

    pub fn is_scroll(&self) -> bool {
        matches!(
            self.kind,
            MouseActionKind::ScrollUp
                | MouseActionKind::ScrollDown
                | MouseActionKind::ScrollLeft
                | MouseActionKind::ScrollRight
        )
    }
}
