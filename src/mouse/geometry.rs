//! Cell-coordinate helpers shared by the hit map and its callers.

use ratatui::layout::Rect;

/// Whether the cell `(x, y)` lies inside `rect`.
///
/// Right and bottom edges are exclusive, so a zero-width or zero-height
/// rect never contains anything. Edges are computed in `u32` so rects that
/// touch `u16::MAX` do not wrap.
#[inline]
pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    let (x, y) = (u32::from(x), u32::from(y));
    let left = u32::from(rect.x);
    let top = u32::from(rect.y);
    x >= left
        && x < left + u32::from(rect.width)
        && y >= top
        && y < top + u32::from(rect.height)
}

/// Signed distance travelled from `from` to `to` along one axis.
#[inline]
pub fn signed_delta(from: u16, to: u16) -> i32 {
    i32::from(to) - i32::from(from)
}

/// Chebyshev distance between two cells (max of the per-axis distances).
#[inline]
pub fn cell_distance(a: (u16, u16), b: (u16, u16)) -> u16 {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// Combine a value captured at drag start with the current drag offset.
///
/// The result is clamped to `[min, max]`. If `min > max` (pane narrower than
/// its minimum) `min` wins.
pub fn apply_delta(start: i32, delta: i32, min: u16, max: u16) -> u16 {
    let value = start.saturating_add(delta).clamp(0, i32::from(u16::MAX)) as u16;
    value.min(max).max(min)
}

/// A `width` x `height` rect centred inside `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
