//! Gesture interpretation over the per-frame hit map.
//!
//! [`MouseHandler`] owns the [`HitMap`] for one UI surface together with the
//! state that has to survive between events: the last click (for double-click
//! detection), the armed drag, and the region under the pointer. Every call to
//! [`MouseHandler::handle`] yields exactly one [`MouseAction`].
//!
//! Dragging is opt-in. A press is always reported as a click; callers that
//! want drag semantics for the clicked region call
//! [`MouseHandler::start_drag`] while handling that click. From then on motion
//! reports offsets from the anchor, which the caller adds to the value it
//! captured at drag start, so no error accumulates across motion events.

use std::time::Instant;

use crate::config::MouseConfig;

use super::action::{MouseAction, MouseActionKind};
use super::event::{Button, ButtonAction, RawMouseEvent};
use super::geometry::{cell_distance, signed_delta};
use super::hitmap::{HitMap, Region};

#[derive(Debug, Clone)]
struct LastClick<K, D> {
    id: K,
    data: D,
    x: u16,
    y: u16,
    at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragAnchor<K> {
    region: K,
    x: u16,
    y: u16,
    start_value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState<K> {
    None,
    Dragging(DragAnchor<K>),
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self::None
    }
}

impl<K> DragState<K> {
    fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    fn anchor(&self) -> Option<&DragAnchor<K>> {
        match self {
            DragState::Dragging(anchor) => Some(anchor),
            DragState::None => None,
        }
    }

    fn stop(&mut self) {
        *self = DragState::None;
    }
}

pub struct MouseHandler<K, D> {
    hitmap: HitMap<K, D>,
    config: MouseConfig,
    last_click: Option<LastClick<K, D>>,
    drag: DragState<K>,
    hover: Option<K>,
}

impl<K, D> Default for MouseHandler<K, D>
where
    K: Clone + PartialEq + std::fmt::Debug,
    D: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new(MouseConfig::default())
    }
}

impl<K, D> MouseHandler<K, D>
where
    K: Clone + PartialEq + std::fmt::Debug,
    D: Clone + PartialEq,
{
    pub fn new(config: MouseConfig) -> Self {
        Self {
            hitmap: HitMap::new(),
            config,
            last_click: None,
            drag: DragState::default(),
            hover: None,
        }
    }

    pub fn config(&self) -> &MouseConfig {
        &self.config
    }

    /// Swap thresholds in place; gesture state is kept.
    pub fn set_config(&mut self, config: MouseConfig) {
        self.config = config;
    }

    pub fn hitmap(&self) -> &HitMap<K, D> {
        &self.hitmap
    }

    pub fn hitmap_mut(&mut self) -> &mut HitMap<K, D> {
        &mut self.hitmap
    }

    /// Start a new frame of region registration.
    ///
    /// Only the regions are dropped. Hover, the pending click and an armed
    /// drag all outlive the frame.
    pub fn clear(&mut self) {
        self.hitmap.clear();
    }

    pub fn add_rect(&mut self, id: K, x: u16, y: u16, width: u16, height: u16, data: D) {
        self.hitmap.add_rect(id, x, y, width, height, data);
    }

    pub fn handle(&mut self, event: impl Into<RawMouseEvent>) -> MouseAction<K, D> {
        self.handle_at(event, Instant::now())
    }

    /// Classify `event` as if it arrived at `now`.
    pub fn handle_at(&mut self, event: impl Into<RawMouseEvent>, now: Instant) -> MouseAction<K, D> {
        let RawMouseEvent { action, button, x, y } = event.into();

        let result = match action {
            ButtonAction::Press if button.is_wheel() => self.scroll(button, x, y),
            ButtonAction::Press => self.press(button, x, y, now),
            ButtonAction::Release => self.release(x, y),
            ButtonAction::Motion => self.motion(x, y),
        };

        tracing::trace!(
            kind = ?result.kind,
            region = ?result.region_id(),
            x,
            y,
            "mouse action"
        );
        result
    }

    /// Arm drag tracking anchored at `(x, y)`.
    ///
    /// `start_value` is whatever the caller is about to change (a pane width,
    /// a selection anchor). A drag that is already armed is replaced.
    pub fn start_drag(&mut self, x: u16, y: u16, region: K, start_value: i32) {
        if let Some(previous) = self.drag.anchor() {
            tracing::debug!(previous = ?previous.region, next = ?region, "replacing armed drag");
        }
        self.drag = DragState::Dragging(DragAnchor {
            region,
            x,
            y,
            start_value,
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_region(&self) -> Option<&K> {
        self.drag.anchor().map(|anchor| &anchor.region)
    }

    pub fn drag_start_value(&self) -> Option<i32> {
        self.drag.anchor().map(|anchor| anchor.start_value)
    }

    /// Disarm a drag without waiting for the button release.
    pub fn end_drag(&mut self) {
        self.drag.stop();
    }

    pub fn hover_region(&self) -> Option<&K> {
        self.hover.as_ref()
    }

    pub fn is_hovered(&self, id: &K) -> bool {
        self.hover.as_ref() == Some(id)
    }

    /// Forget every piece of gesture state. Registered regions are kept.
    pub fn reset(&mut self) {
        self.last_click = None;
        self.drag.stop();
        self.hover = None;
    }

    fn press(&mut self, button: Button, x: u16, y: u16, now: Instant) -> MouseAction<K, D> {
        // A press can only follow a release, so an armed drag here lost its
        // release somewhere outside the terminal.
        if let Some(stale) = self.drag.anchor() {
            tracing::debug!(region = ?stale.region, "press with drag still armed; disarming");
            self.drag.stop();
        }

        let region = self.hitmap.test(x, y).cloned();

        match button {
            Button::Left => {}
            Button::Right => {
                return MouseAction::new(MouseActionKind::RightClick, x, y).with_region(region);
            }
            _ => return MouseAction::new(MouseActionKind::None, x, y),
        }

        let Some(region) = region else {
            self.last_click = None;
            return MouseAction::new(MouseActionKind::Click, x, y);
        };

        if self.is_double_click(&region, x, y, now) {
            // Consumed, so a third rapid press starts over as a single click.
            self.last_click = None;
            return MouseAction::new(MouseActionKind::DoubleClick, x, y).with_region(Some(region));
        }

        self.last_click = Some(LastClick {
            id: region.id.clone(),
            data: region.data.clone(),
            x,
            y,
            at: now,
        });
        MouseAction::new(MouseActionKind::Click, x, y).with_region(Some(region))
    }

    fn is_double_click(&self, region: &Region<K, D>, x: u16, y: u16, now: Instant) -> bool {
        let Some(last) = &self.last_click else {
            return false;
        };

        now.saturating_duration_since(last.at) <= self.config.double_click_window()
            && last.id == region.id
            && last.data == region.data
            && cell_distance((last.x, last.y), (x, y)) <= self.config.double_click_distance
    }

    fn release(&mut self, x: u16, y: u16) -> MouseAction<K, D> {
        match self.drag_offsets(x, y) {
            Some((region, dx, dy)) => {
                self.drag.stop();
                MouseAction::new(MouseActionKind::DragEnd, x, y).with_drag(region, dx, dy)
            }
            None => MouseAction::new(MouseActionKind::None, x, y),
        }
    }

    fn motion(&mut self, x: u16, y: u16) -> MouseAction<K, D> {
        if let Some((region, dx, dy)) = self.drag_offsets(x, y) {
            return MouseAction::new(MouseActionKind::Drag, x, y).with_drag(region, dx, dy);
        }

        let region = self.hitmap.test(x, y).cloned();
        self.hover = region.as_ref().map(|region| region.id.clone());
        MouseAction::new(MouseActionKind::Hover, x, y).with_region(region)
    }

    fn scroll(&self, button: Button, x: u16, y: u16) -> MouseAction<K, D> {
        let step = i32::from(self.config.scroll_delta);
        let (kind, delta) = match button {
            Button::WheelUp => (MouseActionKind::ScrollUp, -step),
            Button::WheelDown => (MouseActionKind::ScrollDown, step),
            Button::WheelLeft => (MouseActionKind::ScrollLeft, -step),
            Button::WheelRight => (MouseActionKind::ScrollRight, step),
            _ => (MouseActionKind::None, 0),
        };
        MouseAction::new(kind, x, y).with_delta(delta)
    }

    fn drag_offsets(&self, x: u16, y: u16) -> Option<(K, i32, i32)> {
        self.drag.anchor().map(|anchor| {
            (
                anchor.region.clone(),
                signed_delta(anchor.x, x),
                signed_delta(anchor.y, y),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        Row,
        Divider,
        Dialog,
        DialogButton,
    }

    fn handler() -> MouseHandler<Target, usize> {
        MouseHandler::new(MouseConfig::default())
    }

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    fn left(x: u16, y: u16) -> RawMouseEvent {
        RawMouseEvent::press(Button::Left, x, y)
    }

    fn with_rows(handler: &mut MouseHandler<Target, usize>, rows: u16) {
        for row in 0..rows {
            handler.add_rect(Target::Row, 0, row, 20, 1, row as usize);
        }
    }

    #[test]
    fn test_press_on_empty_map_is_click_without_region() {
        let mut h = handler();
        let action = h.handle(left(0, 0));
        assert_eq!(action.kind, MouseActionKind::Click);
        assert!(action.region.is_none());
    }

    #[test]
    fn test_click_carries_region() {
        let mut h = handler();
        with_rows(&mut h, 5);

        let action = h.handle(left(3, 2));
        assert!(action.is(MouseActionKind::Click));
        assert_eq!(action.region_id(), Some(&Target::Row));
        assert_eq!(action.data(), Some(&2));
        assert_eq!((action.x, action.y), (3, 2));
    }

    #[test]
    fn test_double_click_then_fresh_click() {
        let mut h = handler();
        with_rows(&mut h, 5);
        let t0 = Instant::now();

        assert_eq!(h.handle_at(left(3, 1), t0).kind, MouseActionKind::Click);
        assert_eq!(h.handle_at(left(3, 1), ms(t0, 120)).kind, MouseActionKind::DoubleClick);
        assert_eq!(h.handle_at(left(3, 1), ms(t0, 200)).kind, MouseActionKind::Click);
    }

    #[test]
    fn test_double_click_requires_same_data() {
        let mut h = handler();
        // Two rows of the same kind on the same line; the later one covers
        // x >= 10.
        h.add_rect(Target::Row, 0, 0, 20, 1, 1);
        h.add_rect(Target::Row, 10, 0, 10, 1, 2);
        let t0 = Instant::now();

        assert_eq!(h.handle_at(left(9, 0), t0).data(), Some(&1));
        let second = h.handle_at(left(10, 0), ms(t0, 50));
        assert_eq!(second.kind, MouseActionKind::Click);
        assert_eq!(second.data(), Some(&2));
    }

    #[test]
    fn test_double_click_requires_same_region() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 10, 1, 0);
        h.add_rect(Target::Divider, 10, 0, 1, 1, 0);
        let t = Instant::now();

        assert_eq!(h.handle_at(left(9, 0), t).kind, MouseActionKind::Click);
        assert_eq!(h.handle_at(left(10, 0), t).kind, MouseActionKind::Click);
    }

    #[test]
    fn test_double_click_window_expires() {
        let mut h = handler();
        with_rows(&mut h, 1);
        let t0 = Instant::now();

        h.handle_at(left(2, 0), t0);
        let late = h.handle_at(left(2, 0), ms(t0, 401));
        assert_eq!(late.kind, MouseActionKind::Click);

        // The late click starts a new cycle of its own.
        let quick = h.handle_at(left(2, 0), ms(t0, 500));
        assert_eq!(quick.kind, MouseActionKind::DoubleClick);
    }

    #[rstest]
    #[case(0, MouseActionKind::DoubleClick)]
    #[case(1, MouseActionKind::DoubleClick)]
    #[case(2, MouseActionKind::Click)]
    fn test_double_click_distance_tolerance(#[case] shift: u16, #[case] expected: MouseActionKind) {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 20, 1, 0);
        let t0 = Instant::now();

        h.handle_at(left(5, 0), t0);
        assert_eq!(h.handle_at(left(5 + shift, 0), ms(t0, 10)).kind, expected);
    }

    #[test]
    fn test_miss_between_clicks_breaks_double_click() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 10, 1, 0);
        let t0 = Instant::now();

        h.handle_at(left(1, 0), t0);
        assert!(h.handle_at(left(1, 5), ms(t0, 10)).region.is_none());
        assert_eq!(h.handle_at(left(1, 0), ms(t0, 20)).kind, MouseActionKind::Click);
    }

    #[test]
    fn test_right_click_does_not_arm_double_click() {
        let mut h = handler();
        with_rows(&mut h, 1);
        let t0 = Instant::now();

        let right = h.handle_at(RawMouseEvent::press(Button::Right, 1, 0), t0);
        assert_eq!(right.kind, MouseActionKind::RightClick);
        assert_eq!(right.data(), Some(&0));

        assert_eq!(h.handle_at(left(1, 0), ms(t0, 10)).kind, MouseActionKind::Click);
    }

    #[test]
    fn test_middle_press_is_ignored() {
        let mut h = handler();
        with_rows(&mut h, 1);
        let action = h.handle(RawMouseEvent::press(Button::Middle, 1, 0));
        assert_eq!(action.kind, MouseActionKind::None);
    }

    #[test]
    fn test_overlay_wins_click() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 40, 20, 0);
        h.add_rect(Target::Dialog, 10, 5, 20, 10, 0);
        h.add_rect(Target::DialogButton, 12, 12, 6, 1, 1);

        assert_eq!(h.handle(left(13, 12)).region_id(), Some(&Target::DialogButton));
        assert_eq!(h.handle(left(11, 6)).region_id(), Some(&Target::Dialog));
        assert_eq!(h.handle(left(1, 1)).region_id(), Some(&Target::Row));
    }

    #[test]
    fn test_drag_offsets_are_relative_to_anchor() {
        let mut h = handler();
        h.start_drag(10, 5, Target::Divider, 30);

        let right = h.handle(RawMouseEvent::motion(14, 5));
        assert_eq!(right.kind, MouseActionKind::Drag);
        assert_eq!(right.drag_dx, 4);

        let left_of_anchor = h.handle(RawMouseEvent::motion(8, 5));
        assert_eq!(left_of_anchor.drag_dx, -2);
        assert_eq!(left_of_anchor.drag_dy, 0);

        let end = h.handle(RawMouseEvent::release(Button::Left, 8, 5));
        assert_eq!(end.kind, MouseActionKind::DragEnd);
        assert_eq!(end.drag_dx, -2);
        assert_eq!(end.drag_region, Some(Target::Divider));
        assert!(!h.is_dragging());

        assert_eq!(h.handle(RawMouseEvent::motion(8, 5)).kind, MouseActionKind::Hover);
    }

    #[test]
    fn test_drag_value_does_not_drift() {
        let mut h = handler();
        h.start_drag(20, 0, Target::Divider, 40);

        for x in [21, 23, 22, 26, 19, 24] {
            h.handle(RawMouseEvent::motion(x, 0));
        }
        let action = h.handle(RawMouseEvent::motion(25, 0));
        let start = h.drag_start_value().unwrap();
        assert_eq!(start + action.drag_dx, 45);
    }

    #[test]
    fn test_drag_accessors() {
        let mut h = handler();
        assert!(h.drag_region().is_none());
        assert!(h.drag_start_value().is_none());

        h.start_drag(3, 4, Target::Divider, 12);
        assert!(h.is_dragging());
        assert_eq!(h.drag_region(), Some(&Target::Divider));
        assert_eq!(h.drag_start_value(), Some(12));

        // A second arm replaces the first.
        h.start_drag(0, 0, Target::Row, 99);
        assert_eq!(h.drag_region(), Some(&Target::Row));
        assert_eq!(h.drag_start_value(), Some(99));

        h.end_drag();
        assert!(!h.is_dragging());
    }

    #[test]
    fn test_drag_survives_frame_rebuild() {
        let mut h = handler();
        h.add_rect(Target::Divider, 30, 0, 1, 10, 0);
        let click = h.handle(left(30, 2));
        assert_eq!(click.region_id(), Some(&Target::Divider));
        h.start_drag(click.x, click.y, Target::Divider, 30);

        // Next frame draws nothing at all.
        h.clear();

        let drag = h.handle(RawMouseEvent::new(ButtonAction::Motion, Button::Left, 35, 2));
        assert_eq!(drag.kind, MouseActionKind::Drag);
        assert_eq!(drag.drag_dx, 5);
        assert_eq!(h.drag_start_value(), Some(30));
        assert_eq!(h.handle(RawMouseEvent::release(Button::Left, 35, 2)).kind, MouseActionKind::DragEnd);
    }

    #[test]
    fn test_release_without_drag_is_noop() {
        let mut h = handler();
        with_rows(&mut h, 2);
        let action = h.handle(RawMouseEvent::release(Button::Left, 1, 1));
        assert_eq!(action.kind, MouseActionKind::None);
        assert!(action.region.is_none());
    }

    #[test]
    fn test_press_disarms_stale_drag() {
        let mut h = handler();
        with_rows(&mut h, 2);
        h.start_drag(0, 0, Target::Divider, 10);

        let action = h.handle(left(1, 1));
        assert_eq!(action.kind, MouseActionKind::Click);
        assert!(action.drag_region.is_none());
        assert!(!h.is_dragging());

        // The release that follows belongs to the new press, not the lost drag.
        let release = h.handle(RawMouseEvent::release(Button::Left, 1, 1));
        assert_eq!(release.kind, MouseActionKind::None);
        assert!(release.drag_region.is_none());
    }

    #[test]
    fn test_hover_tracks_region_under_pointer() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 10, 1, 0);
        h.add_rect(Target::DialogButton, 0, 2, 10, 1, 0);

        let hover = h.handle(RawMouseEvent::motion(4, 2));
        assert_eq!(hover.kind, MouseActionKind::Hover);
        assert_eq!(hover.region_id(), Some(&Target::DialogButton));
        assert!(h.is_hovered(&Target::DialogButton));

        let miss = h.handle(RawMouseEvent::motion(4, 7));
        assert_eq!(miss.kind, MouseActionKind::Hover);
        assert!(miss.region.is_none());
        assert!(h.hover_region().is_none());
    }

    #[test]
    fn test_hover_survives_clear() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 10, 1, 0);
        h.handle(RawMouseEvent::motion(1, 0));
        h.clear();
        assert_eq!(h.hover_region(), Some(&Target::Row));
    }

    #[test]
    fn test_motion_during_drag_does_not_update_hover() {
        let mut h = handler();
        h.add_rect(Target::Row, 0, 0, 10, 1, 0);
        h.start_drag(0, 0, Target::Divider, 0);
        h.handle(RawMouseEvent::motion(1, 0));
        assert!(h.hover_region().is_none());
    }

    #[rstest]
    #[case(Button::WheelUp, MouseActionKind::ScrollUp, -3)]
    #[case(Button::WheelDown, MouseActionKind::ScrollDown, 3)]
    #[case(Button::WheelLeft, MouseActionKind::ScrollLeft, -3)]
    #[case(Button::WheelRight, MouseActionKind::ScrollRight, 3)]
    fn test_wheel_scrolls_without_hit_test(
        #[case] button: Button,
        #[case] kind: MouseActionKind,
        #[case] delta: i32,
    ) {
        let mut h = handler();
        let action = h.handle(RawMouseEvent::wheel(button, 50, 50));
        assert_eq!(action.kind, kind);
        assert_eq!(action.delta, delta);
        assert!(action.is_scroll());
        assert!(action.region.is_none());
    }

    #[test]
    fn test_scroll_delta_follows_config() {
        let mut h = handler();
        h.set_config(MouseConfig {
            scroll_delta: 5,
            ..MouseConfig::default()
        });
        assert_eq!(h.handle(RawMouseEvent::wheel(Button::WheelDown, 0, 0)).delta, 5);
    }

    #[test]
    fn test_scroll_does_not_disturb_double_click() {
        let mut h = handler();
        with_rows(&mut h, 1);
        let t0 = Instant::now();

        h.handle_at(left(1, 0), t0);
        h.handle_at(RawMouseEvent::wheel(Button::WheelDown, 1, 0), ms(t0, 10));
        assert_eq!(h.handle_at(left(1, 0), ms(t0, 20)).kind, MouseActionKind::DoubleClick);
    }

    #[test]
    fn test_reset_clears_gesture_state() {
        let mut h = handler();
        with_rows(&mut h, 1);
        let t0 = Instant::now();

        h.handle_at(RawMouseEvent::motion(1, 0), t0);
        h.handle_at(left(1, 0), t0);
        h.start_drag(1, 0, Target::Divider, 0);

        h.reset();
        assert!(!h.is_dragging());
        assert!(h.hover_region().is_none());
        assert_eq!(h.handle_at(left(1, 0), ms(t0, 10)).kind, MouseActionKind::Click);
        assert_eq!(h.hitmap().len(), 1);
    }

    #[test]
    fn test_handlers_are_independent() {
        let mut a = handler();
        let mut b = handler();
        with_rows(&mut a, 1);
        with_rows(&mut b, 1);
        let t0 = Instant::now();

        a.handle_at(left(1, 0), t0);
        assert_eq!(b.handle_at(left(1, 0), ms(t0, 10)).kind, MouseActionKind::Click);
    }
}
