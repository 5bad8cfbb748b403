//! Raw mouse reports as the gesture handler consumes them.

use crossterm::event::{MouseButton as CrosstermButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
    Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    /// Motion with no button held.
    None,
}

impl Button {
    pub fn is_wheel(&self) -> bool {
        matches!(
            self,
            Button::WheelUp | Button::WheelDown | Button::WheelLeft | Button::WheelRight
        )
    }
}

impl From<CrosstermButton> for Button {
    fn from(button: CrosstermButton) -> Self {
        match button {
            CrosstermButton::Left => Button::Left,
            CrosstermButton::Right => Button::Right,
            CrosstermButton::Middle => Button::Middle,
        }
    }
}

/// One decoded terminal mouse report in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMouseEvent {
    pub action: ButtonAction,
    pub button: Button,
    pub x: u16,
    pub y: u16,
}

impl RawMouseEvent {
    pub fn new(action: ButtonAction, button: Button, x: u16, y: u16) -> Self {
        Self { action, button, x, y }
    }

    pub fn press(button: Button, x: u16, y: u16) -> Self {
        Self::new(ButtonAction::Press, button, x, y)
    }

    pub fn release(button: Button, x: u16, y: u16) -> Self {
        Self::new(ButtonAction::Release, button, x, y)
    }

    pub fn motion(x: u16, y: u16) -> Self {
        Self::new(ButtonAction::Motion, Button::None, x, y)
    }

    pub fn wheel(button: Button, x: u16, y: u16) -> Self {
        Self::new(ButtonAction::Press, button, x, y)
    }
}

/// crossterm reports wheel ticks as their own kinds and splits motion into
/// `Drag(button)` and `Moved`; both fold into `Motion` here.
impl From<MouseEvent> for RawMouseEvent {
    fn from(mouse: MouseEvent) -> Self {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => Self::press(button.into(), x, y),
            MouseEventKind::Up(button) => Self::release(button.into(), x, y),
            MouseEventKind::Drag(button) => Self::new(ButtonAction::Motion, button.into(), x, y),
            MouseEventKind::Moved => Self::motion(x, y),
            MouseEventKind::ScrollUp => Self::wheel(Button::WheelUp, x, y),
            MouseEventKind::ScrollDown => Self::wheel(Button::WheelDown, x, y),
            MouseEventKind::ScrollLeft => Self::wheel(Button::WheelLeft, x, y),
            MouseEventKind::ScrollRight => Self::wheel(Button::WheelRight, x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn crossterm_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_press_and_release_conversion() {
        let down: RawMouseEvent =
            crossterm_mouse(MouseEventKind::Down(CrosstermButton::Left), 4, 2).into();
        assert_eq!(down, RawMouseEvent::press(Button::Left, 4, 2));

        let up: RawMouseEvent =
            crossterm_mouse(MouseEventKind::Up(CrosstermButton::Right), 1, 1).into();
        assert_eq!(up, RawMouseEvent::release(Button::Right, 1, 1));
    }

    #[test]
    fn test_drag_and_move_become_motion() {
        let drag: RawMouseEvent =
            crossterm_mouse(MouseEventKind::Drag(CrosstermButton::Left), 9, 3).into();
        assert_eq!(drag.action, ButtonAction::Motion);
        assert_eq!(drag.button, Button::Left);

        let moved: RawMouseEvent = crossterm_mouse(MouseEventKind::Moved, 9, 3).into();
        assert_eq!(moved, RawMouseEvent::motion(9, 3));
    }

    #[test]
    fn test_scroll_becomes_wheel_press() {
        let up: RawMouseEvent = crossterm_mouse(MouseEventKind::ScrollUp, 0, 0).into();
        assert_eq!(up.action, ButtonAction::Press);
        assert!(up.button.is_wheel());
        assert_eq!(up.button, Button::WheelUp);

        let right: RawMouseEvent = crossterm_mouse(MouseEventKind::ScrollRight, 0, 0).into();
        assert_eq!(right.button, Button::WheelRight);
        assert!(!Button::Left.is_wheel());
    }
}
