//! Mouse hit-testing and gesture classification.
//!
//! Renderers register [`Region`]s into a [`HitMap`] while drawing a frame;
//! the event loop feeds raw terminal mouse reports to a [`MouseHandler`],
//! which resolves them against that map and returns one [`MouseAction`] per
//! event for the caller to dispatch.
//!
//! Region ids (`K`) are meant to be a small enum per UI surface and payloads
//! (`D`) whatever single type that surface needs to tell instances apart.

mod action;
mod event;
pub mod geometry;
mod handler;
mod hitmap;

pub use action::{MouseAction, MouseActionKind};
pub use event::{Button, ButtonAction, RawMouseEvent};
pub use handler::MouseHandler;
pub use hitmap::{HitMap, Region};
