//! Ridge-Deck: region-based mouse handling for terminal UIs, plus a small
//! multi-pane dashboard built on it.
//!
//! The reusable part is [`mouse`]: register rectangles while drawing, feed raw
//! events to a [`mouse::MouseHandler`], and act on the classified
//! [`mouse::MouseAction`]s it returns. Everything else is the dashboard.

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod epoch;
pub mod error;
pub mod input;
pub mod logging;
pub mod mouse;
