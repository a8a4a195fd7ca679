//! Terminal User Interface for the order board.
//!
//! Provides a three-column board with:
//! - Header with add and help buttons
//! - One bordered column per workflow stage, each a drop area
//! - Order cards that can be dragged with the mouse or carried with the keyboard
//! - Modal add/edit forms and a help overlay
//! - Footer with keybindings

mod app;
mod events;
mod hitmap;
mod input;
mod ui;

pub use app::{App, FormField};
pub use events::run;
pub use hitmap::{HitMap, HitRegion};
