//! Order board terminal client.
//!
//! This crate wires the order store and gesture reconciler to a terminal:
//! - `cli`: command line flags
//! - `config`: state directory layout and board settings
//! - `tui`: the ratatui board with mouse drag-and-drop

pub mod cli;
pub mod config;
pub mod tui;
