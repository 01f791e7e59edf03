//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `control_panel`: Top bar with algorithm tabs and left sidebar with selectors
//! - `info_panel`: Dataset, result and algorithm cards
//! - `main_view`: Central panel with the scatter plot
//! - `error_window`: Dismissible load error popup

mod control_panel;
mod error_window;
mod info_panel;
mod main_view;
pub mod theme;
