//! Application state modules.

mod ui;

pub use ui::UiState;
