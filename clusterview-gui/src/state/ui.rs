//! UI display state.

/// Panel visibility and transient UI state.
#[derive(Debug, Default)]
pub struct UiState {
    /// Hide the plot legend even when it has several entries.
    pub hide_legend: bool,
    /// Problem with the configured result store, shown in the top bar.
    pub source_status: Option<String>,
    /// Plot coordinates under the pointer.
    pub cursor: Option<[f64; 2]>,
}
