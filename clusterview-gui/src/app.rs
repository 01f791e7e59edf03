//! Main application state and logic.
//!
//! Contains the `ClusterviewApp` struct which owns one selection session per
//! algorithm page and forwards worker completions to them.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use eframe::egui;
use log::{error, info, warn};

use crate::state::UiState;
use clusterview_core::Algorithm;
use clusterview_io::{ArtifactSource, MemorySource, Session, SourceConfig};

/// Environment variable naming the result store.
const SOURCE_ENV: &str = "CLUSTERVIEW_SOURCE";

/// Main application state.
pub struct ClusterviewApp {
    /// One session per algorithm, in [`Algorithm::ALL`] order.
    pub(crate) sessions: Vec<Session>,
    /// Index of the visible algorithm page.
    pub(crate) active: usize,
    /// Where the sessions read from.
    pub(crate) source_config: SourceConfig,
    /// UI display state.
    pub(crate) ui_state: UiState,
}

impl ClusterviewApp {
    /// Creates the app reading from `config` and starts loading the default
    /// dataset on every page.
    ///
    /// An unusable store is reported in the top bar and replaced by an empty
    /// one until another folder is opened.
    pub fn new(config: SourceConfig) -> Self {
        let mut ui_state = UiState::default();
        let source: Arc<dyn ArtifactSource> = match config.open() {
            Ok(source) => source,
            Err(e) => {
                warn!("cannot open {}: {e}", config.location);
                ui_state.source_status = Some(format!("{}: {e}", config.location));
                Arc::new(MemorySource::new())
            }
        };
        info!("reading results from {}", source.describe());

        let sessions = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                let mut session = Session::new(Arc::clone(&source), algorithm);
                let name = session.dataset_name().to_string();
                session.select_dataset(&name);
                session
            })
            .collect();

        Self {
            sessions,
            active: 0,
            source_config: config,
            ui_state,
        }
    }

    /// Creates the app from `CLUSTERVIEW_SOURCE`, defaulting to `public`.
    pub fn from_env() -> Self {
        let config = std::env::var(SOURCE_ENV)
            .map(SourceConfig::new)
            .unwrap_or_default();
        Self::new(config)
    }

    /// Session of the visible page.
    pub(crate) fn session(&self) -> &Session {
        &self.sessions[self.active]
    }

    /// Mutable session of the visible page.
    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.sessions[self.active]
    }

    /// Switch every page to the artifact tree under `dir`.
    pub fn open_folder(&mut self, dir: &Path) -> anyhow::Result<()> {
        let config = SourceConfig::new(dir.to_string_lossy());
        let source = config
            .open()
            .with_context(|| format!("cannot read results from {}", dir.display()))?;
        for session in &mut self.sessions {
            session.set_source(Arc::clone(&source));
        }
        info!("switched to {}", source.describe());
        self.source_config = config;
        self.ui_state.source_status = None;
        Ok(())
    }

    /// Ask for a folder and switch to it.
    pub(crate) fn pick_folder(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        if let Err(e) = self.open_folder(&dir) {
            error!("{e:#}");
            self.ui_state.source_status = Some(format!("{e:#}"));
        }
    }

    /// Apply pending worker completions on every page.
    pub fn handle_messages(&mut self) {
        for session in &mut self.sessions {
            session.poll();
        }
    }

    fn is_busy(&self) -> bool {
        self.sessions.iter().any(Session::is_loading)
    }
}

impl eframe::App for ClusterviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages();
        self.render_top_panel(ctx);
        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
        self.render_error_window(ctx);

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
