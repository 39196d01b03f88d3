//! The host that owns a post being edited.

use crate::error::{ExportError, RenderError};
use crate::fonts::{FontEvent, FontLoader, LoadState};
use crate::models::{FontFamily, PostConfig};
use crate::rendering::{ExportedFile, Exporter, ImageFormat, PostRenderer, Surface};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Owns the current config and surface, and redraws when the font the config
/// uses finishes loading.
pub struct PostSession {
    config: PostConfig,
    surface: Option<Surface>,
    renderer: PostRenderer,
    loader: FontLoader,
    events: broadcast::Receiver<FontEvent>,
    exporter: Exporter,
}

impl PostSession {
    /// Nothing is drawn until the first `apply` or `redraw`.
    pub fn new(config: PostConfig, loader: FontLoader, exporter: Exporter) -> Self {
        Self {
            config,
            surface: None,
            renderer: PostRenderer::new(loader.book().clone()),
            events: loader.subscribe(),
            loader,
            exporter,
        }
    }

    pub fn config(&self) -> &PostConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn loader(&self) -> &FontLoader {
        &self.loader
    }

    /// Replace the config, start loading its font if needed, and redraw.
    ///
    /// The redraw uses whatever faces are available now; another one follows
    /// from `pump_font_events` once the font arrives. A font that failed is
    /// only retried when the config switches to it again.
    pub fn apply(&mut self, config: PostConfig) -> Result<(), RenderError> {
        let font_changed = config.font != self.config.font;
        self.config = config;

        let family = self.config.font.as_str();
        let state = self.loader.state(family);
        if state == LoadState::NotRequested || (font_changed && state == LoadState::Failed) {
            self.loader.request(family);
        }
        self.redraw()
    }

    pub fn redraw(&mut self) -> Result<(), RenderError> {
        match self.surface.as_mut() {
            Some(surface) => self.renderer.render(surface, &self.config)?,
            None => self.surface = Some(self.renderer.render_new(&self.config)?),
        }
        Ok(())
    }

    /// Drain pending font events without waiting. Redraws once if the
    /// current font became available; returns whether it did.
    pub fn pump_font_events(&mut self) -> Result<bool, RenderError> {
        let mut needs_redraw = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if event.state == LoadState::Loaded && event.family == self.config.font.as_str()
                    {
                        needs_redraw = true;
                    }
                }
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Font events lagged");
                    needs_redraw |= self.loader.is_loaded(self.config.font.as_str());
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if needs_redraw {
            tracing::debug!(font = %self.config.font, "Font loaded, redrawing");
            self.redraw()?;
        }
        Ok(needs_redraw)
    }

    /// Wait for `family` to settle, redrawing if it is the current font and
    /// it loaded.
    pub async fn wait_for_font(&mut self, family: &FontFamily) -> Result<LoadState, RenderError> {
        let state = self.loader.ensure_loaded(family.as_str()).await;
        if state == LoadState::Loaded && *family == self.config.font {
            self.redraw()?;
        }
        Ok(state)
    }

    pub fn export(
        &self,
        format: ImageFormat,
        filename: Option<&str>,
    ) -> Result<ExportedFile, ExportError> {
        self.exporter
            .export(self.surface.as_ref(), format, filename)
    }
}
