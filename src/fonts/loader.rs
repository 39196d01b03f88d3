//! On-demand font activation.
//!
//! Each family moves through `NotRequested -> Loading -> Loaded | Failed`.
//! Activation runs as a background task; concurrent callers for the same
//! family attach to the in-flight task instead of starting another one.
//! A failed family may be requested again.

use super::{directory, stylesheet, FontBook};
use crate::error::FontError;
use crate::models::FontsConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Loaded | Self::Failed)
    }
}

/// Published whenever an activation settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEvent {
    pub family: String,
    pub state: LoadState,
}

enum Entry {
    Loading(watch::Receiver<LoadState>),
    Loaded,
    Failed,
}

enum Pending {
    Settled(LoadState),
    InFlight(watch::Receiver<LoadState>),
}

struct Inner {
    client: reqwest::Client,
    stylesheet_url: String,
    default_weights: Vec<String>,
    book: FontBook,
    entries: Mutex<HashMap<String, Entry>>,
    events: broadcast::Sender<FontEvent>,
}

#[derive(Clone)]
pub struct FontLoader {
    inner: Arc<Inner>,
}

impl FontLoader {
    pub fn new(client: reqwest::Client, config: &FontsConfig, book: FontBook) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                client,
                stylesheet_url: config.stylesheet_url.clone(),
                default_weights: config.default_weights.clone(),
                book,
                entries: Mutex::new(HashMap::new()),
                events,
            }),
        }
    }

    /// Faces registered by this loader
    pub fn book(&self) -> &FontBook {
        &self.inner.book
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FontEvent> {
        self.inner.events.subscribe()
    }

    pub fn state(&self, family: &str) -> LoadState {
        if directory::is_system_font(family) {
            return LoadState::Loaded;
        }
        match self.inner.lock_entries().get(family) {
            None => LoadState::NotRequested,
            Some(Entry::Loading(_)) => LoadState::Loading,
            Some(Entry::Loaded) => LoadState::Loaded,
            Some(Entry::Failed) => LoadState::Failed,
        }
    }

    pub fn is_loaded(&self, family: &str) -> bool {
        self.state(family) == LoadState::Loaded
    }

    /// Families this loader activated, sorted
    pub fn loaded_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .inner
            .lock_entries()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Loaded))
            .map(|(family, _)| family.clone())
            .collect();
        families.sort();
        families
    }

    /// Start activation without waiting for it. Returns the state right
    /// after the call. Must be called from within a tokio runtime.
    pub fn request(&self, family: &str) -> LoadState {
        match self.begin(family, &[]) {
            Pending::Settled(state) => state,
            Pending::InFlight(_) => LoadState::Loading,
        }
    }

    /// Activate `family` with the default weights and wait for the outcome
    pub async fn ensure_loaded(&self, family: &str) -> LoadState {
        self.ensure_loaded_with(family, &[]).await
    }

    /// Activate `family` requesting the weights named by catalog `variants`
    pub async fn ensure_loaded_with(&self, family: &str, variants: &[String]) -> LoadState {
        let mut rx = match self.begin(family, variants) {
            Pending::Settled(state) => return state,
            Pending::InFlight(rx) => rx,
        };

        let outcome = rx.wait_for(|state| state.is_settled()).await.map(|state| *state);
        match outcome {
            Ok(state) => state,
            Err(_) => {
                tracing::warn!(family, error = %FontError::TaskAborted, "Font activation lost");
                self.inner
                    .lock_entries()
                    .insert(family.to_string(), Entry::Failed);
                LoadState::Failed
            }
        }
    }

    fn begin(&self, family: &str, variants: &[String]) -> Pending {
        if directory::is_system_font(family) {
            tracing::trace!(family, "System font, nothing to activate");
            return Pending::Settled(LoadState::Loaded);
        }

        let mut entries = self.inner.lock_entries();
        match entries.get(family) {
            Some(Entry::Loaded) => return Pending::Settled(LoadState::Loaded),
            Some(Entry::Loading(rx)) => return Pending::InFlight(rx.clone()),
            Some(Entry::Failed) | None => {}
        }

        let (tx, rx) = watch::channel(LoadState::Loading);
        entries.insert(family.to_string(), Entry::Loading(rx.clone()));
        drop(entries);

        let weights = stylesheet::weights_from_variants(variants, &self.inner.default_weights);
        tracing::debug!(family, ?weights, "Activating font");

        let inner = self.inner.clone();
        let family = family.to_string();
        tokio::spawn(async move { inner.activate(family, weights, tx).await });

        Pending::InFlight(rx)
    }
}

impl Inner {
    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn activate(
        self: Arc<Self>,
        family: String,
        weights: Vec<String>,
        tx: watch::Sender<LoadState>,
    ) {
        let state = match self.fetch_and_register(&family, &weights).await {
            Ok(faces) => {
                tracing::info!(family = %family, faces, "Font activated");
                LoadState::Loaded
            }
            Err(e) => {
                tracing::warn!(family = %family, error = %e, "Font activation failed");
                LoadState::Failed
            }
        };

        let entry = match state {
            LoadState::Loaded => Entry::Loaded,
            _ => Entry::Failed,
        };
        self.lock_entries().insert(family.clone(), entry);
        tx.send_replace(state);
        // Nobody listening is fine
        let _ = self.events.send(FontEvent { family, state });
    }

    async fn fetch_and_register(&self, family: &str, weights: &[String]) -> Result<usize, FontError> {
        let url = stylesheet::stylesheet_url(&self.stylesheet_url, family, weights);
        let css = super::send_checked(self.client.get(&url), &url)
            .await?
            .text()
            .await?;

        let sources = stylesheet::font_sources(&css);
        if sources.is_empty() {
            return Err(FontError::EmptyStylesheet(family.to_string()));
        }

        let base = reqwest::Url::parse(&url).map_err(|e| FontError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let mut faces = 0;
        for source in &sources {
            let source_url = base.join(source).map_err(|e| FontError::InvalidUrl {
                url: source.clone(),
                reason: e.to_string(),
            })?;
            let data = super::send_checked(self.client.get(source_url.clone()), source_url.as_str())
                .await?
                .bytes()
                .await?;
            let added = self.book.register(data.to_vec());
            tracing::debug!(family, url = %source_url, added, "Registered font source");
            faces += added;
        }

        if faces == 0 {
            return Err(FontError::NoFaces(family.to_string()));
        }
        Ok(faces)
    }
}
