//! Owns the in-memory palette and its load lifecycle.
//!
//! Loads run on a worker thread and report back over a channel that the UI
//! thread drains with [`PaletteLoader::poll`]. Only one load is outstanding at
//! a time, and each carries a generation number so a completion from an
//! older load can never overwrite a newer one.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::source::PaletteSource;
use super::{load_palette, Palette};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Last attempt failed; carries the error message for display.
    Failed(String),
}

struct Completion {
    generation: u64,
    outcome: Result<Palette>,
}

pub struct PaletteLoader {
    source: Arc<dyn PaletteSource>,
    palette: Arc<Palette>,
    state: LoadState,
    generation: u64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl PaletteLoader {
    pub fn new(source: Box<dyn PaletteSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::from(source),
            palette: Arc::new(Palette::default()),
            state: LoadState::Idle,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Most recently loaded palette, empty until the first success.
    pub fn palette(&self) -> Arc<Palette> {
        Arc::clone(&self.palette)
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Begin a load. Used for the initial load, retry after failure and
    /// manual refresh. Returns `false` if a load is already in flight or the
    /// worker thread could not be spawned.
    pub fn start(&mut self) -> bool {
        if self.state == LoadState::Loading {
            log::debug!("palette load already in flight; ignoring start");
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        log::info!(
            "loading palette from {} (generation {generation})",
            source.describe()
        );

        let spawned = thread::Builder::new()
            .name("palette-fetch".into())
            .spawn(move || {
                let outcome = load_palette(source.as_ref());
                // The loader may have been dropped while we were fetching.
                let _ = tx.send(Completion {
                    generation,
                    outcome,
                });
            });

        self.record_spawn(spawned.map(drop))
    }

    /// Returns `true` only if the worker is actually running.
    fn record_spawn(&mut self, spawned: io::Result<()>) -> bool {
        match spawned {
            Ok(()) => {
                self.state = LoadState::Loading;
                true
            }
            Err(e) => {
                log::error!("failed to spawn palette fetch thread: {e}");
                self.state = LoadState::Failed(e.to_string());
                false
            }
        }
    }

    /// Apply any finished load without blocking. Returns `true` if the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Block until the in-flight load (if any) finishes.
    pub fn wait(&mut self) {
        while self.state == LoadState::Loading {
            match self.rx.recv() {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(_) => break,
            }
        }
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            log::debug!(
                "discarding stale palette load (generation {}, current {})",
                completion.generation,
                self.generation
            );
            return false;
        }

        match completion.outcome {
            Ok(palette) => {
                log::info!("palette ready with {} entries", palette.len());
                self.palette = Arc::new(palette);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                log::error!("error fetching colors: {e}");
                self.state = LoadState::Failed(e.to_string());
            }
        }
        true
    }
}
