// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/loader.rs
//
// Asynchronous image decoding with stale-result rejection.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tokio::sync::mpsc;

use super::document::{DocResult, SourceImage, open_source_image};

/// A finished decode.
#[derive(Debug)]
pub struct LoadedImage {
    /// Generation of the `load` call that produced this result.
    pub generation: u64,
    pub path: PathBuf,
    pub result: DocResult<SourceImage>,
}

/// Decodes files off the host thread and hands results back in order of
/// completion. Only the result of the most recent `load` is ever delivered:
/// picking a new file supersedes every decode still in flight.
pub struct ImageLoader {
    generation: u64,
    tx: mpsc::UnboundedSender<LoadedImage>,
    rx: mpsc::UnboundedReceiver<LoadedImage>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            generation: 0,
            tx,
            rx,
        }
    }

    /// Start decoding `path` on the blocking pool. Must be called from within
    /// a tokio runtime. Returns the generation of this request.
    pub fn load(&mut self, path: PathBuf) -> u64 {
        self.load_with(path, open_source_image)
    }

    /// Like [`ImageLoader::load`] with a custom decoder. A decoder that
    /// panics is reported as a failed load.
    pub(crate) fn load_with<F>(&mut self, path: PathBuf, decode: F) -> u64
    where
        F: FnOnce(&Path) -> DocResult<SourceImage> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        log::debug!("Loading {} (generation {generation})", path.display());
        let decode_path = path.clone();
        let task = tokio::task::spawn_blocking(move || decode(&decode_path));

        tokio::spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(anyhow!("Decoder for {} crashed: {e}", path.display())),
            };
            let loaded = LoadedImage {
                generation,
                path,
                result,
            };
            if tx.send(loaded).is_err() {
                log::debug!("Loader dropped before generation {generation} finished");
            }
        });

        generation
    }

    /// Generation of the most recent request.
    pub fn latest(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, loaded: &LoadedImage) -> bool {
        loaded.generation == self.generation
    }

    /// Wait for the result of the most recent request, discarding stale ones.
    pub async fn next(&mut self) -> Option<LoadedImage> {
        loop {
            let loaded = self.rx.recv().await?;
            if self.is_current(&loaded) {
                return Some(loaded);
            }
            log::debug!(
                "Dropping stale load of {} (generation {} < {})",
                loaded.path.display(),
                loaded.generation,
                self.generation
            );
        }
    }

    /// Non-blocking variant of [`ImageLoader::next`].
    pub fn try_next(&mut self) -> Option<LoadedImage> {
        while let Ok(loaded) = self.rx.try_recv() {
            if self.is_current(&loaded) {
                return Some(loaded);
            }
        }
        None
    }
}
