//! Background content loading
//!
//! Loads an item's file texts and its live preview on worker threads. Results
//! are tagged with the session generation they were requested for and
//! collected on the UI thread by `ContentLoader::poll`.

use crate::component::Renderable;
use crate::components::previews::{
    DashboardPreview, GaugePreview, SparklinePreview, TablePreview, TextPreview,
};
use crate::model::catalog::{CatalogFile, CatalogItem, CodeSource, PreviewSpec};
use crate::model::session::{LoadError, LoadMessage, LoadPayload, ModalHost};
use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Where file texts and previews come from
pub trait ContentSource: Send + Sync {
    fn load_file(&self, file: &CatalogFile) -> Result<String, LoadError>;

    fn load_preview(&self, item: &CatalogItem) -> Result<Box<dyn Renderable>, LoadError>;
}

/// Reads paths from the filesystem and builds previews from their specs
#[derive(Debug, Default, Clone, Copy)]
pub struct FsContentSource;

fn read_to_string(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

impl ContentSource for FsContentSource {
    fn load_file(&self, file: &CatalogFile) -> Result<String, LoadError> {
        match &file.source {
            CodeSource::Path { path } => read_to_string(path),
            CodeSource::Inline { code } => Ok(code.clone()),
        }
    }

    fn load_preview(&self, item: &CatalogItem) -> Result<Box<dyn Renderable>, LoadError> {
        let preview: Box<dyn Renderable> = match &item.preview {
            PreviewSpec::Text { path } => Box::new(TextPreview::new(read_to_string(path)?)),
            PreviewSpec::Inline { text } => Box::new(TextPreview::new(text.as_str())),
            PreviewSpec::Gauge { label, percent } => {
                if *percent > 100 {
                    return Err(LoadError::Invalid(format!(
                        "gauge percent {} is out of range",
                        percent
                    )));
                }
                Box::new(GaugePreview::new(label.as_str(), *percent))
            }
            PreviewSpec::Sparkline { title, data } => {
                Box::new(SparklinePreview::new(title.as_str(), data.clone()))
            }
            PreviewSpec::Table { headers, rows } => {
                Box::new(TablePreview::new(headers.clone(), rows.clone()))
            }
            PreviewSpec::Dashboard { title, metrics } => {
                Box::new(DashboardPreview::new(title.as_str(), metrics.clone()))
            }
        };
        Ok(preview)
    }
}

/// Spawns load work and hands results back to the modal host
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(Arc::new(FsContentSource))
    }
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
        }
    }

    /// Start loading the preview and every file of `item` for `generation`
    pub fn request(&self, generation: u64, item: &CatalogItem) {
        tracing::debug!(
            "Loading {} ({} files, generation {})",
            item.slug,
            item.files.len(),
            generation
        );

        for file in &item.files {
            let source = Arc::clone(&self.source);
            let tx = self.sender.clone();
            let file = file.clone();
            thread::spawn(move || {
                let result = source.load_file(&file);
                let _ = tx.send(LoadMessage {
                    generation,
                    payload: LoadPayload::File {
                        name: file.name,
                        result,
                    },
                });
            });
        }

        let source = Arc::clone(&self.source);
        let tx = self.sender.clone();
        let item = item.clone();
        thread::spawn(move || {
            let result = source.load_preview(&item);
            let _ = tx.send(LoadMessage {
                generation,
                payload: LoadPayload::Preview(result),
            });
        });
    }

    /// Apply every finished load to `host`, returns true if any applied
    pub fn poll(&self, host: &mut ModalHost) -> bool {
        let mut had_updates = false;

        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    had_updates |= host.apply(message);
                }
                Err(TryRecvError::Empty) => break,
                // The loader holds a sender itself, so this cannot happen while it lives
                Err(TryRecvError::Disconnected) => break,
            }
        }

        had_updates
    }
}
