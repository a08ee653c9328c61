// src/pipeline/sprite.rs
//! The sprite sheet consumer.
//!
//! Icon workers send finished fragments over a channel; a single blocking
//! consumer owns the file and writes one line per fragment, so concurrent
//! icons never interleave partial lines.

use crate::error::PipelineError;
use iconfont_core::SpriteSheetWriter;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tokio::task::{self, JoinHandle};

pub(crate) type FragmentSender = async_channel::Sender<String>;

/// Handle to a running sprite sheet consumer.
pub(crate) struct SpriteSheetSink {
    sender: FragmentSender,
    handle: JoinHandle<Result<usize, PipelineError>>,
}

impl SpriteSheetSink {
    /// Creates the sprite file, writes the header and starts the consumer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn create(path: &Path) -> Result<Self, PipelineError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = BufWriter::new(File::create(path)?);
        Ok(Self::start(SpriteSheetWriter::begin(file)?))
    }

    fn start<W: Write + Send + 'static>(mut sheet: SpriteSheetWriter<W>) -> Self {
        let (sender, receiver) = async_channel::unbounded::<String>();
        let handle = task::spawn_blocking(move || {
            info!("[CONSUMER] Sprite sheet started. Awaiting fragments.");
            while let Ok(fragment) = receiver.recv_blocking() {
                sheet.append(&fragment)?;
            }
            let lines = sheet.lines();
            sheet.finish()?;
            info!("[CONSUMER] Sprite sheet closed with {} icons.", lines);
            Ok(lines)
        });
        Self { sender, handle }
    }

    pub fn sender(&self) -> &FragmentSender {
        &self.sender
    }

    /// Closes the channel and waits for the footer to be written.
    ///
    /// Every clone of the sender must be dropped first, or this never returns.
    pub async fn finish(self) -> Result<usize, PipelineError> {
        drop(self.sender);
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!("[CONSUMER] Sprite sheet task failed: {}", e);
                Err(e.into())
            }
        }
    }
}
