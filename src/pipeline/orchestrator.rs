// src/pipeline/orchestrator.rs
use super::context::PipelineContext;
use super::converter::convert_icon;
use super::sprite::{FragmentSender, SpriteSheetSink};
use crate::error::PipelineError;
use iconfont_core::{GlyphCatalog, IconEntry};
use log::{debug, error, info, warn};
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Builder;
use tokio::task;

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Icons converted.
    pub icons: usize,
    /// Fragments written to the sprite sheet, if one was requested.
    pub sprites: Option<usize>,
}

/// The main export pipeline.
/// It checks the rasterizer, prepares the output tree, and converts every
/// catalogued icon with a bounded number of icons in flight.
#[derive(Debug)]
pub struct ExportPipeline {
    context: Arc<PipelineContext>,
}

impl ExportPipeline {
    pub(crate) fn new(context: Arc<PipelineContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Runs the whole export.
    ///
    /// Fails before touching the filesystem if the rasterizer cannot be
    /// started. A failing icon does not stop the others; once every icon has
    /// been attempted the run fails with [`PipelineError::Aggregate`].
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let start = Instant::now();
        self.check_rasterizer().await?;

        let options = &self.context.options;
        self.prepare_output_dirs()?;
        let sprite_sheet = if options.sprites {
            info!("Writing sprite sheet to {}", options.sprite_path.display());
            Some(SpriteSheetSink::create(&options.sprite_path)?)
        } else {
            None
        };

        let fragments = sprite_sheet.as_ref().map(|s| s.sender().clone());
        let converted = match GlyphCatalog::load(&options.icons_path, &options.font_path) {
            Ok(catalog) => self.convert_all(catalog.into_entries(), fragments).await,
            Err(e) => {
                drop(fragments);
                Err(e.into())
            }
        };

        // The sheet is closed whether or not the icons succeeded.
        let sprites = match sprite_sheet {
            Some(sheet) => Some(sheet.finish().await),
            None => None,
        };

        let icons = converted?;
        let sprites = sprites.transpose()?;
        info!("Exported {} icons in {:.2?}.", icons, start.elapsed());
        Ok(RunSummary { icons, sprites })
    }

    /// A convenience method that creates a Tokio runtime and runs the pipeline.
    pub fn run_blocking(&self) -> Result<RunSummary, PipelineError> {
        let rt = Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(self.run())
    }

    async fn check_rasterizer(&self) -> Result<(), PipelineError> {
        let rasterizer = Arc::clone(&self.context.rasterizer);
        let program = rasterizer.name().to_string();
        task::spawn_blocking(move || rasterizer.check())
            .await?
            .map_err(|source| PipelineError::Precondition { program, source })?;
        debug!("Rasterizer `{}` is available.", self.context.rasterizer.name());
        Ok(())
    }

    fn prepare_output_dirs(&self) -> Result<(), PipelineError> {
        let options = &self.context.options;
        if let Some(svg_dir) = options.svg_dir() {
            fs::create_dir_all(svg_dir)?;
        }
        for &size in &options.sizes {
            if let Some(png_dir) = options.png_dir(size) {
                fs::create_dir_all(png_dir)?;
            }
        }
        Ok(())
    }

    /// Producer → icon workers → aggregator.
    async fn convert_all(
        &self,
        entries: Vec<IconEntry>,
        fragments: Option<FragmentSender>,
    ) -> Result<usize, PipelineError> {
        let total = entries.len();
        let worker_count = self.context.options.concurrency.min(total.max(1));
        info!(
            "Converting {} icons with {} workers.",
            total, worker_count
        );

        let (work_tx, work_rx) = async_channel::bounded::<Arc<IconEntry>>(worker_count);
        let (result_tx, result_rx) =
            async_channel::unbounded::<(String, Result<(), PipelineError>)>();

        // --- STAGE 1: Producer ---
        let producer_handle = task::spawn(async move {
            for entry in entries {
                if work_tx.send(Arc::new(entry)).await.is_err() {
                    warn!("[PRODUCER] Work channel closed, stopping producer.");
                    break;
                }
            }
            debug!("[PRODUCER] All icons queued.");
        });

        // --- STAGE 2: Icon workers ---
        let mut worker_handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let rx = work_rx.clone();
            let tx = result_tx.clone();
            let context = Arc::clone(&self.context);
            let fragments = fragments.clone();
            worker_handles.push(task::spawn(async move {
                debug!("[WORKER-{}] Started.", worker_id);
                while let Ok(entry) = rx.recv().await {
                    let name = entry.name().to_string();
                    let result = convert_icon(Arc::clone(&context), entry, fragments.clone()).await;
                    if tx.send((name, result)).await.is_err() {
                        warn!("[WORKER-{}] Result channel closed.", worker_id);
                        break;
                    }
                }
                debug!("[WORKER-{}] Shutting down.", worker_id);
            }));
        }
        drop(result_tx);
        drop(work_rx);
        drop(fragments);

        // --- STAGE 3: Aggregation ---
        let mut converted = 0usize;
        let mut failed = 0usize;
        let mut first_error = None;
        while let Ok((name, result)) = result_rx.recv().await {
            match result {
                Ok(()) => converted += 1,
                Err(e) => {
                    error!("Icon '{}' failed: {}", name, e);
                    failed += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        producer_handle.await?;
        for handle in worker_handles {
            handle.await?;
        }

        match first_error {
            Some(first) => Err(PipelineError::Aggregate {
                failed,
                total,
                first: Box::new(first),
            }),
            None => Ok(converted),
        }
    }
}
