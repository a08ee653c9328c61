// src/pipeline/converter.rs
//! Conversion of a single icon into all requested outputs.

use crate::error::PipelineError;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::sprite::FragmentSender;
use iconfont_core::{CoreError, IconEntry, Padding, count_paths, optimize, sprite_fragment};
use iconfont_traits::RasterRequest;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tokio::task::JoinSet;

/// Produces every output for one icon:
///
/// 1. one PNG per requested size, rasterized concurrently (color output),
/// 2. the optimized full-bleed SVG (color output),
/// 3. one sprite sheet fragment (sprite output).
///
/// Returns only after every rasterization it started has finished, even when
/// something failed on the way. The first failure is returned; later ones are
/// logged.
pub(crate) async fn convert_icon(
    context: Arc<PipelineContext>,
    entry: Arc<IconEntry>,
    sprites: Option<FragmentSender>,
) -> Result<(), PipelineError> {
    let start = Instant::now();
    info!("Generating icon {}", entry.name());

    let mut rasterizations: JoinSet<Result<(), PipelineError>> = JoinSet::new();
    let queued = queue_rasterizations(&context, &entry, &mut rasterizations).await;
    let vectors = match queued {
        Ok(()) => write_vector_outputs(&context, &entry, sprites.as_ref()).await,
        Err(e) => Err(e),
    };

    let mut first_error = vectors.err();
    while let Some(joined) = rasterizations.join_next().await {
        let result = joined.map_err(PipelineError::from).and_then(|r| r);
        if let Err(e) = result {
            if first_error.is_none() {
                first_error = Some(e);
            } else {
                warn!("Additional failure for icon {}: {}", entry.name(), e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            debug!("Icon {} finished in {:.2?}.", entry.name(), start.elapsed());
            Ok(())
        }
    }
}

/// Starts one blocking rasterization per size. Does nothing without a color.
async fn queue_rasterizations(
    context: &Arc<PipelineContext>,
    entry: &IconEntry,
    tasks: &mut JoinSet<Result<(), PipelineError>>,
) -> Result<(), PipelineError> {
    let options = &context.options;
    for &size in &options.sizes {
        let Some(dir) = options.png_dir(size) else {
            return Ok(());
        };
        let svg = context.render(entry, context.padding_for(size))?;

        if options.intermediate_svg {
            let intermediate = dir.join(format!("{}.svg", entry.name()));
            debug!("Intermediate SVG for {} at {}px:\n{}", entry.name(), size, svg);
            fs::write(&intermediate, &svg).await?;
        }

        let request = RasterRequest {
            svg,
            width: size,
            output: dir.join(format!("{}.png", entry.name())),
        };
        let rasterizer = Arc::clone(&context.rasterizer);
        let icon = entry.name().to_string();
        tasks.spawn_blocking(move || {
            rasterizer
                .rasterize(&request)
                .map_err(|source| PipelineError::Conversion { icon, source })
        });
    }
    Ok(())
}

/// Writes the standalone SVG and sends the sprite fragment, whichever are
/// enabled. Both come from the same zero-padding render.
async fn write_vector_outputs(
    context: &PipelineContext,
    entry: &IconEntry,
    sprites: Option<&FragmentSender>,
) -> Result<(), PipelineError> {
    let svg_dir = context.options.svg_dir();
    if svg_dir.is_none() && sprites.is_none() {
        return Ok(());
    }

    let optimized = optimize(&context.render(entry, Padding::ZERO)?)?;
    if count_paths(&optimized) == 0 {
        return Err(CoreError::Optimize(format!("no outline left for '{}'", entry.name())).into());
    }

    if let Some(dir) = svg_dir {
        fs::write(dir.join(format!("{}.svg", entry.name())), &optimized).await?;
    }
    if let Some(sender) = sprites {
        let fragment = sprite_fragment(entry.name(), &optimized)?;
        sender
            .send(fragment)
            .await
            .map_err(|_| PipelineError::Task("sprite sheet consumer has stopped".to_string()))?;
    }
    Ok(())
}
