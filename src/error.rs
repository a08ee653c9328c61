// src/error.rs
use iconfont_core::CoreError;
use iconfont_traits::RasterError;
use thiserror::Error;

/// A comprehensive error type for the entire export pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Cannot start the `{program}` rasterizer ({source}). Please install it or verify that it is in your PATH."
    )]
    Precondition {
        program: String,
        #[source]
        source: RasterError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Rasterizing icon '{icon}' failed: {source}")]
    Conversion {
        icon: String,
        #[source]
        source: RasterError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipeline task failed: {0}")]
    Task(String),

    #[error("{failed} of {total} icons failed; first error: {first}")]
    Aggregate {
        failed: usize,
        total: usize,
        first: Box<PipelineError>,
    },
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        PipelineError::Task(e.to_string())
    }
}
