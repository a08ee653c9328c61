//! Rasterizer trait for turning SVG documents into PNG files.
//!
//! The pipeline never rasterizes by itself. It hands a rendered SVG document
//! to a `Rasterizer`, which is expected to write a PNG of the requested width
//! to the requested path.

use std::collections::HashSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Error type for rasterization.
#[derive(Error, Debug, Clone)]
pub enum RasterError {
    #[error("cannot start `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("`{program}` exited with {status}: {stderr}")]
    Exited {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RasterError {
    fn from(err: std::io::Error) -> Self {
        RasterError::Io(err.to_string())
    }
}

/// One SVG document to rasterize at one width.
#[derive(Debug, Clone)]
pub struct RasterRequest {
    /// Complete SVG document text.
    pub svg: String,
    /// Target width in pixels. The height follows the document's aspect ratio.
    pub width: u32,
    /// Where the PNG must be written.
    pub output: PathBuf,
}

/// A converter from SVG text to PNG files.
///
/// Calls are blocking; the pipeline runs them on the blocking thread pool and
/// may issue several at once, so implementations must be `Send + Sync`.
///
/// # Implementations
///
/// - `RsvgConvertRasterizer` (in `iconfont-raster`): pipes the document into
///   the `rsvg-convert` binary.
/// - [`RecordingRasterizer`]: records requests in memory, for tests.
pub trait Rasterizer: Send + Sync + Debug {
    /// Verifies that the rasterizer can be started at all.
    ///
    /// Called once before any output is written.
    fn check(&self) -> Result<(), RasterError>;

    /// Rasterizes one document.
    fn rasterize(&self, request: &RasterRequest) -> Result<(), RasterError>;

    /// Returns a human-readable name for this rasterizer (for logging and
    /// diagnostics).
    fn name(&self) -> &str;
}

/// A request seen by [`RecordingRasterizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRaster {
    pub width: u32,
    pub output: PathBuf,
}

/// A rasterizer that writes the SVG text itself to the output path.
///
/// Every request is recorded. Requests whose output file stem was registered
/// with [`RecordingRasterizer::failing_for`] fail with
/// [`RasterError::Exited`], which makes it easy to simulate one broken icon.
#[derive(Debug)]
pub struct RecordingRasterizer {
    available: bool,
    failing: HashSet<String>,
    requests: Mutex<Vec<RecordedRaster>>,
}

impl Default for RecordingRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRasterizer {
    pub fn new() -> Self {
        Self {
            available: true,
            failing: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A rasterizer whose [`Rasterizer::check`] always fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Makes every request for the given icon name fail.
    pub fn failing_for(mut self, icon: impl Into<String>) -> Self {
        self.failing.insert(icon.into());
        self
    }

    /// Snapshot of the requests seen so far.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn requests(&self) -> Vec<RecordedRaster> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: &RasterRequest) -> Result<(), RasterError> {
        let mut requests = self
            .requests
            .lock()
            .map_err(|_| RasterError::Io("request log lock poisoned".to_string()))?;
        requests.push(RecordedRaster {
            width: request.width,
            output: request.output.clone(),
        });
        Ok(())
    }

    fn is_failing(&self, output: &Path) -> bool {
        output
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| self.failing.contains(stem))
    }
}

impl Rasterizer for RecordingRasterizer {
    fn check(&self) -> Result<(), RasterError> {
        if self.available {
            Ok(())
        } else {
            Err(RasterError::Spawn {
                program: self.name().to_string(),
                message: "rasterizer marked unavailable".to_string(),
            })
        }
    }

    fn rasterize(&self, request: &RasterRequest) -> Result<(), RasterError> {
        self.record(request)?;
        if self.is_failing(&request.output) {
            return Err(RasterError::Exited {
                program: self.name().to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("simulated failure for {}", request.output.display()),
            });
        }
        std::fs::write(&request.output, request.svg.as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
