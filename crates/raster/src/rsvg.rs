//! `rsvg-convert`-backed rasterizer.
//!
//! The SVG document is written to the child's stdin and the PNG is written by
//! the child itself, using `-f png -w <width> -o <output>`.

use iconfont_traits::{RasterError, RasterRequest, Rasterizer};
use log::trace;
use std::ffi::OsString;
use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};

/// Binary used when no other program is configured.
pub const DEFAULT_PROGRAM: &str = "rsvg-convert";

/// Longest stderr excerpt kept in [`RasterError::Exited`].
const STDERR_TAIL: usize = 512;

/// A rasterizer that runs one `rsvg-convert` process per request.
#[derive(Debug, Clone)]
pub struct RsvgConvertRasterizer {
    program: String,
}

impl Default for RsvgConvertRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl RsvgConvertRasterizer {
    /// Creates a rasterizer for the given program, resolved through `PATH`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn arguments(request: &RasterRequest) -> Vec<OsString> {
        vec![
            "-f".into(),
            "png".into(),
            "-w".into(),
            request.width.to_string().into(),
            "-o".into(),
            request.output.clone().into_os_string(),
        ]
    }

    fn spawn_error(&self, err: io::Error) -> RasterError {
        RasterError::Spawn {
            program: self.program.clone(),
            message: err.to_string(),
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= STDERR_TAIL {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}

impl Rasterizer for RsvgConvertRasterizer {
    fn check(&self) -> Result<(), RasterError> {
        let mut child = Command::new(&self.program)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        // Only starting matters here; `--help` may exit with any status.
        child.wait()?;
        Ok(())
    }

    fn rasterize(&self, request: &RasterRequest) -> Result<(), RasterError> {
        trace!(
            "Running {} for {} at {}px",
            self.program,
            request.output.display(),
            request.width
        );
        let mut child = Command::new(&self.program)
            .args(Self::arguments(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(request.svg.as_bytes())
            && e.kind() != ErrorKind::BrokenPipe
        {
            // A child that stopped reading reports its own failure below.
            let _ = child.kill();
            let _ = child.wait();
            return Err(e.into());
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RasterError::Exited {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
