use crate::error::PipelineError;
use iconfont_raster::DEFAULT_PROGRAM;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Raster sizes generated when none are requested.
pub const DEFAULT_SIZES: [u32; 8] = [16, 22, 24, 32, 48, 64, 128, 256];

/// Icons converted at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Fill color used when no color output is configured.
pub const DEFAULT_FILL: &str = "black";

/// Environment variable that enables writing the intermediate SVG next to
/// every PNG.
pub const INTERMEDIATE_SVG_ENV: &str = "INTERMEDIATE_SVG";

/// Everything a run needs to know.
///
/// Field names in JSON configuration files match the command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// Output subdirectory and fill color. Enables SVG and PNG output.
    pub color: Option<String>,
    /// Enables the sprite sheet.
    pub sprites: bool,
    pub sizes: Vec<u32>,
    /// Disables pixel-perfect padding.
    pub nopadding: bool,
    /// Output root.
    pub path: PathBuf,
    #[serde(rename = "icons")]
    pub icons_path: PathBuf,
    #[serde(rename = "font")]
    pub font_path: PathBuf,
    #[serde(rename = "sprite-file")]
    pub sprite_path: PathBuf,
    #[serde(rename = "jobs")]
    pub concurrency: usize,
    /// Rasterizer binary.
    pub rasterizer: String,
    #[serde(skip)]
    pub intermediate_svg: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: None,
            sprites: false,
            sizes: DEFAULT_SIZES.to_vec(),
            nopadding: false,
            path: PathBuf::from("."),
            icons_path: PathBuf::from("Font-Awesome/src/icons.yml"),
            font_path: PathBuf::from("Font-Awesome/fonts/fontawesome-webfont.svg"),
            sprite_path: PathBuf::from("sprites.svg"),
            concurrency: DEFAULT_CONCURRENCY,
            rasterizer: DEFAULT_PROGRAM.to_string(),
            intermediate_svg: false,
        }
    }
}

impl RenderOptions {
    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read configuration from '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&source)?)
    }

    /// Reads the intermediate-SVG toggle from the environment. Any non-empty
    /// value turns it on.
    pub fn with_env_overrides(mut self) -> Self {
        self.intermediate_svg = env::var_os(INTERMEDIATE_SVG_ENV).is_some_and(|v| !v.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.color.is_none() && !self.sprites {
            return Err(PipelineError::Config(
                "Nothing to do: set a color, enable sprites, or both.".to_string(),
            ));
        }
        if let Some(color) = &self.color
            && (color.is_empty() || Path::new(color).components().count() != 1)
        {
            return Err(PipelineError::Config(format!(
                "Color '{}' must be a single directory name.",
                color
            )));
        }
        if self.color.is_some() && self.sizes.is_empty() {
            return Err(PipelineError::Config(
                "At least one size is required for PNG output.".to_string(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(PipelineError::Config("Sizes must be positive.".to_string()));
        }
        if self.concurrency == 0 {
            return Err(PipelineError::Config(
                "Concurrency must be at least 1.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fill_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_FILL)
    }

    /// `{path}/{color}`, when color output is enabled.
    pub fn color_root(&self) -> Option<PathBuf> {
        self.color.as_ref().map(|c| self.path.join(c))
    }

    pub fn svg_dir(&self) -> Option<PathBuf> {
        self.color_root().map(|root| root.join("svg"))
    }

    pub fn png_dir(&self, size: u32) -> Option<PathBuf> {
        self.color_root()
            .map(|root| root.join("png").join(size.to_string()))
    }
}
