pub mod fixtures;

use iconfont_export::PipelineBuilder;
use iconfont_export::traits::{Rasterizer, RecordingRasterizer};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A scratch workspace holding the fixture resources and an output root.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("icons.yml"), fixtures::NAME_TABLE)?;
        fs::write(dir.path().join("font.svg"), fixtures::GLYPH_TABLE)?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn out(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn sprite_file(&self) -> PathBuf {
        self.out().join("sprites.svg")
    }

    /// A builder wired to the fixtures, the output root and `rasterizer`.
    pub fn builder(&self, rasterizer: Arc<dyn Rasterizer>) -> PipelineBuilder {
        PipelineBuilder::new()
            .with_name_table(self.root().join("icons.yml"))
            .with_glyph_table(self.root().join("font.svg"))
            .with_output_path(self.out())
            .with_sprite_file(self.sprite_file())
            .with_concurrency(2)
            .with_rasterizer(rasterizer)
    }
}

pub fn recording() -> Arc<RecordingRasterizer> {
    Arc::new(RecordingRasterizer::new())
}

/// Every file below `dir`, relative to it, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(base, &path, out);
            } else if let Ok(rel) = path.strip_prefix(base) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}
