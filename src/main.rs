use clap::{CommandFactory, Parser};
use iconfont_export::{PipelineBuilder, RenderOptions};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exports Font Awesome glyphs as SVG files, PNG files and an SVG sprite sheet.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Fill color; also the name of the output directory for SVGs and PNGs
    #[arg(long)]
    color: Option<String>,

    /// Write the SVG sprite sheet
    #[arg(long, default_value_t = false)]
    sprites: bool,

    /// Comma-separated PNG sizes in pixels
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,

    /// Disable pixel-perfect padding of small PNGs
    #[arg(long, default_value_t = false)]
    nopadding: bool,

    /// Output root directory
    #[arg(long)]
    path: Option<PathBuf>,

    /// YAML icon name table
    #[arg(long)]
    icons: Option<PathBuf>,

    /// SVG font with the glyph outlines
    #[arg(long)]
    font: Option<PathBuf>,

    /// Sprite sheet output file
    #[arg(long)]
    sprite_file: Option<PathBuf>,

    /// Number of icons converted at the same time
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Rasterizer program
    #[arg(long)]
    rasterizer: Option<String>,

    /// JSON file with default options; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_options(self, mut options: RenderOptions) -> RenderOptions {
        if self.color.is_some() {
            options.color = self.color;
        }
        options.sprites |= self.sprites;
        options.nopadding |= self.nopadding;
        if let Some(sizes) = self.sizes {
            options.sizes = sizes;
        }
        if let Some(path) = self.path {
            options.path = path;
        }
        if let Some(icons) = self.icons {
            options.icons_path = icons;
        }
        if let Some(font) = self.font {
            options.font_path = font;
        }
        if let Some(sprite_file) = self.sprite_file {
            options.sprite_path = sprite_file;
        }
        if let Some(jobs) = self.jobs {
            options.concurrency = jobs;
        }
        if let Some(rasterizer) = self.rasterizer {
            options.rasterizer = rasterizer;
        }
        options
    }
}

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "iconfont_export=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let defaults = match &args.config {
        Some(path) => match RenderOptions::from_json_file(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RenderOptions::default(),
    };
    let options = args.into_options(defaults).with_env_overrides();

    if options.color.is_none() && !options.sprites {
        // Nothing to do; show what can be done instead.
        if let Err(e) = Args::command().print_help() {
            log::error!("Failed to print usage: {}", e);
        }
        return ExitCode::FAILURE;
    }

    let result = PipelineBuilder::new()
        .with_options(options)
        .build()
        .and_then(|pipeline| pipeline.run_blocking());

    match result {
        Ok(summary) => {
            match summary.sprites {
                Some(sprites) => println!("Exported {} icons ({} sprites).", summary.icons, sprites),
                None => println!("Exported {} icons.", summary.icons),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
