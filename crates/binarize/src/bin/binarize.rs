use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use binarize::convert::{self, ImageOutput};
use binarize::core::OtsuVariant;
use binarize::{compose_mosaic, BinarizeConfig};
use clap::Parser;
use log::{info, LevelFilter};

/// Binarize an image with Otsu's global threshold.
///
/// Writes a mosaic with the intensity image next to the binary image and
/// prints the chosen threshold.
#[derive(Parser, Debug)]
#[command(name = "binarize", version, about)]
struct Cli {
    /// Input image (any format the `image` crate decodes).
    input: PathBuf,

    /// Mosaic output path; the format follows the extension.
    #[arg(short, long, default_value = "ResultingImage.png")]
    output: PathBuf,

    /// Also write the intensity image here.
    #[arg(long)]
    gray: Option<PathBuf>,

    /// Also write the binary image here.
    #[arg(long)]
    binary: Option<PathBuf>,

    /// JSON config file (see `BinarizeConfig`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON report of the run here.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Override the mosaic column limit.
    #[arg(long)]
    max_columns: Option<usize>,

    /// Use the full-range Otsu scan instead of the classic one.
    #[arg(long)]
    full_range: bool,

    /// Override the threshold used when no split is found.
    #[arg(long)]
    fallback: Option<u8>,

    /// Log level (off, error, warn, info, debug, trace). Defaults to
    /// $BINARIZE_LOG, then `warn` (`info` in tracing builds).
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(s.trim()).map_err(|_| {
        format!("unknown log level `{s}` (expected off, error, warn, info, debug or trace)")
    })
}

impl Cli {
    fn resolve_config(&self) -> Result<BinarizeConfig, binarize::BinarizeError> {
        let mut cfg = match &self.config {
            Some(path) => BinarizeConfig::from_json_file(path)?,
            None => BinarizeConfig::default(),
        };
        if self.full_range {
            cfg.otsu.variant = OtsuVariant::FullRange;
        }
        if let Some(t) = self.fallback {
            cfg.otsu.fallback_threshold = t;
        }
        if let Some(cols) = self.max_columns {
            cfg.mosaic.max_columns = cols;
        }
        Ok(cfg)
    }
}

fn write_report(path: &Path, out: &ImageOutput) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &out.report())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    binarize::core::init_tracing(false, cli.log_level);

    #[cfg(not(feature = "tracing"))]
    binarize::core::init_with_level(
        cli.log_level
            .unwrap_or_else(|| binarize::core::level_from_env(LevelFilter::Warn)),
    )
    .map_err(|e| e.to_string())?;

    let cfg = cli.resolve_config()?;
    info!("config: {cfg:?}");

    let img = convert::load_rgb(&cli.input)?;
    info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        img.width(),
        img.height()
    );

    let out = convert::binarize_rgb(&img, &cfg.otsu)?;

    let mosaic = compose_mosaic(&[out.intensity.clone(), out.binary.clone()], &cfg.mosaic)?;
    mosaic.save(&cli.output)?;
    info!("wrote mosaic {}", cli.output.display());

    if let Some(path) = &cli.gray {
        out.intensity.save(path)?;
    }
    if let Some(path) = &cli.binary {
        out.binary.save(path)?;
    }
    if let Some(path) = &cli.report {
        write_report(path, &out)?;
    }

    if out.threshold.is_fallback() {
        println!("threshold {} (fallback)", out.threshold.threshold);
    } else {
        println!("threshold {}", out.threshold.threshold);
    }
    Ok(())
}
