// src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use srw_image_tools::colormap::{ColorLimits, Colormap};
use srw_image_tools::{crate_version, load_settings, PlotSettings};

/// Display a CHX Eiger measurement full size, cropped and as intensity
/// profiles, saving every figure as TIFF and the frame as `<UID>.dat`.
#[derive(Parser, Debug)]
#[command(name = "srw-image-tools")]
#[command(version, about, long_about = None)]
struct Args {
    /// Measurement identifier.
    #[arg(value_name = "UID")]
    uid: String,

    /// Directory holding `<UID>.h5` measurement exports.
    #[arg(long, default_value = ".", value_name = "DIR")]
    data_dir: PathBuf,

    /// Directory the figures and the .dat file are written to.
    #[arg(long, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,

    /// JSON settings file; command-line options override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Detector field to read.
    #[arg(long, value_name = "NAME")]
    detector: Option<String>,

    /// Colormap of the full-size and cropped displays.
    #[arg(long, value_name = "NAME", value_parser = parse_cmap)]
    cmap: Option<Colormap>,

    /// Colour limits of the full-size and cropped displays.
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    clim: Option<Vec<f64>>,

    /// Display the mean over the frames of the first event.
    #[arg(long)]
    mean: bool,

    /// Event whose first frame is displayed.
    #[arg(long, value_name = "INT")]
    frame: Option<usize>,

    /// Draw gridlines on the full-size display.
    #[arg(long)]
    grid: bool,

    /// Output resolution in dots per inch.
    #[arg(long, value_name = "FLOAT")]
    dpi: Option<f64>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();

    if let Err(err) = run(&args) {
        log::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn parse_cmap(name: &str) -> std::result::Result<Colormap, String> {
    name.parse().map_err(|e: srw_image_tools::Error| e.to_string())
}

fn settings_from_args(args: &Args) -> Result<PlotSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => PlotSettings::default(),
    };
    if let Some(detector) = &args.detector {
        settings.detector = detector.clone();
    }
    if let Some(cmap) = args.cmap {
        settings.cmap = cmap;
    }
    if let Some(&[min, max]) = args.clim.as_deref() {
        settings.clim = ColorLimits::new(min, max);
    }
    if let Some(frame) = args.frame {
        settings.frame = frame;
    }
    if let Some(dpi) = args.dpi {
        settings.dpi = dpi;
    }
    settings.mean |= args.mean;
    settings.grid |= args.grid;
    Ok(settings)
}

#[cfg(feature = "hdf5")]
fn run(args: &Args) -> Result<()> {
    use srw_image_tools::{plot_eiger_for_srw, Hdf5Source, LogViewer, RenderContext};

    log::info!("srw-image-tools {}", crate_version());
    let settings = settings_from_args(args)?;
    let source = Hdf5Source::new(&args.data_dir);
    // The entry point applies `settings.dpi` to the context.
    let mut ctx = RenderContext::new(&args.out_dir).with_viewer(LogViewer);

    let events = plot_eiger_for_srw(&source, &mut ctx, &args.uid, &settings)
        .with_context(|| format!("Failed to plot measurement {}", args.uid))?;

    println!(
        "Processed {} ({} events) -> {}",
        args.uid,
        events.len(),
        ctx.output_dir().display()
    );
    Ok(())
}

#[cfg(not(feature = "hdf5"))]
fn run(args: &Args) -> Result<()> {
    log::info!("srw-image-tools {}", crate_version());
    settings_from_args(args)?;
    anyhow::bail!(
        "Reading {} from {} requires the `hdf5` feature",
        args.uid,
        args.data_dir.display()
    )
}

// src/main.rs
