use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dyslexic_overlay::{FONT_ENV_VAR, OverlayConfig, RunOptions};

/// Apply the dyslexia-friendly font overlay to a page dump and fix paragraph overlaps.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON page dump produced by the viewer
    input: PathBuf,

    /// Where to write the styled dump (defaults to <input>.overlay.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Substitute font file used to re-measure text (falls back to $DYSLEXIC_OVERLAY_FONT)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Run with the overlay disabled, clearing any overlay styling in the dump
    #[arg(long)]
    off: bool,

    /// Zoom to this scale after the first pass
    #[arg(long, value_parser = parse_scale)]
    scale: Option<f32>,

    /// Replay cached shifts after zooming instead of recomputing them
    #[arg(long)]
    reuse_across_zoom: bool,

    /// Vertical gap between fragment tops that starts a new paragraph
    #[arg(long)]
    gap: Option<f32>,

    /// Clearance added past the preceding paragraph when shifting
    #[arg(long)]
    margin: Option<f32>,

    /// Canvas opacity while the overlay is on
    #[arg(long)]
    opacity: Option<f32>,
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let scale: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if scale > 0.0 && scale.is_finite() {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got {s}"))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = OverlayConfig {
        reuse_shifts_across_zoom: args.reuse_across_zoom,
        ..OverlayConfig::default()
    };
    if let Some(gap) = args.gap {
        config.paragraph_gap = gap;
    }
    if let Some(margin) = args.margin {
        config.safety_margin = margin;
    }
    if let Some(opacity) = args.opacity {
        config.canvas_opacity = opacity.clamp(0.0, 1.0);
    }

    let font = args
        .font
        .or_else(|| std::env::var_os(FONT_ENV_VAR).map(PathBuf::from));
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("overlay.json"));

    let options = RunOptions {
        disable: args.off,
        scale: args.scale,
        font,
        config,
    };

    match dyslexic_overlay::process_dump(&args.input, &output, &options) {
        Ok(reports) => {
            for report in &reports {
                let moved = report.shifts.iter().filter(|&&dx| dx > 0.0).count();
                println!(
                    "page {:>4}: {:>3} paragraphs, {:>3} shifted {:?}",
                    report.number,
                    report.shifts.len(),
                    moved,
                    report.shifts
                );
            }
            println!("Wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
