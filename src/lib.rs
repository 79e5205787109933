mod cache;
mod config;
mod controller;
mod error;
mod geometry;
mod metrics;
mod page;
mod paragraph;
mod renderer;
mod resolver;
mod style;
mod viewer;

pub use cache::{CachedShifts, PageBinding, ShiftCache, apply_shifts};
pub use config::{DEFAULT_FONT_FAMILY, FONT_ENV_VAR, OverlayConfig};
pub use controller::{ApplyStats, LifecycleEvent, OverlayController, OverlayState};
pub use error::Error;
pub use geometry::Rect;
pub use metrics::FontMetrics;
pub use page::{Canvas, FontTraits, Fragment, Page, TextLayer};
pub use paragraph::{PARAGRAPH_GAP, Paragraph, group_paragraphs};
pub use renderer::Renderer;
pub use resolver::{SAFETY_MARGIN, Shift, ShiftSet, resolve_overlaps};
pub use style::{
    Color, Display, FragmentStyle, Overflow, PageStyle, Position, Slant, TextLayerStyle,
    ViewerStyle, Visibility, Weight,
};
pub use viewer::Viewer;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// How to run the overlay over a page dump.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Leave the overlay disabled (restores a previously styled dump).
    pub disable: bool,
    /// Zoom to this scale after the first pass.
    pub scale: Option<f32>,
    /// Substitute font file to measure with; built-in approximation otherwise.
    pub font: Option<PathBuf>,
    pub config: OverlayConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageReport {
    pub number: u32,
    /// Horizontal shift per paragraph; empty when nothing was resolved.
    pub shifts: Vec<f32>,
}

fn load_metrics(font: Option<&Path>) -> FontMetrics {
    match font {
        Some(path) => FontMetrics::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using approximate metrics");
            FontMetrics::approximate()
        }),
        None => FontMetrics::approximate(),
    }
}

/// Run the overlay over a JSON page dump in memory, returning the styled dump.
pub fn process_viewer(viewer: Viewer, options: &RunOptions) -> (Viewer, Vec<PageReport>) {
    let mut viewer = viewer.with_metrics(load_metrics(options.font.as_deref()));
    let mut controller = OverlayController::new(options.config.clone());

    controller.init(&mut viewer);
    controller.set_enabled(!options.disable, &mut viewer);
    for page in viewer.visible_pages() {
        controller.handle(LifecycleEvent::TextLayerRendered { page }, &mut viewer);
    }
    controller.on_frame(&mut viewer);

    if let Some(scale) = options.scale {
        viewer.set_scale(scale);
        controller.handle(LifecycleEvent::ScaleChanging, &mut viewer);
    }

    let reports = viewer
        .pages
        .iter()
        .map(|p| PageReport {
            number: p.number,
            shifts: controller
                .cache()
                .get(p.number)
                .map(|set| set.iter().map(|s| s.dx).collect())
                .unwrap_or_default(),
        })
        .collect();

    let stats = controller.stats();
    log::info!(
        "Overlay {:?}: {} resolver runs, {} cache replays, {} superseded",
        controller.state(),
        stats.resolver_runs,
        stats.cache_replays,
        stats.superseded,
    );

    (viewer, reports)
}

pub fn process_dump(
    input: &Path,
    output: &Path,
    options: &RunOptions,
) -> Result<Vec<PageReport>, Error> {
    let t0 = Instant::now();

    let json = std::fs::read_to_string(input).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, input.display()),
        ))
    })?;
    let viewer = Viewer::from_json(&json)?;
    let t_parse = t0.elapsed();

    let (viewer, reports) = process_viewer(viewer, options);
    let t_apply = t0.elapsed();

    let out = viewer.to_json()?;
    std::fs::write(output, &out).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, apply={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages)",
        t_parse.as_secs_f64() * 1000.0,
        (t_apply - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_apply).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        reports.len(),
    );

    Ok(reports)
}
