#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dyslexic_overlay::{Fragment, OverlayConfig, Page, Rect, TextLayer, Viewer};

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new("tests/fixtures").join(name)
}

pub fn load_viewer(name: &str) -> Viewer {
    let json = std::fs::read_to_string(fixture_path(name)).expect("read fixture");
    Viewer::from_json(&json).expect("parse fixture")
}

/// Output directory for a test: tests/output/<test>/
pub fn output_dir(test: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(test);
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Config whose paragraph gap splits fragments whose tops are 15 units apart.
pub fn tight_gap() -> OverlayConfig {
    OverlayConfig {
        paragraph_gap: 10.0,
        ..OverlayConfig::default()
    }
}

/// One page, one single-fragment paragraph per box.
pub fn page_with_boxes(number: u32, boxes: &[Rect]) -> Page {
    let fragments = boxes
        .iter()
        .enumerate()
        .map(|(i, b)| Fragment::new(format!("f{i}"), *b))
        .collect();
    Page::new(number, Some(TextLayer::new(fragments)), 1)
}

pub fn translations(viewer: &Viewer, page: u32) -> Vec<Option<f32>> {
    viewer
        .page(page)
        .and_then(|p| p.text_layer.as_ref())
        .map(|l| l.fragments.iter().map(|f| f.style.translate_x).collect())
        .unwrap_or_default()
}

pub fn opacities(viewer: &Viewer, page: u32) -> Vec<f32> {
    viewer
        .page(page)
        .map(|p| p.canvases.iter().map(|c| c.opacity).collect())
        .unwrap_or_default()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
