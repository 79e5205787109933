use crate::paragraph::PARAGRAPH_GAP;
use crate::resolver::SAFETY_MARGIN;
use crate::style::Color;

pub const DEFAULT_FONT_FAMILY: &str = "OpenDyslexic, sans-serif";

/// Font file used for re-measuring text, read by the CLI.
pub const FONT_ENV_VAR: &str = "DYSLEXIC_OVERLAY_FONT";

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub font_family: String,
    pub canvas_opacity: f32,
    pub background: Color,
    pub text_color: Color,
    /// Original weights at or above this render bold in the substitute font.
    pub bold_threshold: u16,
    pub paragraph_gap: f32,
    pub safety_margin: f32,
    pub padding_bottom: f32,
    /// Replay cached shifts after a zoom change instead of recomputing them.
    pub reuse_shifts_across_zoom: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            canvas_opacity: 0.15,
            background: Color::WHITE,
            text_color: Color::BLACK,
            bold_threshold: 600,
            paragraph_gap: PARAGRAPH_GAP,
            safety_margin: SAFETY_MARGIN,
            padding_bottom: 20.0,
            reuse_shifts_across_zoom: false,
        }
    }
}
