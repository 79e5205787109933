//! In-memory renderer: a set of pages loaded from a JSON page dump.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metrics::FontMetrics;
use crate::page::Page;
use crate::renderer::Renderer;
use crate::style::ViewerStyle;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Viewer {
    pub pages: Vec<Page>,
    /// Visible page numbers; empty means every page is visible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visible: Vec<u32>,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub style: ViewerStyle,
    /// Metrics used to re-measure fragments that carry a substitute font family.
    #[serde(skip)]
    pub metrics: Option<FontMetrics>,
}

fn default_scale() -> f32 {
    1.0
}

impl Viewer {
    pub fn new(pages: Vec<Page>) -> Self {
        Viewer {
            pages,
            visible: Vec::new(),
            scale: 1.0,
            style: ViewerStyle::default(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let viewer: Viewer =
            serde_json::from_str(json).map_err(|e| Error::InvalidDump(e.to_string()))?;
        if viewer.scale <= 0.0 || !viewer.scale.is_finite() {
            return Err(Error::InvalidDump(format!("bad scale {}", viewer.scale)));
        }
        let mut numbers: Vec<u32> = viewer.pages.iter().map(|p| p.number).collect();
        numbers.sort_unstable();
        if numbers.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidDump("duplicate page number".into()));
        }
        Ok(viewer)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidDump(e.to_string()))
    }

    pub fn page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Zoom every page. Paragraph structure is unchanged; only boxes scale.
    /// Non-positive or non-finite scales are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale <= 0.0 || !scale.is_finite() {
            log::warn!("Ignoring invalid scale {scale}");
            return;
        }
        let factor = scale / self.scale;
        for page in &mut self.pages {
            let Some(layer) = page.text_layer.as_mut() else {
                continue;
            };
            for fragment in &mut layer.fragments {
                fragment.bounds = fragment.bounds.scaled(factor);
                fragment.font_size *= factor;
                if let Some(w) = fragment.natural_width.as_mut() {
                    *w *= factor;
                }
            }
        }
        self.scale = scale;
    }

    /// Mark a page's layout as rebuilt from scratch.
    pub fn rebuild_page(&mut self, number: u32) {
        if let Some(page) = self.pages.iter_mut().find(|p| p.number == number) {
            page.layout_epoch += 1;
        }
    }
}

impl Renderer for Viewer {
    fn visible_pages(&self) -> Vec<u32> {
        if self.visible.is_empty() {
            self.pages.iter().map(|p| p.number).collect()
        } else {
            self.visible.clone()
        }
    }

    fn page_mut(&mut self, number: u32) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.number == number)
    }

    fn viewer_style_mut(&mut self) -> &mut ViewerStyle {
        &mut self.style
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    /// Fragments with a substitute family take their width from the loaded
    /// metrics; all others return to their natural width. Left and top stay put.
    fn reflow(&mut self, number: u32) {
        let Some(metrics) = self.metrics.as_ref() else {
            return;
        };
        let Some(page) = self.pages.iter_mut().find(|p| p.number == number) else {
            return;
        };
        let Some(layer) = page.text_layer.as_mut() else {
            return;
        };
        for fragment in &mut layer.fragments {
            let natural = *fragment
                .natural_width
                .get_or_insert(fragment.bounds.width());
            let width = if fragment.style.font_family.is_some() && !fragment.text.is_empty() {
                metrics.text_width(&fragment.text, fragment.font_size)
            } else {
                natural
            };
            fragment.bounds.right = fragment.bounds.left + width;
        }
    }
}
