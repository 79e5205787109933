use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::style::{FragmentStyle, PageStyle, TextLayerStyle};

/// Weight and slant of the original rendering, supplied by the renderer so the
/// substitute font can keep them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontTraits {
    pub weight: u16,
    pub italic: bool,
}

impl Default for FontTraits {
    fn default() -> Self {
        FontTraits {
            weight: 400,
            italic: false,
        }
    }
}

/// One positioned, styleable unit of rendered text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Current layout box, untransformed.
    pub bounds: Rect,
    /// Width under the original font; filled in on first reflow when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_width: Option<f32>,
    #[serde(default)]
    pub base_font: FontTraits,
    #[serde(default, skip_serializing_if = "FragmentStyle::is_default")]
    pub style: FragmentStyle,
}

fn default_font_size() -> f32 {
    12.0
}

impl Fragment {
    pub fn new(text: impl Into<String>, bounds: Rect) -> Self {
        Fragment {
            text: text.into(),
            font_size: bounds.height(),
            bounds,
            natural_width: Some(bounds.width()),
            base_font: FontTraits::default(),
            style: FragmentStyle::default(),
        }
    }

    pub fn with_font(mut self, weight: u16, italic: bool) -> Self {
        self.base_font = FontTraits { weight, italic };
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    #[serde(default)]
    pub style: TextLayerStyle,
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl TextLayer {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        TextLayer {
            style: TextLayerStyle::default(),
            fragments,
        }
    }

    /// Reads the current fragment boxes in document order.
    pub fn fragment_boxes(&self) -> Vec<Rect> {
        self.fragments.iter().map(|f| f.bounds).collect()
    }
}

/// A rendered-image surface beneath the text layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub opacity: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas { opacity: 1.0 }
    }
}

/// A rendered page container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: u32,
    /// Bumped by the renderer whenever it throws the page layout away and rebuilds it.
    #[serde(default)]
    pub layout_epoch: u64,
    #[serde(default)]
    pub style: PageStyle,
    #[serde(default)]
    pub text_layer: Option<TextLayer>,
    #[serde(default)]
    pub canvases: Vec<Canvas>,
}

impl Page {
    pub fn new(number: u32, text_layer: Option<TextLayer>, canvases: usize) -> Self {
        Page {
            number,
            layout_epoch: 0,
            style: PageStyle::default(),
            text_layer,
            canvases: vec![Canvas::default(); canvases],
        }
    }
}
