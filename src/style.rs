//! Mutable style records for the viewer, pages, text layers and fragments.
//! A `None` field means "inherited / renderer default".

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weight {
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slant {
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Block,
    InlineBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Absolute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Visible,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<Weight>,
    pub font_style: Option<Slant>,
    pub display: Option<Display>,
    pub color: Option<Color>,
    /// Horizontal translation in layout units. Does not move the layout box.
    pub translate_x: Option<f32>,
}

impl FragmentStyle {
    pub fn clear(&mut self) {
        *self = FragmentStyle::default();
    }

    pub fn is_default(&self) -> bool {
        *self == FragmentStyle::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayerStyle {
    pub position: Option<Position>,
    /// Percent of the page width.
    pub left_percent: Option<f32>,
    /// Percent of the layer's own width.
    pub translate_x_percent: Option<f32>,
    pub overflow: Option<Overflow>,
    pub visibility: Option<Visibility>,
    pub display: Option<Display>,
}

impl TextLayerStyle {
    pub fn clear(&mut self) {
        *self = TextLayerStyle::default();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStyle {
    pub padding_bottom: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerStyle {
    pub background: Option<Color>,
}
