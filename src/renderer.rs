use crate::page::Page;
use crate::style::ViewerStyle;

/// The document renderer the overlay decorates.
pub trait Renderer {
    /// Numbers of the pages currently shown, in document order.
    fn visible_pages(&self) -> Vec<u32>;

    fn page_mut(&mut self, number: u32) -> Option<&mut Page>;

    fn viewer_style_mut(&mut self) -> &mut ViewerStyle;

    /// Current zoom factor.
    fn scale(&self) -> f32 {
        1.0
    }

    /// Bring fragment boxes of `number` up to date with the styles just written.
    /// Called before geometry is read, standing in for the next paint.
    fn reflow(&mut self, _number: u32) {}
}
