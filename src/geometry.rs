use serde::{Deserialize, Serialize};

/// Axis-aligned box in layout units. `top` grows downward, as in the text layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box from an offset position and size (offsetLeft/offsetTop/offsetWidth/offsetHeight).
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Union of all boxes, `None` for an empty iterator.
    pub fn bounding<'a>(boxes: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        boxes.into_iter().fold(None, |acc: Option<Rect>, r| match acc {
            Some(b) => Some(b.union(r)),
            None => Some(*r),
        })
    }

    pub fn translated_x(&self, dx: f32) -> Rect {
        Rect {
            left: self.left + dx,
            right: self.right + dx,
            ..*self
        }
    }

    pub fn scaled(&self, factor: f32) -> Rect {
        Rect {
            left: self.left * factor,
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
        }
    }

    /// Overlap test against the box of the paragraph laid out just before this one.
    ///
    /// Only the leading edges of `self` are compared. Touching edges do not count.
    pub fn collides_with_predecessor(&self, prev: &Rect) -> bool {
        self.top < prev.bottom && self.left < prev.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_unions_all_boxes() {
        let boxes = [
            Rect::new(10.0, 5.0, 50.0, 15.0),
            Rect::new(0.0, 8.0, 30.0, 25.0),
        ];
        assert_eq!(
            Rect::bounding(&boxes),
            Some(Rect::new(0.0, 5.0, 50.0, 25.0))
        );
        assert_eq!(Rect::bounding(&[]), None);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert!(!Rect::new(60.0, 20.0, 160.0, 40.0).collides_with_predecessor(&a));
        assert!(!Rect::new(100.0, 10.0, 160.0, 30.0).collides_with_predecessor(&a));
        assert!(Rect::new(60.0, 15.0, 160.0, 35.0).collides_with_predecessor(&a));
    }

    #[test]
    fn translate_keeps_vertical_extent() {
        let r = Rect::from_origin_size(60.0, 15.0, 100.0, 20.0).translated_x(50.0);
        assert_eq!(r, Rect::new(110.0, 15.0, 210.0, 35.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 20.0);
    }
}
