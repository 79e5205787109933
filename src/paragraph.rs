use std::ops::Range;

use crate::geometry::Rect;

/// Vertical distance between consecutive fragment tops that starts a new paragraph.
pub const PARAGRAPH_GAP: f32 = 20.0;

/// A contiguous run of fragments grouped by vertical proximity.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    /// Indices into the page's fragment list. Never empty.
    pub fragments: Range<usize>,
    pub bounds: Rect,
}

impl Paragraph {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

fn finish_paragraph(boxes: &[Rect], start: usize, end: usize) -> Option<Paragraph> {
    let bounds = Rect::bounding(&boxes[start..end])?;
    Some(Paragraph {
        fragments: start..end,
        bounds,
    })
}

/// Partition fragment boxes (in reading order) into paragraphs.
///
/// A new paragraph starts whenever a fragment's `top` differs from the previous
/// fragment's `top` by more than `gap`. Horizontal position is ignored.
pub fn group_paragraphs(boxes: &[Rect], gap: f32) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut last_top: Option<f32> = None;

    for (i, b) in boxes.iter().enumerate() {
        if let Some(prev) = last_top
            && (b.top - prev).abs() > gap
        {
            paragraphs.extend(finish_paragraph(boxes, start, i));
            start = i;
        }
        last_top = Some(b.top);
    }
    paragraphs.extend(finish_paragraph(boxes, start, boxes.len()));

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_top(top: f32) -> Rect {
        Rect::from_origin_size(0.0, top, 40.0, 10.0)
    }

    fn tops(paragraphs: &[Paragraph], boxes: &[Rect]) -> Vec<Vec<f32>> {
        paragraphs
            .iter()
            .map(|p| boxes[p.fragments.clone()].iter().map(|b| b.top).collect())
            .collect()
    }

    #[test]
    fn splits_on_large_vertical_gap() {
        let boxes: Vec<Rect> = [0.0, 5.0, 5.0, 40.0].into_iter().map(at_top).collect();
        let paragraphs = group_paragraphs(&boxes, PARAGRAPH_GAP);
        assert_eq!(
            tops(&paragraphs, &boxes),
            vec![vec![0.0, 5.0, 5.0], vec![40.0]]
        );
    }

    #[test]
    fn gap_of_exactly_threshold_stays_together() {
        let boxes: Vec<Rect> = [0.0, 20.0, 40.0, 60.5].into_iter().map(at_top).collect();
        let paragraphs = group_paragraphs(&boxes, PARAGRAPH_GAP);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].fragments, 0..3);
        assert_eq!(paragraphs[1].fragments, 3..4);
    }

    #[test]
    fn upward_jump_also_splits() {
        let boxes: Vec<Rect> = [100.0, 102.0, 10.0].into_iter().map(at_top).collect();
        let paragraphs = group_paragraphs(&boxes, PARAGRAPH_GAP);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn empty_and_single() {
        assert!(group_paragraphs(&[], PARAGRAPH_GAP).is_empty());

        let one = [Rect::new(3.0, 4.0, 10.0, 12.0)];
        let paragraphs = group_paragraphs(&one, PARAGRAPH_GAP);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].bounds, one[0]);
        assert_eq!(paragraphs[0].len(), 1);
    }

    #[test]
    fn partition_is_complete_and_deterministic() {
        let boxes: Vec<Rect> = [0.0, 3.0, 50.0, 52.0, 51.0, 120.0, 300.0, 305.0]
            .into_iter()
            .enumerate()
            .map(|(i, top)| Rect::from_origin_size(i as f32 * 7.0, top, 30.0, 12.0))
            .collect();

        let first = group_paragraphs(&boxes, PARAGRAPH_GAP);
        let second = group_paragraphs(&boxes, PARAGRAPH_GAP);
        assert_eq!(first, second);

        let mut next = 0;
        for p in &first {
            assert!(!p.is_empty());
            assert_eq!(p.fragments.start, next);
            next = p.fragments.end;
        }
        assert_eq!(next, boxes.len());
    }

    #[test]
    fn bounds_cover_member_fragments() {
        let boxes = [
            Rect::new(10.0, 0.0, 60.0, 12.0),
            Rect::new(0.0, 14.0, 80.0, 26.0),
        ];
        let paragraphs = group_paragraphs(&boxes, PARAGRAPH_GAP);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].bounds, Rect::new(0.0, 0.0, 80.0, 26.0));
    }
}
