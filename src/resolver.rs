use crate::geometry::Rect;
use crate::paragraph::Paragraph;

/// Extra clearance added past the predecessor's right edge.
pub const SAFETY_MARGIN: f32 = 10.0;

/// Horizontal displacement for the paragraph at `paragraph` in the page's grouping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shift {
    pub paragraph: usize,
    pub dx: f32,
}

/// One `Shift` per paragraph, in paragraph order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShiftSet(Vec<Shift>);

impl ShiftSet {
    pub fn new(shifts: Vec<Shift>) -> Self {
        ShiftSet(shifts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, paragraph: usize) -> Option<&Shift> {
        self.0.get(paragraph)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shift> {
        self.0.iter()
    }

    /// True when no paragraph moves.
    pub fn is_noop(&self) -> bool {
        self.0.iter().all(|s| s.dx == 0.0)
    }

    /// Every `dx` multiplied by `factor`, for replaying at another zoom level.
    pub fn scaled(&self, factor: f32) -> ShiftSet {
        ShiftSet(
            self.0
                .iter()
                .map(|s| Shift {
                    paragraph: s.paragraph,
                    dx: s.dx * factor,
                })
                .collect(),
        )
    }

    /// Whether applying this set to `paragraphs` leaves no paragraph colliding
    /// with its shifted predecessor.
    pub fn clears(&self, paragraphs: &[Paragraph]) -> bool {
        let mut last: Option<Rect> = None;
        for (idx, paragraph) in paragraphs.iter().enumerate() {
            let dx = self.get(idx).map_or(0.0, |s| s.dx);
            let bounds = paragraph.bounds.translated_x(dx);
            if let Some(prev) = last
                && bounds.collides_with_predecessor(&prev)
            {
                return false;
            }
            last = Some(bounds);
        }
        true
    }

    pub fn shifted(&self) -> usize {
        self.0.iter().filter(|s| s.dx > 0.0).count()
    }
}

impl<'a> IntoIterator for &'a ShiftSet {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute the horizontal correction for each paragraph against its predecessor.
///
/// `last` tracks the previous paragraph's box after its own shift, so a chain of
/// colliding paragraphs is pushed progressively further right. Pure: the caller
/// applies the result to live fragments.
pub fn resolve_overlaps(paragraphs: &[Paragraph], margin: f32) -> ShiftSet {
    let mut shifts = Vec::with_capacity(paragraphs.len());
    let mut last: Option<Rect> = None;

    for (idx, paragraph) in paragraphs.iter().enumerate() {
        let mut bounds = paragraph.bounds;
        let mut dx = 0.0;

        if let Some(prev) = last
            && bounds.collides_with_predecessor(&prev)
        {
            dx = (prev.right - bounds.left) + margin;
            bounds = bounds.translated_x(dx);
        }

        shifts.push(Shift { paragraph: idx, dx });
        last = Some(bounds);
    }

    ShiftSet(shifts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(idx: usize, bounds: Rect) -> Paragraph {
        Paragraph {
            fragments: idx..idx + 1,
            bounds,
        }
    }

    fn dxs(set: &ShiftSet) -> Vec<f32> {
        set.iter().map(|s| s.dx).collect()
    }

    #[test]
    fn shifts_overlapping_successor_past_predecessor() {
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            para(1, Rect::new(60.0, 15.0, 160.0, 35.0)),
        ];
        let set = resolve_overlaps(&paragraphs, SAFETY_MARGIN);
        assert_eq!(
            set,
            ShiftSet::new(vec![
                Shift { paragraph: 0, dx: 0.0 },
                Shift { paragraph: 1, dx: 50.0 },
            ])
        );
    }

    #[test]
    fn no_shift_below_predecessor() {
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            para(1, Rect::new(60.0, 20.0, 160.0, 40.0)),
            para(2, Rect::new(0.0, 80.0, 50.0, 100.0)),
        ];
        let set = resolve_overlaps(&paragraphs, SAFETY_MARGIN);
        assert_eq!(dxs(&set), vec![0.0, 0.0, 0.0]);
        assert!(set.is_noop());
    }

    #[test]
    fn no_shift_right_of_predecessor() {
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            para(1, Rect::new(100.0, 5.0, 160.0, 25.0)),
        ];
        assert_eq!(dxs(&resolve_overlaps(&paragraphs, SAFETY_MARGIN)), vec![0.0, 0.0]);
    }

    #[test]
    fn compares_against_shifted_predecessor() {
        // B is pushed to 110..210, so C must clear 210 rather than 160.
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            para(1, Rect::new(60.0, 15.0, 160.0, 35.0)),
            para(2, Rect::new(150.0, 30.0, 200.0, 50.0)),
        ];
        let set = resolve_overlaps(&paragraphs, SAFETY_MARGIN);
        assert_eq!(dxs(&set), vec![0.0, 50.0, 70.0]);
        assert_eq!(set.shifted(), 2);
    }

    #[test]
    fn post_condition_holds_for_each_pair() {
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 300.0, 40.0)),
            para(1, Rect::new(20.0, 30.0, 120.0, 70.0)),
            para(2, Rect::new(10.0, 100.0, 90.0, 120.0)),
            para(3, Rect::new(5.0, 110.0, 95.0, 140.0)),
        ];
        let set = resolve_overlaps(&paragraphs, SAFETY_MARGIN);
        let shifted: Vec<Rect> = paragraphs
            .iter()
            .zip(&set)
            .map(|(p, s)| p.bounds.translated_x(s.dx))
            .collect();
        for pair in shifted.windows(2) {
            let overlaps_x = pair[1].left < pair[0].right && pair[1].right > pair[0].left;
            let overlaps_y = pair[1].top < pair[0].bottom && pair[1].bottom > pair[0].top;
            assert!(!(overlaps_x && overlaps_y), "{:?} overlaps {:?}", pair[1], pair[0]);
        }
    }

    #[test]
    fn resolved_set_clears_and_stale_set_does_not() {
        let paragraphs = [
            para(0, Rect::new(0.0, 0.0, 100.0, 20.0)),
            para(1, Rect::new(60.0, 15.0, 160.0, 35.0)),
        ];
        let set = resolve_overlaps(&paragraphs, SAFETY_MARGIN);
        assert!(set.clears(&paragraphs));
        assert!(!ShiftSet::new(vec![Shift { paragraph: 0, dx: 0.0 }; 2]).clears(&paragraphs));

        let zoomed: Vec<Paragraph> = paragraphs
            .iter()
            .map(|p| Paragraph {
                fragments: p.fragments.clone(),
                bounds: p.bounds.scaled(2.0),
            })
            .collect();
        assert!(!set.clears(&zoomed));
        assert!(set.scaled(2.0).clears(&zoomed));
        assert_eq!(dxs(&set.scaled(2.0)), vec![0.0, 100.0]);
    }

    #[test]
    fn empty_page_yields_empty_set() {
        let set = resolve_overlaps(&[], SAFETY_MARGIN);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
