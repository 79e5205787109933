use std::collections::HashMap;

use crate::page::TextLayer;
use crate::paragraph::Paragraph;
use crate::resolver::ShiftSet;

/// A shift set together with the layout it was computed for.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedShifts {
    pub set: ShiftSet,
    pub layout_epoch: u64,
    pub scale: f32,
}

/// Per-page overlay state, owned for as long as the renderer keeps the page container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageBinding {
    pub shifts: Option<CachedShifts>,
    pub applied: bool,
}

/// Page bindings keyed by page number.
#[derive(Debug, Default)]
pub struct ShiftCache {
    bindings: HashMap<u32, PageBinding>,
}

impl ShiftCache {
    pub fn new() -> Self {
        ShiftCache::default()
    }

    pub fn get(&self, page: u32) -> Option<&ShiftSet> {
        self.bindings
            .get(&page)
            .and_then(|b| b.shifts.as_ref())
            .map(|c| &c.set)
    }

    /// Cached shifts for `page` if they were computed for this layout.
    ///
    /// A mismatched layout epoch or paragraph count always invalidates. A mismatched
    /// scale invalidates unless `reuse_across_zoom` is set, in which case every `dx`
    /// is rescaled by `scale / cached_scale`. Stale entries are evicted here.
    pub fn get_valid(
        &mut self,
        page: u32,
        layout_epoch: u64,
        scale: f32,
        paragraphs: usize,
        reuse_across_zoom: bool,
    ) -> Option<ShiftSet> {
        let binding = self.bindings.get_mut(&page)?;
        let cached = binding.shifts.as_ref()?;
        let stale = cached.layout_epoch != layout_epoch
            || cached.set.len() != paragraphs
            || (!reuse_across_zoom && cached.scale != scale);
        if stale {
            log::debug!("page {page}: cached shifts are stale, evicting");
            binding.shifts = None;
            return None;
        }
        if cached.scale == scale {
            return Some(cached.set.clone());
        }
        Some(cached.set.scaled(scale / cached.scale))
    }

    pub fn put(&mut self, page: u32, set: ShiftSet, layout_epoch: u64, scale: f32) {
        self.bindings.entry(page).or_default().shifts = Some(CachedShifts {
            set,
            layout_epoch,
            scale,
        });
    }

    pub fn evict(&mut self, page: u32) -> Option<ShiftSet> {
        self.bindings
            .get_mut(&page)
            .and_then(|b| b.shifts.take())
            .map(|c| c.set)
    }

    /// Drop everything held for a page the renderer has thrown away.
    pub fn discard(&mut self, page: u32) -> Option<PageBinding> {
        self.bindings.remove(&page)
    }

    pub fn is_applied(&self, page: u32) -> bool {
        self.bindings.get(&page).is_some_and(|b| b.applied)
    }

    pub fn set_applied(&mut self, page: u32, applied: bool) {
        if applied {
            self.bindings.entry(page).or_default().applied = true;
        } else if let Some(b) = self.bindings.get_mut(&page) {
            b.applied = false;
        }
    }

    pub fn binding(&self, page: u32) -> Option<&PageBinding> {
        self.bindings.get(&page)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Write shifts onto the live fragments of the current grouping, positionally.
///
/// Translation is set, not accumulated, so replaying the same set twice leaves the
/// same styling. Paragraphs without a positive shift get their translation cleared;
/// shift entries past the end of the current grouping are ignored.
pub fn apply_shifts(layer: &mut TextLayer, paragraphs: &[Paragraph], set: &ShiftSet) {
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        let translate = set.get(idx).map(|s| s.dx).filter(|&dx| dx > 0.0);
        for fragment in &mut layer.fragments[paragraph.fragments.clone()] {
            fragment.style.translate_x = translate;
        }
    }
}
