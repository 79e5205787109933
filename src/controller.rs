use std::collections::HashMap;
use std::time::Instant;

use crate::cache::{ShiftCache, apply_shifts};
use crate::config::OverlayConfig;
use crate::page::Fragment;
use crate::paragraph::group_paragraphs;
use crate::renderer::Renderer;
use crate::resolver::resolve_overlaps;
use crate::style::{Display, Overflow, Position, Slant, TextLayerStyle, Visibility, Weight};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Disabled,
    Enabled,
}

impl OverlayState {
    pub fn is_enabled(self) -> bool {
        self == OverlayState::Enabled
    }

    fn flipped(self) -> Self {
        match self {
            OverlayState::Disabled => OverlayState::Enabled,
            OverlayState::Enabled => OverlayState::Disabled,
        }
    }
}

/// Renderer lifecycle notifications.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LifecycleEvent {
    PageChanging,
    /// Emitted after the renderer has switched to the new scale.
    ScaleChanging,
    /// The text layer of `page` finished rendering; geometry settles on the next frame.
    TextLayerRendered { page: u32 },
    /// The renderer dropped the page container.
    PageDiscarded { page: u32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub resolver_runs: u64,
    pub cache_replays: u64,
    pub pages_styled: u64,
    pub superseded: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ticket {
    page: u32,
    seq: u64,
}

/// Deferred per-page applies. Only the most recently scheduled ticket for a page
/// runs; older ones are dropped when the frame comes.
#[derive(Debug, Default)]
struct FrameQueue {
    pending: Vec<Ticket>,
    latest: HashMap<u32, u64>,
    next_seq: u64,
}

impl FrameQueue {
    fn schedule(&mut self, page: u32) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            page,
            seq: self.next_seq,
        };
        self.latest.insert(page, ticket.seq);
        self.pending.push(ticket);
        ticket
    }

    fn cancel(&mut self, page: u32) {
        self.latest.remove(&page);
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.page) == Some(&ticket.seq)
    }

    fn take(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.pending)
    }
}

/// Owns the overlay state and every page binding; drives restyling of the renderer.
#[derive(Debug, Default)]
pub struct OverlayController {
    state: OverlayState,
    config: OverlayConfig,
    cache: ShiftCache,
    frames: FrameQueue,
    stats: ApplyStats,
}

impl OverlayController {
    pub fn new(config: OverlayConfig) -> Self {
        OverlayController {
            config,
            ..OverlayController::default()
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn cache(&self) -> &ShiftCache {
        &self.cache
    }

    pub fn stats(&self) -> ApplyStats {
        self.stats
    }

    /// Initial apply in the current state.
    pub fn init<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.apply(renderer, None);
    }

    pub fn toggle<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.state = self.state.flipped();
        log::info!("Overlay {:?}", self.state);
        self.apply(renderer, None);
    }

    pub fn set_enabled<R: Renderer + ?Sized>(&mut self, enabled: bool, renderer: &mut R) {
        self.state = if enabled {
            OverlayState::Enabled
        } else {
            OverlayState::Disabled
        };
        self.apply(renderer, None);
    }

    pub fn handle<R: Renderer + ?Sized>(&mut self, event: LifecycleEvent, renderer: &mut R) {
        match event {
            LifecycleEvent::PageChanging | LifecycleEvent::ScaleChanging => {
                self.apply(renderer, None)
            }
            LifecycleEvent::TextLayerRendered { page } => {
                self.frames.schedule(page);
            }
            LifecycleEvent::PageDiscarded { page } => {
                self.frames.cancel(page);
                self.cache.discard(page);
            }
        }
    }

    /// Run the applies deferred to this frame.
    pub fn on_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for ticket in self.frames.take() {
            if self.frames.is_current(&ticket) {
                self.apply(renderer, Some(ticket.page));
            } else {
                log::debug!("page {}: deferred apply #{} superseded", ticket.page, ticket.seq);
                self.stats.superseded += 1;
            }
        }
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frames.pending.is_empty()
    }

    /// Restyle one page, or every visible page, for the current state.
    pub fn apply<R: Renderer + ?Sized>(&mut self, renderer: &mut R, page: Option<u32>) {
        let t0 = Instant::now();
        let enabled = self.state.is_enabled();

        renderer.viewer_style_mut().background = enabled.then_some(self.config.background);

        let pages = match page {
            Some(n) => vec![n],
            None => renderer.visible_pages(),
        };
        for &number in &pages {
            if enabled {
                self.apply_enabled(renderer, number);
            } else {
                self.apply_disabled(renderer, number);
            }
        }

        log::debug!(
            "Apply: state={:?}, pages={}, {:.1}ms",
            self.state,
            pages.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
    }

    fn apply_enabled<R: Renderer + ?Sized>(&mut self, renderer: &mut R, number: u32) {
        let scale = renderer.scale();
        let Some(page) = renderer.page_mut(number) else {
            log::debug!("page {number}: not rendered, skipping");
            return;
        };
        self.stats.pages_styled += 1;

        page.style.padding_bottom = Some(self.config.padding_bottom);
        for canvas in &mut page.canvases {
            canvas.opacity = self.config.canvas_opacity;
        }
        let Some(layer) = page.text_layer.as_mut() else {
            log::debug!("page {number}: no text layer");
            return;
        };
        layer.style = TextLayerStyle {
            position: Some(Position::Absolute),
            left_percent: Some(50.0),
            translate_x_percent: Some(-50.0),
            overflow: Some(Overflow::Visible),
            visibility: Some(Visibility::Visible),
            display: Some(Display::Block),
        };
        for fragment in &mut layer.fragments {
            substitute_font(&self.config, fragment);
        }

        // Geometry has to be read after the substitute font took effect.
        renderer.reflow(number);
        let Some(page) = renderer.page_mut(number) else {
            return;
        };
        let epoch = page.layout_epoch;
        let Some(layer) = page.text_layer.as_mut() else {
            return;
        };
        self.cache.set_applied(number, true);

        let boxes = layer.fragment_boxes();
        if boxes.is_empty() {
            return;
        }
        let paragraphs = group_paragraphs(&boxes, self.config.paragraph_gap);

        let reuse = self.config.reuse_shifts_across_zoom;
        let cached = self
            .cache
            .get_valid(number, epoch, scale, paragraphs.len(), reuse)
            .filter(|set| set.clears(&paragraphs));
        if let Some(set) = cached {
            apply_shifts(layer, &paragraphs, &set);
            self.stats.cache_replays += 1;
            log::debug!(
                "page {number}: replayed {} shifts over {} paragraphs",
                set.shifted(),
                paragraphs.len()
            );
            self.cache.put(number, set, epoch, scale);
        } else {
            let set = resolve_overlaps(&paragraphs, self.config.safety_margin);
            apply_shifts(layer, &paragraphs, &set);
            self.stats.resolver_runs += 1;
            log::debug!(
                "page {number}: resolved {} paragraphs, {} shifted",
                paragraphs.len(),
                set.shifted()
            );
            self.cache.put(number, set, epoch, scale);
        }
    }

    fn apply_disabled<R: Renderer + ?Sized>(&mut self, renderer: &mut R, number: u32) {
        self.cache.discard(number);
        let Some(page) = renderer.page_mut(number) else {
            return;
        };
        self.stats.pages_styled += 1;

        page.style.padding_bottom = None;
        for canvas in &mut page.canvases {
            canvas.opacity = 1.0;
        }
        let Some(layer) = page.text_layer.as_mut() else {
            return;
        };
        layer.style.clear();
        for fragment in &mut layer.fragments {
            fragment.style.clear();
        }
        renderer.reflow(number);
    }
}

/// Swap in the substitute family, keeping the weight and slant of the original rendering.
fn substitute_font(config: &OverlayConfig, fragment: &mut Fragment) {
    let style = &mut fragment.style;
    style.font_family = Some(config.font_family.clone());
    style.font_weight = Some(if fragment.base_font.weight >= config.bold_threshold {
        Weight::Bold
    } else {
        Weight::Normal
    });
    style.font_style = Some(if fragment.base_font.italic {
        Slant::Italic
    } else {
        Slant::Normal
    });
    style.display = Some(Display::InlineBlock);
    style.color = Some(config.text_color);
}
