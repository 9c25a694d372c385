//! Event-driven effects engine.
//!
//! Single-threaded cooperative dispatcher owning the reveal observers, the
//! scroll throttle, and the frame loop. The host feeds it platform-shaped
//! events (scroll notifications, frame ticks, pointer activity,
//! intersection batches) and it drives every wired feature against the page
//! model. Construction wires only the features the device profile permits.

use std::collections::HashMap;

use crate::capabilities::DeviceProfile;
use crate::counter::CounterAnimation;
use crate::dom::PageModel;
use crate::frame::FrameLoop;
use crate::observer::{IntersectionEntry, RevealObserver, RootMargin};
use crate::pointer::{ripple_geometry, CardTilt, CursorFollower, RippleGeometry};
use crate::scroll::{FrameThrottle, ScrollEffects, ScrollTargets};
use crate::transitions::{
    split_heading, FilterSwitch, LinkActivation, PageTransition, SplitChar,
    FILTER_RESTORE_DELAY_MS, TRANSITION_DELAY_MS,
};

/// Classes revealed with the `visible` class at a 10% threshold.
pub const FADE_CLASSES: [&str; 3] = ["fade-in", "fade-from-left", "fade-from-right"];

/// Classes revealed at a 50% threshold.
pub const GOLD_LINE_CLASSES: [&str; 1] = ["gold-line"];

/// Classes animated as counters at a 60% threshold.
pub const COUNTER_CLASSES: [&str; 2] = ["stat-num", "stat-val"];

/// Card classes that tilt under the pointer.
pub const TILT_CLASSES: [&str; 4] = ["listing-card", "testi-card", "cred-card", "trust-card"];

/// Platform-delivered events the engine consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Scroll offset changed
    Scroll {
        /// New vertical offset in pixels
        offset: f64,
    },
    /// One rendered frame
    Frame {
        /// Frame timestamp in milliseconds
        now_ms: f64,
    },
    /// Pointer moved within the window
    PointerMove {
        /// Pointer x in page coordinates
        x: f64,
        /// Pointer y in page coordinates
        y: f64,
    },
    /// Primary button pressed
    PointerDown,
    /// Primary button released
    PointerUp,
    /// Pointer left the window
    WindowLeave,
    /// Pointer re-entered the window
    WindowEnter,
    /// Externally computed visibility batch
    IntersectionBatch {
        /// One entry per reported target
        entries: Vec<IntersectionEntry>,
    },
}

/// The assembled effects engine for one page.
pub struct EffectsEngine {
    profile: DeviceProfile,
    page: PageModel,
    fades: RevealObserver,
    gold_lines: RevealObserver,
    counters: RevealObserver,
    scroll_fx: ScrollEffects,
    scroll_throttle: FrameThrottle,
    frames: FrameLoop,
    cursor: Option<CursorFollower>,
    tilts: HashMap<String, CardTilt>,
    transition: PageTransition,
    filters: FilterSwitch,
    hero_split: Option<Vec<SplitChar>>,
    pending_nav: Option<(String, f64)>,
    due_nav: Option<String>,
    filter_restore_due: Option<f64>,
    initial_reveal_done: bool,
    last_frame_ms: f64,
}

impl std::fmt::Debug for EffectsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsEngine")
            .field("profile", &self.profile)
            .field("pending_reveals", &self.pending_reveal_count())
            .field("frame_tasks", &self.frames.len())
            .finish()
    }
}

impl EffectsEngine {
    /// Wire the engine for a page. The page is scanned once for reveal
    /// targets, counters, and tilt cards; pointer features are only created
    /// when the profile supports them.
    #[must_use]
    pub fn new(page: PageModel, profile: DeviceProfile) -> Self {
        let mut fades =
            RevealObserver::new(0.1).with_root_margin(RootMargin::bottom(-32.0));
        for id in page.query_classes(&FADE_CLASSES) {
            let target = id.clone();
            fades.observe(
                &id,
                Box::new(move |page| {
                    page.add_class(&target, "visible");
                    Ok(())
                }),
            );
        }

        let mut gold_lines = RevealObserver::new(0.5);
        for id in page.query_classes(&GOLD_LINE_CLASSES) {
            let target = id.clone();
            gold_lines.observe(
                &id,
                Box::new(move |page| {
                    page.add_class(&target, "visible");
                    Ok(())
                }),
            );
        }

        // Counter targets reveal through the same observer family; the
        // engine spawns the animation when a target fires.
        let mut counters = RevealObserver::new(0.6);
        for id in page.query_classes(&COUNTER_CLASSES) {
            counters.observe(&id, Box::new(|_| Ok(())));
        }

        let cursor = CursorFollower::for_profile("cursor-dot", "cursor-ring", &profile);

        let mut tilts = HashMap::new();
        for id in page.query_classes(&TILT_CLASSES) {
            if let Some(tilt) = CardTilt::for_profile(&id, &profile) {
                tilts.insert(id, tilt);
            }
        }

        let filters = FilterSwitch::new(
            page.query_classes(&["filter-btn"]),
            page.query_classes(&["grid"]).into_iter().next(),
        );

        let hero_split = page
            .text("hero-heading")
            .and_then(|text| split_heading(text, &profile));

        Self {
            scroll_fx: ScrollEffects::new(ScrollTargets::default(), &profile),
            transition: PageTransition::new("page-transition", &profile),
            profile,
            page,
            fades,
            gold_lines,
            counters,
            scroll_throttle: FrameThrottle::new(),
            frames: FrameLoop::new(),
            cursor,
            tilts,
            filters,
            hero_split,
            pending_nav: None,
            due_nav: None,
            filter_restore_due: None,
            initial_reveal_done: false,
            last_frame_ms: 0.0,
        }
    }

    /// The page model under the engine.
    #[must_use]
    pub const fn page(&self) -> &PageModel {
        &self.page
    }

    /// Mutable access to the page model.
    pub fn page_mut(&mut self) -> &mut PageModel {
        &mut self.page
    }

    /// The capability snapshot the engine was wired with.
    #[must_use]
    pub const fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Reveal targets that have not fired yet, across all observers.
    #[must_use]
    pub fn pending_reveal_count(&self) -> usize {
        self.fades.pending_count()
            + self.gold_lines.pending_count()
            + self.counters.pending_count()
    }

    /// Per-character hero heading split, when the profile allows it.
    #[must_use]
    pub fn hero_split(&self) -> Option<&[SplitChar]> {
        self.hero_split.as_deref()
    }

    /// Feed one platform event.
    pub fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::Scroll { offset } => {
                self.page.scroll_to(offset);
                self.scroll_throttle.notify();
            }
            PageEvent::Frame { now_ms } => self.frame(now_ms),
            PageEvent::PointerMove { x, y } => {
                if let Some(cursor) = &mut self.cursor {
                    cursor.pointer_move(x, y, &mut self.page);
                }
            }
            PageEvent::PointerDown => {
                if let Some(cursor) = &self.cursor {
                    cursor.press(&mut self.page);
                }
            }
            PageEvent::PointerUp => {
                if let Some(cursor) = &self.cursor {
                    cursor.release(&mut self.page);
                }
            }
            PageEvent::WindowLeave => {
                if let Some(cursor) = &self.cursor {
                    cursor.window_leave(&mut self.page);
                }
            }
            PageEvent::WindowEnter => {
                if let Some(cursor) = &self.cursor {
                    cursor.window_enter(&mut self.page);
                }
            }
            PageEvent::IntersectionBatch { entries } => {
                // Animations spawned from an external batch start at the
                // last observed frame time.
                let now_ms = self.last_frame_ms;
                self.process_reveals(&entries, now_ms);
            }
        }
    }

    fn frame(&mut self, now_ms: f64) {
        self.last_frame_ms = now_ms;
        // Coalesced scroll work: one recomputation per frame, and the
        // reveal observers only re-evaluate when the offset changed.
        let scrolled = self.scroll_throttle.take();
        if scrolled {
            self.scroll_fx.apply(&mut self.page);
        }
        if scrolled || !self.initial_reveal_done {
            self.initial_reveal_done = true;
            self.check_reveals(now_ms);
        }

        // Coalesced tilt writes.
        for tilt in self.tilts.values_mut() {
            tilt.frame(&mut self.page);
        }

        if let Some(cursor) = &mut self.cursor {
            cursor.step_ring(&mut self.page);
        }

        self.frames.tick(now_ms, &mut self.page);

        if self
            .pending_nav
            .as_ref()
            .is_some_and(|(_, due)| now_ms >= *due)
        {
            self.due_nav = self.pending_nav.take().map(|(href, _)| href);
        }
        if self.filter_restore_due.is_some_and(|due| now_ms >= due) {
            self.filter_restore_due = None;
            self.filters.restore(&mut self.page);
        }
    }

    fn check_reveals(&mut self, now_ms: f64) {
        let fade_entries = self.fades.collect_entries(&self.page);
        let gold_entries = self.gold_lines.collect_entries(&self.page);
        let counter_entries = self.counters.collect_entries(&self.page);
        let entries: Vec<IntersectionEntry> = fade_entries
            .into_iter()
            .chain(gold_entries)
            .chain(counter_entries)
            .collect();
        self.process_reveals(&entries, now_ms);
    }

    fn process_reveals(&mut self, entries: &[IntersectionEntry], now_ms: f64) {
        self.fades.process_batch(entries, &mut self.page);
        self.gold_lines.process_batch(entries, &mut self.page);
        let fired = self.counters.process_batch(entries, &mut self.page);
        for id in fired {
            match CounterAnimation::for_element(&self.page, &id, &self.profile) {
                Ok(anim) => {
                    self.frames.spawn(now_ms, Box::new(anim));
                }
                Err(e) => {
                    tracing::debug!(target_id = %id, error = %e, "counter target skipped");
                }
            }
        }
    }

    /// Pointer moved over a tilt card.
    pub fn card_pointer_move(&mut self, id: &str, x: f64, y: f64) {
        let Some(rect) = self.page.element(id).map(|el| el.rect) else {
            return;
        };
        if let Some(tilt) = self.tilts.get_mut(id) {
            tilt.pointer_move(x, y, &rect);
        }
        if let Some(cursor) = &mut self.cursor {
            cursor.enter_interactive(&rect);
        }
    }

    /// Pointer left a tilt card.
    pub fn card_pointer_leave(&mut self, id: &str) {
        if let Some(tilt) = self.tilts.get_mut(id) {
            tilt.pointer_leave(&mut self.page);
        }
        if let Some(cursor) = &mut self.cursor {
            cursor.leave_interactive();
        }
    }

    /// Pointer-down on a button: spawn a ripple when motion is allowed.
    #[must_use]
    pub fn ripple_on(&self, id: &str, x: f64, y: f64) -> Option<RippleGeometry> {
        if !self.profile.allows_motion() {
            return None;
        }
        let rect = self.page.element(id)?.rect;
        Some(ripple_geometry(&rect, x, y))
    }

    /// A link was activated at `now_ms`. Internal links raise the overlay
    /// and defer the navigation; everything else passes through.
    pub fn click_link(&mut self, href: &str, opens_new_tab: bool, now_ms: f64) -> LinkActivation {
        let outcome = self
            .transition
            .activate(href, opens_new_tab, &mut self.page);
        if let LinkActivation::Deferred { href } = &outcome {
            self.pending_nav = Some((href.clone(), now_ms + TRANSITION_DELAY_MS));
        }
        outcome
    }

    /// Take the navigation destination once its overlay delay has elapsed.
    pub fn take_navigation(&mut self) -> Option<String> {
        self.due_nav.take()
    }

    /// A filter button was clicked at `now_ms`.
    pub fn select_filter(&mut self, id: &str, now_ms: f64) {
        if self.filters.select(id, &mut self.page) {
            self.filter_restore_due = Some(now_ms + FILTER_RESTORE_DELAY_MS);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::capabilities::Viewport;
    use crate::counter::DURATION_DESKTOP_MS;
    use crate::dom::{Element, Rect};

    fn marketing_page() -> PageModel {
        let mut page = PageModel::new(Viewport::new(1000, 800));
        page.set_content_height(4000.0);
        page.register(Element::new("div").with_id("scroll-progress"));
        page.register(Element::new("nav").with_id("navbar"));
        page.register(Element::new("div").with_id("floating-cta"));
        page.register(Element::new("div").with_id("cursor-dot"));
        page.register(Element::new("div").with_id("cursor-ring"));
        page.register(Element::new("div").with_id("page-transition"));
        page.register(
            Element::new("h1")
                .with_id("hero-heading")
                .with_text("Sold on Service"),
        );
        page.register(
            Element::new("div")
                .with_id("about")
                .with_class("fade-in")
                .with_rect(Rect::new(0.0, 1200.0, 1000.0, 300.0)),
        );
        page.register(
            Element::new("span")
                .with_id("stat-homes")
                .with_class("stat-num")
                .with_text("250+")
                .with_rect(Rect::new(0.0, 2000.0, 200.0, 60.0)),
        );
        page.register(
            Element::new("div")
                .with_id("card-1")
                .with_class("listing-card")
                .with_rect(Rect::new(100.0, 300.0, 300.0, 200.0)),
        );
        page
    }

    fn engine() -> EffectsEngine {
        EffectsEngine::new(marketing_page(), DeviceProfile::desktop())
    }

    fn run_frames(engine: &mut EffectsEngine, from_ms: f64, to_ms: f64) {
        let mut now = from_ms;
        while now < to_ms {
            now += 16.7;
            engine.dispatch(PageEvent::Frame { now_ms: now });
        }
    }

    #[test]
    fn test_scroll_burst_coalesces_into_one_update() {
        let mut engine = engine();
        engine.dispatch(PageEvent::Frame { now_ms: 0.0 });
        for offset in [100.0, 300.0, 700.0, 1600.0] {
            engine.dispatch(PageEvent::Scroll { offset });
        }
        engine.dispatch(PageEvent::Frame { now_ms: 16.0 });
        // Only the last offset of the burst lands: 1600 / 3200 = 50%.
        assert_eq!(engine.page().style("scroll-progress", "width"), Some("50%"));
        assert!(engine.page().has_class("navbar", "scrolled"));
    }

    #[test]
    fn test_fade_reveal_fires_once() {
        let mut engine = engine();
        engine.dispatch(PageEvent::Frame { now_ms: 0.0 });
        assert!(!engine.page().has_class("about", "visible"));

        engine.dispatch(PageEvent::Scroll { offset: 900.0 });
        engine.dispatch(PageEvent::Frame { now_ms: 16.0 });
        assert!(engine.page().has_class("about", "visible"));

        // Leaving and re-entering never re-fires.
        engine.page_mut().remove_class("about", "visible");
        engine.dispatch(PageEvent::Scroll { offset: 0.0 });
        engine.dispatch(PageEvent::Frame { now_ms: 33.0 });
        engine.dispatch(PageEvent::Scroll { offset: 900.0 });
        engine.dispatch(PageEvent::Frame { now_ms: 50.0 });
        assert!(!engine.page().has_class("about", "visible"));
    }

    #[test]
    fn test_counter_animates_after_reveal() {
        let mut engine = engine();
        engine.dispatch(PageEvent::Frame { now_ms: 0.0 });
        assert_eq!(engine.page().text("stat-homes"), Some("250+"));

        // Bring the stat fully into view.
        engine.dispatch(PageEvent::Scroll { offset: 1700.0 });
        engine.dispatch(PageEvent::Frame { now_ms: 16.0 });
        run_frames(&mut engine, 16.0, 16.0 + DURATION_DESKTOP_MS + 50.0);
        assert_eq!(engine.page().text("stat-homes"), Some("250+"));

        // Mid-animation frames rendered partial values; by completion the
        // frame loop has drained.
        assert!(engine.pending_reveal_count() < 3);
    }

    #[test]
    fn test_initial_frame_reveals_visible_targets() {
        let mut page = marketing_page();
        page.register(
            Element::new("div")
                .with_id("intro")
                .with_class("fade-in")
                .with_rect(Rect::new(0.0, 100.0, 500.0, 200.0)),
        );
        let mut engine = EffectsEngine::new(page, DeviceProfile::desktop());
        engine.dispatch(PageEvent::Frame { now_ms: 0.0 });
        assert!(engine.page().has_class("intro", "visible"));
    }

    #[test]
    fn test_external_intersection_batch() {
        let mut engine = engine();
        engine.dispatch(PageEvent::IntersectionBatch {
            entries: vec![IntersectionEntry {
                target: "about".to_string(),
                ratio: 0.7,
                is_intersecting: true,
            }],
        });
        assert!(engine.page().has_class("about", "visible"));
    }

    #[test]
    fn test_cursor_wired_on_desktop_only() {
        let mut engine = engine();
        engine.dispatch(PageEvent::PointerMove { x: 10.0, y: 20.0 });
        assert_eq!(engine.page().style("cursor-dot", "left"), Some("10px"));

        let mut phone = EffectsEngine::new(marketing_page(), DeviceProfile::phone());
        phone.dispatch(PageEvent::PointerMove { x: 10.0, y: 20.0 });
        assert_eq!(phone.page().style("cursor-dot", "left"), None);
    }

    #[test]
    fn test_pointer_press_cycle() {
        let mut engine = engine();
        engine.dispatch(PageEvent::PointerDown);
        assert_eq!(
            engine.page().style("cursor-ring", "transform"),
            Some("translate(-50%,-50%) scale(0.7)")
        );
        engine.dispatch(PageEvent::PointerUp);
        assert_eq!(
            engine.page().style("cursor-ring", "transform"),
            Some("translate(-50%,-50%) scale(1)")
        );
        engine.dispatch(PageEvent::WindowLeave);
        assert_eq!(engine.page().style("cursor-dot", "opacity"), Some("0"));
        engine.dispatch(PageEvent::WindowEnter);
        assert_eq!(engine.page().style("cursor-ring", "opacity"), Some(".45"));
    }

    #[test]
    fn test_card_tilt_through_engine() {
        let mut engine = engine();
        engine.card_pointer_move("card-1", 400.0, 500.0);
        engine.dispatch(PageEvent::Frame { now_ms: 0.0 });
        assert!(engine
            .page()
            .style("card-1", "transform")
            .unwrap()
            .contains("perspective(900px)"));
        engine.card_pointer_leave("card-1");
        assert_eq!(engine.page().style("card-1", "transform"), Some(""));
    }

    #[test]
    fn test_navigation_deferred_until_overlay_delay() {
        let mut engine = engine();
        let outcome = engine.click_link("listings.html", false, 100.0);
        assert!(matches!(outcome, LinkActivation::Deferred { .. }));
        assert_eq!(engine.page().style("page-transition", "opacity"), Some("1"));

        engine.dispatch(PageEvent::Frame { now_ms: 300.0 });
        assert_eq!(engine.take_navigation(), None);
        engine.dispatch(PageEvent::Frame { now_ms: 441.0 });
        assert_eq!(engine.take_navigation(), Some("listings.html".to_string()));
        assert_eq!(engine.take_navigation(), None);
    }

    #[test]
    fn test_ripple_gated_by_motion() {
        let engine = engine();
        assert!(engine.ripple_on("card-1", 250.0, 400.0).is_some());

        let reduced = EffectsEngine::new(
            marketing_page(),
            DeviceProfile::desktop().with_reduced_motion(true),
        );
        assert!(reduced.ripple_on("card-1", 250.0, 400.0).is_none());
    }

    #[test]
    fn test_hero_split_present_on_desktop() {
        let engine = engine();
        let chars = engine.hero_split().unwrap();
        assert_eq!(chars[0].ch, 'S');
        assert!((chars[0].delay_s - 0.38).abs() < 1e-9);

        let phone = EffectsEngine::new(marketing_page(), DeviceProfile::phone());
        assert!(phone.hero_split().is_none());
    }
}
