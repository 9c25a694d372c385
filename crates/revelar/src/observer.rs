//! Viewport reveal scheduler.
//!
//! The one-shot observer pattern behind fade-ins, gold-line reveals, and
//! counters: a set of watched targets, each paired with an action that runs
//! exactly once when the element's visible fraction crosses a threshold.
//! Visibility is evaluated in batches against the page model rather than per
//! scroll event, and a fired target is deregistered before its action runs so
//! it can never appear in later batches.

use std::collections::HashMap;

use crate::dom::{visibility_ratio, PageModel, Rect};
use crate::error::RevelarResult;

/// One-shot action fired when a watched target crosses its threshold.
pub type RevealAction = Box<dyn FnMut(&mut PageModel) -> RevelarResult<()>>;

/// A visibility report for one watched target.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Target element id
    pub target: String,
    /// Visible fraction in [0, 1]
    pub ratio: f64,
    /// Whether any part of the element is inside the adjusted viewport
    pub is_intersecting: bool,
}

/// Margins applied to the viewport rect before the intersection test,
/// in pixels. Negative values shrink the viewport (the fade-in observer
/// uses a -32 px bottom margin so elements reveal slightly late).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl RootMargin {
    /// Margin with only the bottom edge adjusted.
    #[must_use]
    pub const fn bottom(pixels: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: pixels,
            left: 0.0,
        }
    }
}

/// Observes a set of elements and fires each target's action at most once.
pub struct RevealObserver {
    threshold: f64,
    root_margin: RootMargin,
    pending: HashMap<String, RevealAction>,
    order: Vec<String>,
}

impl std::fmt::Debug for RevealObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealObserver")
            .field("threshold", &self.threshold)
            .field("root_margin", &self.root_margin)
            .field("pending", &self.order)
            .finish()
    }
}

impl RevealObserver {
    /// Create an observer with the given threshold fraction, clamped to
    /// [0, 1].
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: RootMargin::default(),
            pending: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Set the root margin used for the intersection test.
    #[must_use]
    pub const fn with_root_margin(mut self, margin: RootMargin) -> Self {
        self.root_margin = margin;
        self
    }

    /// Watch an element. A target that has already fired is never re-armed;
    /// observing the same id again replaces the pending action.
    pub fn observe(&mut self, id: &str, action: RevealAction) {
        if !self.pending.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.pending.insert(id.to_string(), action);
    }

    /// Stop watching an element without firing it.
    pub fn unobserve(&mut self, id: &str) {
        self.pending.remove(id);
        self.order.retain(|t| t != id);
    }

    /// Whether an element is still being watched.
    #[must_use]
    pub fn is_observing(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Number of targets still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Viewport rect adjusted by the root margin.
    fn adjusted_root(&self, page: &PageModel) -> Rect {
        let m = self.root_margin;
        page.viewport_rect().expanded(m.top, m.right, m.bottom, m.left)
    }

    /// Compute an intersection entry for every watched target, in
    /// observation order. Targets missing from the page report ratio 0.
    #[must_use]
    pub fn collect_entries(&self, page: &PageModel) -> Vec<IntersectionEntry> {
        let root = self.adjusted_root(page);
        self.order
            .iter()
            .map(|id| {
                let ratio = page
                    .element(id)
                    .map_or(0.0, |el| visibility_ratio(&el.rect, &root));
                IntersectionEntry {
                    target: id.clone(),
                    ratio,
                    is_intersecting: ratio > 0.0,
                }
            })
            .collect()
    }

    /// Process one batch of entries: every entry whose ratio meets the
    /// threshold fires its action and is retired. The whole batch is
    /// processed before returning; an action error is logged and does not
    /// stop the remaining entries. Returns the ids that fired.
    pub fn process_batch(
        &mut self,
        entries: &[IntersectionEntry],
        page: &mut PageModel,
    ) -> Vec<String> {
        let mut fired = Vec::new();
        for entry in entries {
            if entry.ratio < self.threshold {
                continue;
            }
            // Retire before running so a re-reported entry in the same
            // batch cannot double-fire.
            let Some(mut action) = self.pending.remove(&entry.target) else {
                continue;
            };
            self.order.retain(|t| t != &entry.target);
            if let Err(e) = action(page) {
                tracing::warn!(target_id = %entry.target, error = %e, "reveal action failed; skipping");
            }
            fired.push(entry.target.clone());
        }
        fired
    }

    /// Evaluate visibility against the page and process the resulting batch.
    pub fn check(&mut self, page: &mut PageModel) -> Vec<String> {
        let entries = self.collect_entries(page);
        self.process_batch(&entries, page)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::capabilities::Viewport;
    use crate::dom::Element;
    use crate::error::RevelarError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn page() -> PageModel {
        let mut page = PageModel::new(Viewport::new(1000, 800));
        page.set_content_height(4000.0);
        page
    }

    fn target(id: &str, top: f64) -> Element {
        Element::new("div")
            .with_id(id)
            .with_class("fade-in")
            .with_rect(Rect::new(0.0, top, 400.0, 100.0))
    }

    #[test]
    fn test_fires_when_threshold_crossed() {
        let mut page = page();
        page.register(target("a", 1000.0));
        let mut obs = RevealObserver::new(0.6);
        obs.observe(
            "a",
            Box::new(|page| {
                page.add_class("a", "visible");
                Ok(())
            }),
        );

        // Off-screen: nothing fires.
        assert!(obs.check(&mut page).is_empty());
        assert!(obs.is_observing("a"));

        // 70% visible in one batch: fires exactly once.
        page.scroll_to(270.0); // viewport bottom at y=1070, 70 of 100 px visible
        let fired = obs.check(&mut page);
        assert_eq!(fired, vec!["a".to_string()]);
        assert!(page.has_class("a", "visible"));
        assert!(!obs.is_observing("a"));
    }

    #[test]
    fn test_never_fires_twice_across_reentry() {
        let mut page = page();
        page.register(target("a", 1000.0));
        let count = Rc::new(Cell::new(0u32));
        let seen = count.clone();
        let mut obs = RevealObserver::new(0.5);
        obs.observe(
            "a",
            Box::new(move |_| {
                seen.set(seen.get() + 1);
                Ok(())
            }),
        );

        // Enter, leave, and re-enter the threshold repeatedly.
        for _ in 0..3 {
            page.scroll_to(900.0);
            obs.check(&mut page);
            page.scroll_to(0.0);
            obs.check(&mut page);
        }
        assert_eq!(count.get(), 1);
        assert_eq!(obs.pending_count(), 0);
    }

    #[test]
    fn test_retired_target_absent_from_later_batches() {
        let mut page = page();
        page.register(target("a", 100.0));
        let mut obs = RevealObserver::new(0.1);
        obs.observe("a", Box::new(|_| Ok(())));
        obs.check(&mut page);
        assert!(obs.collect_entries(&page).is_empty());
    }

    #[test]
    fn test_batch_processes_all_targets() {
        let mut page = page();
        page.register(target("a", 100.0));
        page.register(target("b", 300.0));
        page.register(target("c", 3500.0));
        let mut obs = RevealObserver::new(0.5);
        for id in ["a", "b", "c"] {
            let id_owned = id.to_string();
            obs.observe(
                id,
                Box::new(move |page| {
                    page.add_class(&id_owned, "visible");
                    Ok(())
                }),
            );
        }

        let fired = obs.check(&mut page);
        assert_eq!(fired, vec!["a".to_string(), "b".to_string()]);
        assert!(obs.is_observing("c"));
        assert!(!page.has_class("c", "visible"));
    }

    #[test]
    fn test_failing_action_does_not_stop_batch() {
        let mut page = page();
        page.register(target("bad", 100.0));
        page.register(target("good", 300.0));
        let mut obs = RevealObserver::new(0.5);
        obs.observe(
            "bad",
            Box::new(|_| Err(RevelarError::action_failed("bad", "boom"))),
        );
        obs.observe(
            "good",
            Box::new(|page| {
                page.add_class("good", "visible");
                Ok(())
            }),
        );

        let fired = obs.check(&mut page);
        assert_eq!(fired.len(), 2);
        assert!(page.has_class("good", "visible"));
        // The failing target is still retired, not retried.
        assert!(!obs.is_observing("bad"));
    }

    #[test]
    fn test_empty_target_set_is_noop() {
        let mut page = page();
        let mut obs = RevealObserver::new(0.6);
        assert!(obs.check(&mut page).is_empty());
    }

    #[test]
    fn test_missing_element_reports_zero_ratio() {
        let mut page = page();
        let mut obs = RevealObserver::new(0.1);
        obs.observe("ghost", Box::new(|_| Ok(())));
        let entries = obs.collect_entries(&page);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ratio.abs() < f64::EPSILON);
        assert!(!entries[0].is_intersecting);
        assert!(obs.check(&mut page).is_empty());
        assert!(obs.is_observing("ghost"));
    }

    #[test]
    fn test_negative_bottom_margin_delays_reveal() {
        let mut page = page();
        // Element whose top 40 px poke above the fold.
        page.register(
            Element::new("div")
                .with_id("late")
                .with_rect(Rect::new(0.0, 760.0, 400.0, 100.0)),
        );
        let mut obs =
            RevealObserver::new(0.1).with_root_margin(RootMargin::bottom(-32.0));
        obs.observe("late", Box::new(|_| Ok(())));

        // 40 px visible is 40% of the element, but the shrunk viewport
        // bottom sits at 768, leaving only 8 px: below the 10% threshold.
        assert!(obs.check(&mut page).is_empty());

        page.scroll_to(10.0);
        let fired = obs.check(&mut page);
        assert_eq!(fired, vec!["late".to_string()]);
    }

    #[test]
    fn test_unobserve_prevents_fire() {
        let mut page = page();
        page.register(target("a", 100.0));
        let mut obs = RevealObserver::new(0.1);
        obs.observe("a", Box::new(|_| Ok(())));
        obs.unobserve("a");
        assert!(obs.check(&mut page).is_empty());
    }

    #[test]
    fn test_threshold_clamped() {
        let obs = RevealObserver::new(2.5);
        assert!((obs.threshold - 1.0).abs() < f64::EPSILON);
    }
}
