//! Scroll-driven effects: progress bar, nav state, floating CTA, parallax,
//! and the frame-coalescing throttle they all share.
//!
//! Scroll notifications only mark a dirty flag; the actual recomputation
//! runs at most once per rendered frame, so a burst of notifications between
//! frames collapses into a single update.

use crate::capabilities::DeviceProfile;
use crate::dom::PageModel;

/// Scroll offset past which the nav bar gains its `scrolled` class.
pub const NAV_SCROLLED_OFFSET: f64 = 60.0;

/// Fraction of the viewport height the page must scroll before the
/// floating CTA appears.
pub const CTA_SHOW_FRACTION: f64 = 0.55;

/// Parallax translation factor applied to the hero image.
pub const PARALLAX_FACTOR: f64 = 0.32;

/// Scroll delta that closes an open mobile nav.
pub const MOBILE_NAV_CLOSE_DELTA: f64 = 40.0;

/// Scroll progress through the page as a percentage.
///
/// Returns `None` when the scrollable range is zero or negative (the page
/// fits in the viewport); callers skip the update rather than forcing an
/// arbitrary endpoint. Otherwise the value is clamped to [0, 100].
#[must_use]
pub fn scroll_progress(offset: f64, scrollable_range: f64) -> Option<f64> {
    if scrollable_range <= 0.0 {
        return None;
    }
    Some(((offset / scrollable_range) * 100.0).clamp(0.0, 100.0))
}

/// Coalesces a burst of notifications into one recomputation per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameThrottle {
    dirty: bool,
}

impl FrameThrottle {
    /// Create an idle throttle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification. Returns whether this one armed the throttle
    /// (further notifications before the next frame are absorbed).
    pub fn notify(&mut self) -> bool {
        let armed = !self.dirty;
        self.dirty = true;
        armed
    }

    /// Whether a recomputation is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.dirty
    }

    /// Consume the pending flag at frame time. Returns whether the
    /// recomputation should run this frame.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Element ids the scroll bindings write to.
#[derive(Debug, Clone)]
pub struct ScrollTargets {
    /// Progress bar element
    pub progress_bar: String,
    /// Nav bar element
    pub nav: String,
    /// Floating CTA wrapper
    pub floating_cta: String,
    /// Section the CTA links to; the CTA hides while it is on screen
    pub cta_section: String,
    /// Hero image receiving the parallax transform
    pub hero_image: String,
    /// Mobile nav drawer
    pub mobile_nav: String,
}

impl Default for ScrollTargets {
    fn default() -> Self {
        Self {
            progress_bar: "scroll-progress".to_string(),
            nav: "navbar".to_string(),
            floating_cta: "floating-cta".to_string(),
            cta_section: "cta".to_string(),
            hero_image: "hero-bg-img".to_string(),
            mobile_nav: "mobileNav".to_string(),
        }
    }
}

/// All continuous scroll bindings, recomputed once per coalesced frame.
///
/// Every binding is independent and tolerates its target being absent.
#[derive(Debug)]
pub struct ScrollEffects {
    targets: ScrollTargets,
    parallax_enabled: bool,
    cta_shown: bool,
    last_mobile_nav_y: f64,
}

impl ScrollEffects {
    /// Wire the bindings for a device profile. Parallax only runs on
    /// non-touch, non-mobile, motion-allowing profiles.
    #[must_use]
    pub fn new(targets: ScrollTargets, profile: &DeviceProfile) -> Self {
        Self {
            targets,
            parallax_enabled: !profile.touch && !profile.is_mobile() && profile.allows_motion(),
            cta_shown: false,
            last_mobile_nav_y: 0.0,
        }
    }

    /// Whether the parallax binding is active for this profile.
    #[must_use]
    pub const fn parallax_enabled(&self) -> bool {
        self.parallax_enabled
    }

    /// Recompute every binding from the page's current scroll offset.
    pub fn apply(&mut self, page: &mut PageModel) {
        let offset = page.scroll_y();
        self.apply_progress(page, offset);
        self.apply_nav(page, offset);
        self.apply_floating_cta(page, offset);
        self.apply_parallax(page, offset);
        self.apply_mobile_nav_close(page, offset);
    }

    fn apply_progress(&self, page: &mut PageModel, offset: f64) {
        if let Some(pct) = scroll_progress(offset, page.scroll_range()) {
            page.set_style(&self.targets.progress_bar, "width", &format!("{pct}%"));
        }
    }

    fn apply_nav(&self, page: &mut PageModel, offset: f64) {
        page.toggle_class(&self.targets.nav, "scrolled", offset > NAV_SCROLLED_OFFSET);
    }

    fn apply_floating_cta(&mut self, page: &mut PageModel, offset: f64) {
        let threshold = f64::from(page.viewport().height) * CTA_SHOW_FRACTION;
        let show = offset > threshold;
        if show != self.cta_shown {
            self.cta_shown = show;
            page.toggle_class(&self.targets.floating_cta, "visible", show);
        }

        // Suppress the CTA while its destination section is on screen.
        if page.contains(&self.targets.cta_section) {
            let on_screen = page
                .visible_fraction(&self.targets.cta_section)
                .is_some_and(|r| r > 0.0);
            let (opacity, events) = if on_screen { ("0", "none") } else { ("", "") };
            page.set_style(&self.targets.floating_cta, "opacity", opacity);
            page.set_style(&self.targets.floating_cta, "pointer-events", events);
        }
    }

    fn apply_parallax(&self, page: &mut PageModel, offset: f64) {
        if !self.parallax_enabled {
            return;
        }
        page.set_style(
            &self.targets.hero_image,
            "transform",
            &format!("translateY({}px) translateZ(0)", offset * PARALLAX_FACTOR),
        );
    }

    fn apply_mobile_nav_close(&mut self, page: &mut PageModel, offset: f64) {
        if !page.has_class(&self.targets.mobile_nav, "open") {
            return;
        }
        if (offset - self.last_mobile_nav_y).abs() > MOBILE_NAV_CLOSE_DELTA {
            page.remove_class(&self.targets.mobile_nav, "open");
        }
        self.last_mobile_nav_y = offset;
    }
}
