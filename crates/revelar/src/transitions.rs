//! Page transitions, filter switching, and the hero heading split.

use crate::capabilities::DeviceProfile;
use crate::dom::PageModel;

/// Delay between raising the overlay and performing the navigation, ms.
pub const TRANSITION_DELAY_MS: f64 = 340.0;

/// Delay before the filtered grid fades back in, ms.
pub const FILTER_RESTORE_DELAY_MS: f64 = 250.0;

/// Animation delay of the first hero character, seconds.
pub const SPLIT_BASE_DELAY_S: f64 = 0.38;

/// Additional delay per character index, seconds.
pub const SPLIT_STEP_DELAY_S: f64 = 0.026;

/// Outcome of activating a link under the page-transition binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkActivation {
    /// Default navigation proceeds untouched
    PassThrough,
    /// Overlay raised; navigate to the href after [`TRANSITION_DELAY_MS`]
    Deferred {
        /// Navigation destination
        href: String,
    },
}

/// Overlay-based transition applied to internal link navigation.
///
/// Anchor, `mailto:`, and `tel:` links and links opening a new tab keep
/// their default behavior, as does everything when the profile prefers
/// reduced motion.
#[derive(Debug)]
pub struct PageTransition {
    overlay: String,
    enabled: bool,
}

impl PageTransition {
    /// Bind the transition to an overlay element.
    #[must_use]
    pub fn new(overlay: &str, profile: &DeviceProfile) -> Self {
        Self {
            overlay: overlay.to_string(),
            enabled: profile.allows_motion(),
        }
    }

    /// Whether a link is exempt from the transition.
    #[must_use]
    pub fn is_exempt(href: &str, opens_new_tab: bool) -> bool {
        href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto")
            || href.starts_with("tel")
            || opens_new_tab
    }

    /// Handle a link activation. When the transition applies, the overlay
    /// is raised and the caller performs the navigation after
    /// [`TRANSITION_DELAY_MS`].
    pub fn activate(
        &self,
        href: &str,
        opens_new_tab: bool,
        page: &mut PageModel,
    ) -> LinkActivation {
        if !self.enabled || Self::is_exempt(href, opens_new_tab) {
            return LinkActivation::PassThrough;
        }
        page.set_style(&self.overlay, "opacity", "1");
        LinkActivation::Deferred {
            href: href.to_string(),
        }
    }
}

/// Exclusive-active filter buttons with a grid fade on switch.
#[derive(Debug)]
pub struct FilterSwitch {
    buttons: Vec<String>,
    grid: Option<String>,
}

impl FilterSwitch {
    /// Create a switch over the given button ids and optional grid.
    #[must_use]
    pub fn new(buttons: Vec<String>, grid: Option<String>) -> Self {
        Self { buttons, grid }
    }

    /// Activate one button: it becomes the only `active` button and the
    /// grid fades out. Returns whether a grid restore is due after
    /// [`FILTER_RESTORE_DELAY_MS`].
    pub fn select(&self, button: &str, page: &mut PageModel) -> bool {
        for id in &self.buttons {
            page.toggle_class(id, "active", id == button);
        }
        let Some(grid) = &self.grid else {
            return false;
        };
        page.set_style(grid, "opacity", "0");
        page.set_style(grid, "transform", "translateY(6px)");
        page.set_style(grid, "transition", "opacity .22s,transform .22s");
        true
    }

    /// Restore the grid after the fade delay has elapsed.
    pub fn restore(&self, page: &mut PageModel) {
        if let Some(grid) = &self.grid {
            page.set_style(grid, "opacity", "1");
            page.set_style(grid, "transform", "none");
        }
    }
}

/// One hero heading character with its animation delay.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitChar {
    /// The character
    pub ch: char,
    /// Animation delay in seconds, rounded to milliseconds
    pub delay_s: f64,
}

/// Split heading text into per-character spans with staggered delays.
///
/// Spaces advance the stagger index without producing a span, so the
/// cadence reads naturally across word gaps. Skipped entirely on mobile
/// and reduced-motion profiles; the caller leaves the heading untouched.
#[must_use]
pub fn split_heading(text: &str, profile: &DeviceProfile) -> Option<Vec<SplitChar>> {
    if profile.is_mobile() || !profile.allows_motion() {
        return None;
    }
    let mut idx = 0usize;
    let mut chars = Vec::new();
    for ch in text.chars() {
        if ch == ' ' {
            idx += 1;
            continue;
        }
        let delay = SPLIT_BASE_DELAY_S + idx as f64 * SPLIT_STEP_DELAY_S;
        chars.push(SplitChar {
            ch,
            delay_s: (delay * 1000.0).round() / 1000.0,
        });
        idx += 1;
    }
    Some(chars)
}
