//! Animated numeric counters.
//!
//! A counter target's text is split into `(prefix, value, suffix)` around
//! its first contiguous numeric token, then the number is animated from 0 to
//! its end value with a cubic ease-out over a fixed duration. The animation
//! is a resumable [`FrameTask`] step function, so it runs against any clock.
//!
//! The numeric token is the first `digits[.digits]` run; a thousands
//! separator ends the token, and the separator plus everything after it is
//! kept verbatim in the suffix. Decimal places are inferred from the token
//! itself, so `"120 Homes Sold."` renders as an integer throughout.

use std::sync::OnceLock;

use regex::Regex;

use crate::capabilities::DeviceProfile;
use crate::dom::PageModel;
use crate::easing::Easing;
use crate::error::{RevelarError, RevelarResult};
use crate::frame::{FrameTask, StepOutcome};

/// Counter duration on mobile-sized viewports, in milliseconds.
pub const DURATION_MOBILE_MS: f64 = 900.0;

/// Counter duration on larger viewports, in milliseconds.
pub const DURATION_DESKTOP_MS: f64 = 1400.0;

#[allow(clippy::expect_used)] // the pattern is a checked constant
fn numeric_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\d+(\.\d+)?").expect("numeric token pattern is valid"))
}

/// Parsed counter text: the numeric token and its verbatim surroundings.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterText {
    /// Text before the numeric token, verbatim
    pub prefix: String,
    /// End value of the animation
    pub value: f64,
    /// Text after the numeric token, verbatim
    pub suffix: String,
    /// Fractional digits in the token, reused for rendering
    pub decimal_places: usize,
}

impl CounterText {
    /// Split text around its first contiguous numeric token.
    ///
    /// Returns [`RevelarError::UnparseableCounter`] when no token exists.
    pub fn parse(text: &str) -> RevelarResult<Self> {
        let m = numeric_token()
            .find(text)
            .ok_or_else(|| RevelarError::unparseable_counter(text))?;
        let token = m.as_str();
        let value: f64 = token
            .parse()
            .map_err(|_| RevelarError::unparseable_counter(text))?;
        let decimal_places = token
            .split_once('.')
            .map_or(0, |(_, frac)| frac.len());
        Ok(Self {
            prefix: text[..m.start()].to_string(),
            value,
            suffix: text[m.end()..].to_string(),
            decimal_places,
        })
    }

    /// Render the text with the given displayed value in place of the token.
    #[must_use]
    pub fn render(&self, displayed: f64) -> String {
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimal_places, displayed, self.suffix
        )
    }
}

/// Resumable counter animation for one element.
///
/// Each step renders `prefix + (end * eased) + suffix` into the element's
/// text. The step function answers [`StepOutcome::Done`] once progress
/// reaches 1, after rendering the exact end value.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: String,
    text: CounterText,
    duration_ms: f64,
}

impl CounterAnimation {
    /// Build an animation for the element's current text. The duration is
    /// chosen from the device profile: shorter on mobile-sized viewports.
    pub fn for_element(
        page: &PageModel,
        id: &str,
        profile: &DeviceProfile,
    ) -> RevelarResult<Self> {
        let raw = page
            .text(id)
            .ok_or_else(|| RevelarError::missing_element(id))?;
        let text = CounterText::parse(raw)?;
        Ok(Self {
            target: id.to_string(),
            text,
            duration_ms: duration_for(profile),
        })
    }

    /// Target element id.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Animation duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Displayed value at elapsed time `t` milliseconds.
    #[must_use]
    pub fn displayed(&self, elapsed_ms: f64) -> f64 {
        let p = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.text.value * Easing::CubicOut.evaluate(p)
    }
}

impl FrameTask for CounterAnimation {
    fn step(&mut self, start_ms: f64, now_ms: f64, page: &mut PageModel) -> StepOutcome {
        if !page.contains(&self.target) {
            return StepOutcome::Done;
        }
        let elapsed = now_ms - start_ms;
        let displayed = self.displayed(elapsed);
        page.set_text(&self.target, &self.text.render(displayed));
        if elapsed >= self.duration_ms {
            StepOutcome::Done
        } else {
            StepOutcome::Reschedule
        }
    }
}

/// Counter duration for a device profile.
#[must_use]
pub fn duration_for(profile: &DeviceProfile) -> f64 {
    if profile.is_mobile() {
        DURATION_MOBILE_MS
    } else {
        DURATION_DESKTOP_MS
    }
}
