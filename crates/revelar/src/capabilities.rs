//! Device capability snapshot.
//!
//! Touch support, motion preference, pointer class, and viewport size are
//! sampled once at startup and carried as an immutable value. Components take
//! the snapshot by reference at construction time; nothing reads ambient
//! global state mid-run.

use serde::{Deserialize, Serialize};

/// Widest viewport still treated as mobile, in logical pixels.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Viewport dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Immutable capability snapshot taken at page initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Whether the primary input is touch
    pub touch: bool,
    /// Whether the user prefers reduced motion
    pub reduced_motion: bool,
    /// Whether a hover-capable, fine pointer is present
    pub hover_pointer: bool,
    /// Viewport dimensions at snapshot time
    pub viewport: Viewport,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

impl DeviceProfile {
    /// Snapshot for a desktop browser: fine pointer, no touch, full motion.
    #[must_use]
    pub fn desktop() -> Self {
        Self {
            touch: false,
            reduced_motion: false,
            hover_pointer: true,
            viewport: Viewport::default(),
        }
    }

    /// Snapshot for a phone: touch, coarse pointer, narrow viewport.
    #[must_use]
    pub fn phone() -> Self {
        Self {
            touch: true,
            reduced_motion: false,
            hover_pointer: false,
            viewport: Viewport::new(390, 844),
        }
    }

    /// Set the viewport.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set touch support.
    #[must_use]
    pub const fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    /// Set the reduced-motion preference.
    #[must_use]
    pub const fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Set hover-capable fine-pointer support.
    #[must_use]
    pub const fn with_hover_pointer(mut self, hover: bool) -> Self {
        self.hover_pointer = hover;
        self
    }

    /// Whether the viewport is mobile-sized.
    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.viewport.width <= MOBILE_MAX_WIDTH
    }

    /// Whether motion-heavy effects may run.
    #[must_use]
    pub const fn allows_motion(&self) -> bool {
        !self.reduced_motion
    }
}
