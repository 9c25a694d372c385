//! Pointer-driven effects: cursor follower, card tilt, ripple.
//!
//! Independent features sharing the frame substrate. Each is gated by the
//! device profile at construction: the cursor follower needs a hover-capable
//! fine pointer, tilt additionally needs motion allowed, and ripple only
//! needs motion allowed.

use crate::capabilities::DeviceProfile;
use crate::dom::{PageModel, Rect};
use crate::frame::{FrameTask, StepOutcome};

/// Lerp factor the ring moves toward the pointer each frame.
pub const RING_LERP: f64 = 0.1;

/// Fraction of the pointer-to-center distance applied as magnetic pull.
pub const MAGNETIC_FACTOR: f64 = 0.22;

/// Pull radius for the magnetic effect, in pixels.
pub const MAGNETIC_RADIUS: f64 = 100.0;

/// Ring scale while the pointer is pressed.
pub const PRESS_SCALE: f64 = 0.7;

/// Maximum card tilt, in degrees.
pub const MAX_TILT_DEG: f64 = 7.0;

/// Ripple diameter as a multiple of the larger card dimension.
pub const RIPPLE_SIZE_FACTOR: f64 = 1.6;

/// Shared cursor state driven by pointer events and read by the ring loop.
///
/// The dot tracks the pointer directly; the ring trails it through a lerp
/// applied once per frame by [`CursorRingTask`]. The ring task runs as a
/// continuous loop and is cancelled from outside when the follower is torn
/// down.
#[derive(Debug)]
pub struct CursorFollower {
    dot: String,
    ring: String,
    pointer: (f64, f64),
    ring_pos: (f64, f64),
    magnet: (f64, f64),
}

impl CursorFollower {
    /// Create a follower when the profile has a hover-capable fine pointer.
    #[must_use]
    pub fn for_profile(dot: &str, ring: &str, profile: &DeviceProfile) -> Option<Self> {
        if !profile.hover_pointer {
            return None;
        }
        Some(Self {
            dot: dot.to_string(),
            ring: ring.to_string(),
            pointer: (0.0, 0.0),
            ring_pos: (0.0, 0.0),
            magnet: (0.0, 0.0),
        })
    }

    /// Track a pointer move: the dot snaps to the pointer immediately.
    pub fn pointer_move(&mut self, x: f64, y: f64, page: &mut PageModel) {
        self.pointer = (x, y);
        page.set_style(&self.dot, "left", &format!("{x}px"));
        page.set_style(&self.dot, "top", &format!("{y}px"));
    }

    /// Pointer entered an interactive element. Within the pull radius of
    /// its center, the ring is biased toward it.
    pub fn enter_interactive(&mut self, element_rect: &Rect) {
        let (cx, cy) = element_rect.center();
        let dx = cx - self.pointer.0;
        let dy = cy - self.pointer.1;
        if dx.hypot(dy) < MAGNETIC_RADIUS {
            self.magnet = (dx * MAGNETIC_FACTOR, dy * MAGNETIC_FACTOR);
        }
    }

    /// Pointer left the interactive element; the pull resets.
    pub fn leave_interactive(&mut self) {
        self.magnet = (0.0, 0.0);
    }

    /// Pointer pressed: the ring contracts.
    pub fn press(&self, page: &mut PageModel) {
        page.set_style(
            &self.ring,
            "transform",
            &format!("translate(-50%,-50%) scale({PRESS_SCALE})"),
        );
    }

    /// Pointer released: the ring returns to full size.
    pub fn release(&self, page: &mut PageModel) {
        page.set_style(&self.ring, "transform", "translate(-50%,-50%) scale(1)");
    }

    /// Pointer left the window: hide dot and ring.
    pub fn window_leave(&self, page: &mut PageModel) {
        page.set_style(&self.dot, "opacity", "0");
        page.set_style(&self.ring, "opacity", "0");
    }

    /// Pointer re-entered the window.
    pub fn window_enter(&self, page: &mut PageModel) {
        page.set_style(&self.dot, "opacity", "1");
        page.set_style(&self.ring, "opacity", ".45");
    }

    /// Advance the ring one frame toward the (magnet-biased) pointer.
    pub fn step_ring(&mut self, page: &mut PageModel) {
        let target_x = self.pointer.0 + self.magnet.0;
        let target_y = self.pointer.1 + self.magnet.1;
        self.ring_pos.0 += (target_x - self.ring_pos.0) * RING_LERP;
        self.ring_pos.1 += (target_y - self.ring_pos.1) * RING_LERP;
        page.set_style(&self.ring, "left", &format!("{}px", self.ring_pos.0));
        page.set_style(&self.ring, "top", &format!("{}px", self.ring_pos.1));
    }

    /// Current ring position.
    #[must_use]
    pub const fn ring_position(&self) -> (f64, f64) {
        self.ring_pos
    }
}

/// The ring lerp as a continuous frame task. Always reschedules; the loop
/// ends only via [`crate::frame::FrameLoop::cancel`].
impl FrameTask for CursorFollower {
    fn step(&mut self, _start_ms: f64, _now_ms: f64, page: &mut PageModel) -> StepOutcome {
        self.step_ring(page);
        StepOutcome::Reschedule
    }
}

/// Per-card tilt state. Pointer moves record the desired rotation; at most
/// one style write happens per frame; pointer leave drops the pending write
/// and clears the transform.
#[derive(Debug)]
pub struct CardTilt {
    target: String,
    pending: Option<(f64, f64)>,
}

impl CardTilt {
    /// Create a tilt binding when the profile is a motion-allowing desktop.
    #[must_use]
    pub fn for_profile(target: &str, profile: &DeviceProfile) -> Option<Self> {
        if !profile.hover_pointer || !profile.allows_motion() {
            return None;
        }
        Some(Self {
            target: target.to_string(),
            pending: None,
        })
    }

    /// Target element id.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Record the pointer position within the card. `x` and `y` are page
    /// coordinates; the rotation is derived from the offset from the card
    /// center, capped at [`MAX_TILT_DEG`].
    pub fn pointer_move(&mut self, x: f64, y: f64, card: &Rect) {
        if card.width <= 0.0 || card.height <= 0.0 {
            return;
        }
        let fx = ((x - card.left) / card.width - 0.5).clamp(-0.5, 0.5);
        let fy = ((y - card.top) / card.height - 0.5).clamp(-0.5, 0.5);
        self.pending = Some((-fy * MAX_TILT_DEG, fx * MAX_TILT_DEG));
    }

    /// Whether a style write is waiting for the next frame.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the pending rotation, if any. One write per frame.
    pub fn frame(&mut self, page: &mut PageModel) {
        let Some((rx, ry)) = self.pending.take() else {
            return;
        };
        // f64 renders -0 as "-0"; keep zero angles unsigned in style text.
        let rx = if rx == 0.0 { 0.0 } else { rx };
        let shadow_x = ry * 1.2;
        let shadow_x = if shadow_x == 0.0 { 0.0 } else { -shadow_x };
        page.set_style(
            &self.target,
            "transform",
            &format!(
                "perspective(900px) rotateX({rx}deg) rotateY({ry}deg) translateY(-6px) scale(1.008)"
            ),
        );
        page.set_style(
            &self.target,
            "box-shadow",
            &format!("{shadow_x}px {}px 44px rgba(28,43,45,.13)", rx * 1.2 + 10.0),
        );
        page.set_style(&self.target, "transition", "box-shadow .08s");
    }

    /// Pointer left the card: drop the pending write and restore the
    /// resting state with a soft transition back.
    pub fn pointer_leave(&mut self, page: &mut PageModel) {
        self.pending = None;
        page.set_style(&self.target, "transform", "");
        page.set_style(&self.target, "box-shadow", "");
        page.set_style(
            &self.target,
            "transition",
            "transform .4s ease, box-shadow .4s ease",
        );
    }
}

/// Geometry of a spawned ripple circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    /// Circle diameter
    pub size: f64,
    /// Left offset within the card
    pub x: f64,
    /// Top offset within the card
    pub y: f64,
}

/// Circle spawned by a pointer-down at `(x, y)` page coordinates on a card:
/// diameter 1.6 × the larger card dimension, centered on the pointer.
#[must_use]
pub fn ripple_geometry(card: &Rect, x: f64, y: f64) -> RippleGeometry {
    let size = card.width.max(card.height) * RIPPLE_SIZE_FACTOR;
    RippleGeometry {
        size,
        x: (x - card.left) - size / 2.0,
        y: (y - card.top) - size / 2.0,
    }
}
