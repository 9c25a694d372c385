//! Revelar: deterministic scroll-driven page effects.
//!
//! A single-threaded, event-driven engine for the decorative behavior of a
//! static marketing site, built against an in-memory page model so every
//! effect is testable without a browser. The core is the viewport reveal
//! scheduler: a set of watched targets whose one-shot actions fire exactly
//! once when an element crosses a visibility threshold, evaluated in
//! batches rather than per scroll event.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       EffectsEngine                          │
//! │                                                              │
//! │  scroll ──► FrameThrottle ──┐                                │
//! │  frame ─────────────────────┼──► ScrollEffects (progress,    │
//! │                             │     nav, CTA, parallax)        │
//! │                             └──► RevealObserver ──► actions  │
//! │                                   (fade, gold line, counter) │
//! │  pointer ──► CursorFollower / CardTilt / ripple              │
//! │  frame ────► FrameLoop (counter + ring step functions)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Device capabilities are sampled once into a [`DeviceProfile`] and passed
//! by reference into every component; per-frame animation is expressed as
//! resumable step functions driven by an injectable clock.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod capabilities;
pub mod clock;
pub mod counter;
pub mod dom;
pub mod easing;
pub mod engine;
pub mod error;
pub mod frame;
pub mod observer;
pub mod pointer;
pub mod scroll;
pub mod transitions;

pub use capabilities::{DeviceProfile, Viewport, MOBILE_MAX_WIDTH};
pub use clock::{FrameClock, SystemClock, VirtualClock};
pub use counter::{CounterAnimation, CounterText};
pub use dom::{Element, PageModel, Rect};
pub use easing::Easing;
pub use engine::{EffectsEngine, PageEvent};
pub use error::{RevelarError, RevelarResult};
pub use frame::{FrameLoop, FrameTask, StepOutcome, TaskId};
pub use observer::{IntersectionEntry, RevealObserver, RootMargin};
pub use pointer::{ripple_geometry, CardTilt, CursorFollower, RippleGeometry};
pub use scroll::{scroll_progress, FrameThrottle, ScrollEffects, ScrollTargets};
pub use transitions::{split_heading, FilterSwitch, LinkActivation, PageTransition, SplitChar};
