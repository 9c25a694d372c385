//! End-to-end page lifecycle: a marketing page scrolled top to bottom.

use revelar::{
    DeviceProfile, EffectsEngine, Element, PageEvent, PageModel, Rect, Viewport,
};

const FRAME_MS: f64 = 16.7;

fn build_page() -> PageModel {
    let mut page = PageModel::new(Viewport::new(1280, 800));
    page.set_content_height(5000.0);
    page.register(Element::new("div").with_id("scroll-progress"));
    page.register(Element::new("nav").with_id("navbar"));
    page.register(Element::new("div").with_id("floating-cta"));
    page.register(Element::new("div").with_id("page-transition"));
    page.register(
        Element::new("h1")
            .with_id("hero-heading")
            .with_text("Find Your Place"),
    );
    page.register(
        Element::new("section")
            .with_id("about")
            .with_class("fade-in")
            .with_rect(Rect::new(0.0, 1100.0, 1280.0, 400.0)),
    );
    page.register(
        Element::new("hr")
            .with_id("divider")
            .with_class("gold-line")
            .with_rect(Rect::new(200.0, 1600.0, 880.0, 2.0)),
    );
    page.register(
        Element::new("span")
            .with_id("stat-sales")
            .with_class("stat-num")
            .with_text("$2M+")
            .with_rect(Rect::new(100.0, 2300.0, 200.0, 60.0)),
    );
    page.register(
        Element::new("span")
            .with_id("stat-rating")
            .with_class("stat-val")
            .with_text("4.9 Rating")
            .with_rect(Rect::new(400.0, 2300.0, 200.0, 60.0)),
    );
    page.register(
        Element::new("span")
            .with_id("stat-soon")
            .with_class("stat-num")
            .with_text("Coming Soon")
            .with_rect(Rect::new(700.0, 2300.0, 200.0, 60.0)),
    );
    page
}

fn scroll_and_frame(engine: &mut EffectsEngine, offset: f64, now_ms: f64) {
    engine.dispatch(PageEvent::Scroll { offset });
    engine.dispatch(PageEvent::Frame { now_ms });
}

#[test]
fn scrolling_through_the_page_reveals_everything_once() {
    let mut engine = EffectsEngine::new(build_page(), DeviceProfile::desktop());
    engine.dispatch(PageEvent::Frame { now_ms: 0.0 });

    // Above the fold nothing has revealed yet.
    assert!(!engine.page().has_class("about", "visible"));
    assert!(!engine.page().has_class("divider", "visible"));

    // Scroll in steps down to the stats section, ticking a frame each step.
    let mut now = 0.0;
    for step in 1..=20 {
        now += FRAME_MS;
        scroll_and_frame(&mut engine, f64::from(step) * 100.0, now);
    }

    assert!(engine.page().has_class("about", "visible"));
    assert!(engine.page().has_class("divider", "visible"));
    assert!(engine.page().has_class("navbar", "scrolled"));
    assert!(engine.page().has_class("floating-cta", "visible"));

    // Let the counter animations run to completion.
    for _ in 0..120 {
        now += FRAME_MS;
        engine.dispatch(PageEvent::Frame { now_ms: now });
    }
    assert_eq!(engine.page().text("stat-sales"), Some("$2M+"));
    assert_eq!(engine.page().text("stat-rating"), Some("4.9 Rating"));
    // The malformed counter is skipped, untouched, without blocking others.
    assert_eq!(engine.page().text("stat-soon"), Some("Coming Soon"));

    // Scrolling back up never re-runs one-shot reveals.
    engine.page_mut().remove_class("about", "visible");
    scroll_and_frame(&mut engine, 0.0, now + FRAME_MS);
    scroll_and_frame(&mut engine, 1000.0, now + 2.0 * FRAME_MS);
    assert!(!engine.page().has_class("about", "visible"));

    // And the progress bar tracked the whole way, clamped at the ends.
    scroll_and_frame(&mut engine, 99_999.0, now + 3.0 * FRAME_MS);
    assert_eq!(engine.page().style("scroll-progress", "width"), Some("100%"));
    scroll_and_frame(&mut engine, 0.0, now + 4.0 * FRAME_MS);
    assert_eq!(engine.page().style("scroll-progress", "width"), Some("0%"));
}

#[test]
fn reduced_motion_page_still_reveals_but_skips_transitions() {
    let profile = DeviceProfile::desktop().with_reduced_motion(true);
    let mut engine = EffectsEngine::new(build_page(), profile);
    engine.dispatch(PageEvent::Frame { now_ms: 0.0 });

    let mut now = 0.0;
    for step in 1..=20 {
        now += FRAME_MS;
        scroll_and_frame(&mut engine, f64::from(step) * 100.0, now);
    }
    // Reveals are content, not motion decoration: they still fire.
    assert!(engine.page().has_class("about", "visible"));

    // The page transition is skipped entirely.
    let outcome = engine.click_link("listings.html", false, now);
    assert_eq!(outcome, revelar::LinkActivation::PassThrough);
    assert_eq!(engine.page().style("page-transition", "opacity"), None);

    // No hero split, no ripple.
    assert!(engine.hero_split().is_none());
    assert!(engine.ripple_on("about", 100.0, 1200.0).is_none());
}

#[test]
fn phone_profile_uses_short_counter_duration() {
    let mut engine = EffectsEngine::new(build_page(), DeviceProfile::phone());
    engine.dispatch(PageEvent::Frame { now_ms: 0.0 });

    // Jump straight to the stats.
    scroll_and_frame(&mut engine, 2000.0, FRAME_MS);

    // After 900 ms the mobile counter has finished; the desktop duration
    // would still be mid-flight.
    let mut now = FRAME_MS;
    while now < FRAME_MS + 920.0 {
        now += FRAME_MS;
        engine.dispatch(PageEvent::Frame { now_ms: now });
    }
    assert_eq!(engine.page().text("stat-sales"), Some("$2M+"));
}
