//! Browser-free page model.
//!
//! A queryable in-memory document standing in for the real DOM: elements
//! carry an id, classes, text content, inline styles, and page-coordinate
//! geometry. Every effect in this crate mutates this model, which keeps the
//! whole pipeline observable from tests without a browser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capabilities::Viewport;

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether the point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Area shared with another rectangle, zero when disjoint.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let w = (self.right().min(other.right()) - self.left.max(other.left)).max(0.0);
        let h = (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0);
        w * h
    }

    /// Grow each edge outward by the given margins (negative shrinks).
    #[must_use]
    pub fn expanded(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            left: self.left - left,
            top: self.top - top,
            width: self.width + left + right,
            height: self.height + top + bottom,
        }
    }
}

/// Fraction of `element` visible within `root`, in [0, 1].
///
/// A zero-area element reports 1.0 when its point lies inside the root and
/// 0.0 otherwise, matching platform intersection reporting.
#[must_use]
pub fn visibility_ratio(element: &Rect, root: &Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        let (cx, cy) = element.center();
        return if root.contains_point(cx, cy) { 1.0 } else { 0.0 };
    }
    (element.intersection_area(root) / area).clamp(0.0, 1.0)
}

/// A page element: identity, classes, text, inline styles, geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element id
    pub id: String,
    /// Tag name
    pub tag: String,
    /// CSS classes
    pub classes: Vec<String>,
    /// Text content
    pub text_content: String,
    /// Inline style properties
    pub styles: HashMap<String, String>,
    /// Geometry in page coordinates
    pub rect: Rect,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            classes: Vec::new(),
            text_content: String::new(),
            styles: HashMap::new(),
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Set the geometry.
    #[must_use]
    pub const fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Whether the element carries a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, property: &str, value: &str) {
        self.styles
            .insert(property.to_string(), value.to_string());
    }

    /// Read an inline style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

/// In-memory document with scroll state.
#[derive(Debug, Clone)]
pub struct PageModel {
    viewport: Viewport,
    scroll_y: f64,
    content_height: f64,
    elements: HashMap<String, Element>,
    order: Vec<String>,
}

impl PageModel {
    /// Create an empty page for the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            content_height: f64::from(viewport.height),
            elements: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Total page height in pixels.
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
    }

    /// Viewport at page load.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current vertical scroll offset.
    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Set the vertical scroll offset. Extreme values are kept as-is; the
    /// consumers that care clamp their derived state.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_y = offset;
    }

    /// Scrollable range: content height minus viewport height. May be <= 0
    /// when the page fits in the viewport.
    #[must_use]
    pub fn scroll_range(&self) -> f64 {
        self.content_height - f64::from(self.viewport.height)
    }

    /// Viewport rectangle in page coordinates at the current scroll offset.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }

    /// Register an element. Elements without an id are not addressable and
    /// are dropped.
    pub fn register(&mut self, element: Element) {
        if element.id.is_empty() {
            return;
        }
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Look up an element mutably by id.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Whether an element exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Ids of all elements carrying any of the given classes, in
    /// registration order.
    #[must_use]
    pub fn query_classes(&self, classes: &[&str]) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(*id)
                    .is_some_and(|el| classes.iter().any(|c| el.has_class(c)))
            })
            .cloned()
            .collect()
    }

    /// Text content of an element.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|el| el.text_content.as_str())
    }

    /// Replace the text content of an element. Missing elements are ignored.
    pub fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text_content = text.to_string();
        }
    }

    /// Add a class to an element. Missing elements are ignored.
    pub fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.add_class(class);
        }
    }

    /// Remove a class from an element. Missing elements are ignored.
    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.remove_class(class);
        }
    }

    /// Whether an element carries a class.
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.has_class(class))
    }

    /// Toggle a class to match `on`.
    pub fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.elements.get_mut(id) {
            if on {
                el.add_class(class);
            } else {
                el.remove_class(class);
            }
        }
    }

    /// Set an inline style on an element. Missing elements are ignored.
    pub fn set_style(&mut self, id: &str, property: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.set_style(property, value);
        }
    }

    /// Read an inline style from an element.
    #[must_use]
    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.elements.get(id).and_then(|el| el.style(property))
    }

    /// Fraction of the element visible in the current viewport.
    #[must_use]
    pub fn visible_fraction(&self, id: &str) -> Option<f64> {
        let el = self.elements.get(id)?;
        Some(visibility_ratio(&el.rect, &self.viewport_rect()))
    }
}
