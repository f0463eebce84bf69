//! Browser-backed capabilities built on `web-sys`, `js-sys` and the gloo crates.

use crate::env::{
    BackgroundTarget, ClockSource, ImageLoader, ResizeSource, StyleSurface, Subscription,
    TimerSource, ViewportSource,
};
use crate::BackgroundError;
use gloo_events::EventListener;
use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use std::rc::Rc;
use web_sys::{HtmlElement, HtmlImageElement};

/// Reads the month from `Date`, which uses the visitor's local time zone.
pub struct BrowserClock;

impl ClockSource for BrowserClock {
    fn current_month(&self) -> u32 {
        js_sys::Date::new_0().get_month() + 1
    }
}

/// `window.innerWidth`; reports 0 (narrow) when there is no window.
pub struct BrowserViewport;

impl ViewportSource for BrowserViewport {
    fn viewport_width(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

/// The document `<body>`.
pub struct DocumentBody;

impl BackgroundTarget for DocumentBody {
    fn root(&self) -> Option<Rc<dyn StyleSurface>> {
        let body = web_sys::window()?.document()?.body()?;
        let surface: Rc<dyn StyleSurface> = Rc::new(body);
        Some(surface)
    }
}

impl StyleSurface for HtmlElement {
    fn style_value(&self, property: &str) -> String {
        self.style().get_property_value(property).unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), BackgroundError> {
        self.style()
            .set_property(property, value)
            .map_err(|e| BackgroundError::Style {
                property: property.to_string(),
                detail: format!("{:?}", e),
            })
    }
}

/// Warms the cache by pointing a detached `<img>` at the URL.
pub struct BrowserImageLoader;

impl ImageLoader for BrowserImageLoader {
    fn load(&self, url: &str) {
        match HtmlImageElement::new() {
            Ok(img) => img.set_src(url),
            Err(e) => debug!("Skipping preload of {}: {:?}", url, e),
        }
    }
}

pub struct GlooTimers;

impl TimerSource for GlooTimers {
    fn timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription {
        Subscription::new(Timeout::new(delay_ms, callback))
    }

    fn interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        Subscription::new(Interval::new(period_ms, callback))
    }
}

/// `resize` events on `window`.
pub struct WindowResize;

impl ResizeSource for WindowResize {
    fn on_resize(&self, mut callback: Box<dyn FnMut()>) -> Subscription {
        let window = gloo_utils::window();
        Subscription::new(EventListener::new(&window, "resize", move |_| callback()))
    }
}

/// Run `callback` once the DOM is ready.
///
/// Runs it immediately when the document has finished parsing; otherwise
/// waits for `DOMContentLoaded` and returns the pending listener. Dropping
/// that subscription before the event fires cancels the wait.
pub fn when_document_ready(callback: Box<dyn FnOnce()>) -> Option<Subscription> {
    let document = gloo_utils::document();
    if !still_parsing(&document.ready_state()) {
        callback();
        return None;
    }

    let listener = EventListener::once(&document, "DOMContentLoaded", move |_| callback());
    Some(Subscription::new(listener))
}

/// `document.readyState` is `"loading"` until parsing finishes, then
/// `"interactive"` and `"complete"`.
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}
