//! Capability traits for everything the controller reads from or does to the
//! page. The browser implementations live in `browser.rs`.

use crate::BackgroundError;
use std::any::Any;
use std::rc::Rc;

/// Current calendar month, 1-based.
pub trait ClockSource {
    fn current_month(&self) -> u32;
}

/// Current viewport width, read live on every call.
pub trait ViewportSource {
    fn viewport_width(&self) -> f64;
}

/// An element whose inline style can be read and written.
pub trait StyleSurface {
    /// Current inline value of `property`; empty when it is not set.
    fn style_value(&self, property: &str) -> String;

    /// Setting an empty value removes the declaration.
    fn set_style(&self, property: &str, value: &str) -> Result<(), BackgroundError>;
}

/// Locates the element that carries the page background.
pub trait BackgroundTarget {
    fn root(&self) -> Option<Rc<dyn StyleSurface>>;
}

/// Starts a fire-and-forget image fetch. Failures are never reported back.
pub trait ImageLoader {
    fn load(&self, url: &str);
}

/// One-shot and repeating timers. Dropping the returned subscription cancels
/// the timer.
pub trait TimerSource {
    fn timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription;
    fn interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription;
}

/// Viewport resize notifications. Dropping the returned subscription removes
/// the listener.
pub trait ResizeSource {
    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Subscription;
}

/// Keeps a timer or listener registered for as long as it lives.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription(Box<dyn Any>);

impl Subscription {
    /// Wrap any guard whose `Drop` tears the registration down, such as a
    /// `gloo_timers` timer or a `gloo_events` listener.
    pub fn new<G: 'static>(guard: G) -> Self {
        Subscription(Box::new(guard))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

/// The full set of capabilities a controller runs against.
#[derive(Clone)]
pub struct Environment {
    pub clock: Rc<dyn ClockSource>,
    pub viewport: Rc<dyn ViewportSource>,
    pub target: Rc<dyn BackgroundTarget>,
    pub loader: Rc<dyn ImageLoader>,
    pub timers: Rc<dyn TimerSource>,
    pub resize: Rc<dyn ResizeSource>,
}

impl Environment {
    /// Capabilities backed by the live browser window.
    pub fn browser() -> Self {
        use crate::browser::*;
        Self {
            clock: Rc::new(BrowserClock),
            viewport: Rc::new(BrowserViewport),
            target: Rc::new(DocumentBody),
            loader: Rc::new(BrowserImageLoader),
            timers: Rc::new(GlooTimers),
            resize: Rc::new(WindowResize),
        }
    }
}
