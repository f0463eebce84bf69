//! In-memory stand-ins for the browser capabilities, driven by hand from tests.

use crate::env::{
    BackgroundTarget, ClockSource, Environment, ImageLoader, ResizeSource, StyleSurface,
    Subscription, TimerSource, ViewportSource,
};
use crate::BackgroundError;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Ordered record of `load` and `style` events shared between fakes.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Flips a shared flag when dropped; used as the guard inside fake subscriptions.
struct CancelOnDrop(Rc<Cell<bool>>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

pub struct FixedClock(pub Cell<u32>);

impl FixedClock {
    pub fn new(month: u32) -> Rc<Self> {
        Rc::new(FixedClock(Cell::new(month)))
    }
}

impl ClockSource for FixedClock {
    fn current_month(&self) -> u32 {
        self.0.get()
    }
}

pub struct FixedViewport(pub Cell<f64>);

impl FixedViewport {
    pub fn new(width: f64) -> Rc<Self> {
        Rc::new(FixedViewport(Cell::new(width)))
    }
}

impl ViewportSource for FixedViewport {
    fn viewport_width(&self) -> f64 {
        self.0.get()
    }
}

/// Style properties written so far plus a count of individual writes.
/// Writes to `reject` fail the way a browser refusing a value would.
#[derive(Default)]
pub struct RecordingSurface {
    pub styles: RefCell<BTreeMap<String, String>>,
    pub writes: Cell<usize>,
    pub reject: RefCell<Option<String>>,
    pub journal: Journal,
}

impl RecordingSurface {
    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.styles.borrow().clone()
    }
}

impl StyleSurface for RecordingSurface {
    fn style_value(&self, property: &str) -> String {
        self.style(property).unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), BackgroundError> {
        if self.reject.borrow().as_deref() == Some(property) {
            return Err(BackgroundError::Style {
                property: property.to_string(),
                detail: "rejected".to_string(),
            });
        }
        self.writes.set(self.writes.get() + 1);
        self.journal.borrow_mut().push(format!("style {}", property));
        let mut styles = self.styles.borrow_mut();
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// A page root that can be taken away to simulate a missing `<body>`.
pub struct RecordingTarget {
    pub surface: Rc<RecordingSurface>,
    pub present: Cell<bool>,
}

impl RecordingTarget {
    pub fn new(journal: Journal) -> Rc<Self> {
        Rc::new(RecordingTarget {
            surface: Rc::new(RecordingSurface {
                journal,
                ..RecordingSurface::default()
            }),
            present: Cell::new(true),
        })
    }
}

impl BackgroundTarget for RecordingTarget {
    fn root(&self) -> Option<Rc<dyn StyleSurface>> {
        if self.present.get() {
            let surface: Rc<dyn StyleSurface> = self.surface.clone();
            Some(surface)
        } else {
            None
        }
    }
}

#[derive(Default)]
pub struct RecordingLoader {
    pub urls: RefCell<Vec<String>>,
    pub journal: Journal,
}

impl ImageLoader for RecordingLoader {
    fn load(&self, url: &str) {
        self.journal.borrow_mut().push(format!("load {}", url));
        self.urls.borrow_mut().push(url.to_string());
    }
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Every(u32, Box<dyn FnMut()>),
}

struct Scheduled {
    due: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Task,
}

/// Virtual-time timers. Nothing fires until `advance` moves the clock.
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<u64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Scheduled>>,
}

impl ManualTimers {
    pub fn new() -> Rc<Self> {
        Rc::new(ManualTimers::default())
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Timers that are still armed.
    pub fn live(&self) -> usize {
        self.queue
            .borrow()
            .iter()
            .filter(|s| !s.cancelled.get())
            .count()
    }

    /// Move virtual time forward by `ms`, firing everything that comes due in
    /// order of due time.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                queue.retain(|s| !s.cancelled.get());
                let pos = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.seq))
                    .map(|(i, _)| i);
                pos.map(|i| queue.remove(i))
            };
            let Some(scheduled) = next else { break };
            self.now.set(scheduled.due);
            match scheduled.task {
                Task::Once(callback) => callback(),
                Task::Every(period, mut callback) => {
                    callback();
                    if !scheduled.cancelled.get() {
                        self.push(
                            scheduled.due + period.max(1) as u64,
                            scheduled.cancelled,
                            Task::Every(period, callback),
                        );
                    }
                }
            }
        }
        self.now.set(target);
    }

    fn push(&self, due: u64, cancelled: Rc<Cell<bool>>, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.queue.borrow_mut().push(Scheduled {
            due,
            seq,
            cancelled,
            task,
        });
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> Subscription {
        let cancelled = Rc::new(Cell::new(false));
        self.push(self.now.get() + delay_ms as u64, cancelled.clone(), task);
        Subscription::new(CancelOnDrop(cancelled))
    }
}

impl TimerSource for ManualTimers {
    fn timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription {
        self.schedule(delay_ms, Task::Once(callback))
    }

    fn interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        self.schedule(period_ms, Task::Every(period_ms, callback))
    }
}

/// Resize events fired by hand.
#[derive(Default)]
pub struct ManualResize {
    listeners: RefCell<Vec<(Rc<Cell<bool>>, Rc<RefCell<Box<dyn FnMut()>>>)>>,
}

impl ManualResize {
    pub fn new() -> Rc<Self> {
        Rc::new(ManualResize::default())
    }

    pub fn listeners(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(cancelled, _)| !cancelled.get())
            .count()
    }

    pub fn fire(&self) {
        let live: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(cancelled, _)| !cancelled.get())
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in live {
            (callback.borrow_mut().as_mut())();
        }
    }
}

impl ResizeSource for ManualResize {
    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Subscription {
        let cancelled = Rc::new(Cell::new(false));
        self.listeners
            .borrow_mut()
            .push((cancelled.clone(), Rc::new(RefCell::new(callback))));
        Subscription::new(CancelOnDrop(cancelled))
    }
}

/// Every fake wired together, with handles kept for inspection.
pub struct FakePage {
    pub journal: Journal,
    pub clock: Rc<FixedClock>,
    pub viewport: Rc<FixedViewport>,
    pub target: Rc<RecordingTarget>,
    pub loader: Rc<RecordingLoader>,
    pub timers: Rc<ManualTimers>,
    pub resize: Rc<ManualResize>,
}

impl FakePage {
    pub fn new(month: u32, width: f64) -> Self {
        let journal = Journal::default();
        FakePage {
            clock: FixedClock::new(month),
            viewport: FixedViewport::new(width),
            target: RecordingTarget::new(journal.clone()),
            loader: Rc::new(RecordingLoader {
                urls: RefCell::default(),
                journal: journal.clone(),
            }),
            journal,
            timers: ManualTimers::new(),
            resize: ManualResize::new(),
        }
    }

    pub fn environment(&self) -> Environment {
        Environment {
            clock: self.clock.clone(),
            viewport: self.viewport.clone(),
            target: self.target.clone(),
            loader: self.loader.clone(),
            timers: self.timers.clone(),
            resize: self.resize.clone(),
        }
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.target.surface
    }
}
