//! Wires preload, apply, the debounced resize listener and the daily refresh
//! into one controller with an explicit teardown.

use crate::applicator::{Applicator, Selection};
use crate::config::ImageConfig;
use crate::env::{Environment, Subscription, TimerSource};
use crate::preload::preload;
use crate::BackgroundError;
use log::{debug, error, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Runs an action once input has been quiet for `delay_ms`. Each trigger
/// replaces the pending timer, so at most one run is ever queued.
pub struct Debouncer {
    timers: Rc<dyn TimerSource>,
    delay_ms: u32,
    action: Rc<dyn Fn()>,
    pending: RefCell<Option<Subscription>>,
    armed: Rc<Cell<bool>>,
}

impl Debouncer {
    pub fn new(timers: Rc<dyn TimerSource>, delay_ms: u32, action: Rc<dyn Fn()>) -> Self {
        Self {
            timers,
            delay_ms,
            action,
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
        }
    }

    pub fn trigger(&self) {
        // Cancel any existing timer by replacing it
        self.pending.borrow_mut().take();

        let action = self.action.clone();
        let armed = self.armed.clone();
        armed.set(true);
        // The spent handle stays in `pending` until the next trigger; dropping
        // a timer from inside its own callback is not allowed.
        let handle = self.timers.timeout(
            self.delay_ms,
            Box::new(move || {
                armed.set(false);
                action();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
        self.armed.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }
}

/// The seasonal background controller: configuration plus the environment it
/// runs against.
pub struct SeasonalBackground {
    config: Rc<ImageConfig>,
    env: Environment,
    observer: Option<Rc<dyn Fn(&Selection)>>,
}

impl SeasonalBackground {
    pub fn new(config: ImageConfig, env: Environment) -> Result<Self, BackgroundError> {
        config.validate()?;
        Ok(Self {
            config: Rc::new(config),
            env,
            observer: None,
        })
    }

    /// Called with the selection after every successful apply.
    pub fn on_applied(mut self, observer: impl Fn(&Selection) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn applicator(&self) -> Applicator {
        Applicator::new(self.config.clone(), &self.env)
    }

    /// Preload, apply once, then keep the background current until the
    /// returned handle is disposed.
    pub fn start(&self) -> BackgroundHandle {
        preload(&self.config, self.env.loader.as_ref());

        let refresh = Rc::new(Refresh {
            applicator: self.applicator(),
            observer: self.observer.clone(),
        });
        refresh.run();

        let debouncer = {
            let refresh = refresh.clone();
            Rc::new(Debouncer::new(
                self.env.timers.clone(),
                self.config.debounce_ms,
                Rc::new(move || refresh.run()),
            ))
        };

        let resize = {
            let debouncer = debouncer.clone();
            self.env.resize.on_resize(Box::new(move || debouncer.trigger()))
        };

        let daily = {
            let refresh = refresh.clone();
            self.env
                .timers
                .interval(self.config.refresh_interval_ms, Box::new(move || refresh.run()))
        };

        debug!(
            "Seasonal background started: debounce {} ms, refresh every {} ms",
            self.config.debounce_ms, self.config.refresh_interval_ms
        );

        BackgroundHandle {
            resize: Some(resize),
            daily: Some(daily),
            debouncer,
        }
    }
}

/// One apply with the failure policy of the scheduled paths: log and carry on.
struct Refresh {
    applicator: Applicator,
    observer: Option<Rc<dyn Fn(&Selection)>>,
}

impl Refresh {
    fn run(&self) {
        match self.applicator.apply() {
            Ok(selection) => {
                if let Some(observer) = &self.observer {
                    observer(&selection);
                }
            }
            Err(BackgroundError::MissingRootElement) => {
                warn!("No page root element, background not applied");
            }
            Err(e @ BackgroundError::MissingSlot(_)) => {
                error!("Background configuration is inconsistent: {}", e);
                debug_assert!(false, "{}", e);
            }
            Err(e) => error!("Failed to apply background: {}", e),
        }
    }
}

/// Live registrations of a started controller. Dropping it has the same
/// effect as `dispose`.
pub struct BackgroundHandle {
    resize: Option<Subscription>,
    daily: Option<Subscription>,
    debouncer: Rc<Debouncer>,
}

impl BackgroundHandle {
    /// Remove the resize listener, clear the daily interval and drop any
    /// pending re-application.
    pub fn dispose(mut self) {
        self.teardown();
    }

    pub fn is_active(&self) -> bool {
        self.resize.is_some()
    }

    fn teardown(&mut self) {
        if self.resize.take().is_some() {
            debug!("Seasonal background disposed");
        }
        self.daily.take();
        self.debouncer.cancel();
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}
