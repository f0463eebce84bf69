use crate::applicator::Selection;
use crate::config::ImageConfig;
use crate::env::Environment;
use crate::scheduler::SeasonalBackground;
use log::error;
use std::rc::Rc;
use yew::prelude::*;

/// Keeps the page background seasonal while the calling component is
/// mounted, and returns the most recently applied selection.
///
/// The controller is restarted whenever `config` changes and disposed when
/// the component unmounts.
#[hook]
pub fn use_seasonal_background(config: Rc<ImageConfig>) -> Option<Selection> {
    let selection_handle: UseStateHandle<Option<Selection>> = use_state(|| None);

    {
        // Clone the handle for the observer closure.
        let selection_setter = selection_handle.clone();

        use_effect_with(config, move |config| {
            let running = match SeasonalBackground::new((**config).clone(), Environment::browser()) {
                Ok(controller) => Some(
                    controller
                        .on_applied(move |s| selection_setter.set(Some(s.clone())))
                        .start(),
                ),
                Err(e) => {
                    error!("Seasonal background not started: {}", e);
                    None
                }
            };
            // Dropping the handle removes the listener and the timers
            move || drop(running)
        });
    }

    (*selection_handle).clone()
}
