//! Minimal Yew app that keeps the page background seasonal.

use seasonal_background::{
    components::SeasonCaption, hooks::use_seasonal_background, logger, DEFAULT_CONFIG,
};
use std::rc::Rc;
use yew::prelude::*;

/// App root: mounts the controller for its lifetime and shows the caption.
#[function_component]
pub fn App() -> Html {
    let config = use_memo((), |_| DEFAULT_CONFIG.clone());
    let selection = use_seasonal_background(Rc::clone(&config));

    html! {
        <SeasonCaption selection={selection} />
    }
}

/// Entry point: installs logging and the panic hook, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
