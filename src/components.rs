//! Small Yew view components around the seasonal background.

use crate::applicator::Selection;
use yew::prelude::*;

/// Human-readable caption for the background currently on the page.
pub fn caption_text(selection: &Selection) -> String {
    format!(
        "Month {} · season {} · {} screen · {}",
        selection.month, selection.slot, selection.screen, selection.filename
    )
}

#[derive(Properties, PartialEq)]
pub struct SeasonCaptionProps {
    pub selection: Option<Selection>,
}

/// Shows which image was picked, or nothing until the first apply.
#[function_component(SeasonCaption)]
pub fn season_caption(props: &SeasonCaptionProps) -> Html {
    match &props.selection {
        Some(selection) => html! {
            <div class="season-caption" title={selection.path.clone()}>
                { caption_text(selection) }
            </div>
        },
        None => html! {},
    }
}
