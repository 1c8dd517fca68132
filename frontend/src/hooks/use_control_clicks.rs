use gloo::events::EventListener;
use gloo::utils::document;
use shared::CalendarCommand;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};
use yew::prelude::*;

use crate::services::logging::Logger;

/// Delegated click handling for calendar controls.
///
/// The prev/next arrows arrive inside fetched fragments and are replaced on
/// every navigation, so a single listener on the document resolves clicks
/// instead of per-element handlers.
#[hook]
pub fn use_control_clicks(on_command: Callback<CalendarCommand>) {
    use_effect_with((), move |_| {
        let listener = EventListener::new(&document(), "click", move |event| {
            if let Some(command) = command_for_event(event) {
                Logger::debug_with_component("control-clicks", &format!("Click -> {:?}", command));
                on_command.emit(command);
            }
        });

        move || drop(listener)
    });
}

fn command_for_event(event: &Event) -> Option<CalendarCommand> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    command_for_element(&target)
}

/// Nearest control at or above `element`
pub fn command_for_element(element: &Element) -> Option<CalendarCommand> {
    let mut current = Some(element.clone());
    while let Some(element) = current {
        if let Some(command) = CalendarCommand::for_control(&element.id(), &element.class_name()) {
            return Some(command);
        }
        current = element.parent_element();
    }
    None
}
