use gloo::events::EventListener;
use gloo::utils::window;
use shared::CalendarCommand;
use yew::prelude::*;

use crate::services::page::viewport_width;

/// Reports the viewport width on mount and on every resize.
///
/// The width rule always overrides a manual toggle, so every resize is
/// forwarded even when it does not cross the breakpoint.
#[hook]
pub fn use_viewport_mode(on_command: Callback<CalendarCommand>) {
    use_effect_with((), move |_| {
        on_command.emit(CalendarCommand::ViewportChanged(viewport_width()));

        let listener = EventListener::new(&window(), "resize", move |_| {
            on_command.emit(CalendarCommand::ViewportChanged(viewport_width()));
        });

        move || drop(listener)
    });
}
