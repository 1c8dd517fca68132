mod hooks;
mod services;

use log::LevelFilter;
use yew::prelude::*;

use hooks::use_calendar::use_calendar;
use hooks::use_control_clicks::use_control_clicks;
use hooks::use_viewport_mode::use_viewport_mode;
use services::logging::{ConsoleLogger, Logger};
use services::page::PageContext;

#[derive(Properties, PartialEq)]
struct CalendarAppProps {
    context: PageContext,
}

/// Headless: all markup belongs to the server, this only wires events
#[function_component(CalendarApp)]
fn calendar_app(props: &CalendarAppProps) -> Html {
    let calendar = use_calendar(&props.context);
    use_viewport_mode(calendar.actions.dispatch.clone());
    use_control_clicks(calendar.actions.dispatch.clone());

    html! {}
}

fn main() {
    ConsoleLogger::init(LevelFilter::Info);

    match PageContext::read() {
        Ok(context) => {
            Logger::info_with_component(
                "calendar",
                &format!(
                    "Starting at {} (breakpoint {}px, stale responses {:?})",
                    context.seed, context.config.breakpoint_px, context.config.stale_responses
                ),
            );
            yew::Renderer::<CalendarApp>::with_props(CalendarAppProps { context }).render();
        }
        Err(e) => {
            Logger::error_with_component("calendar", &format!("Calendar disabled: {:#}", e));
        }
    }
}
