use std::rc::Rc;

use shared::{CalendarCommand, CalendarWidget, DispatchOutcome, PeriodNavigator, ViewModeController};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::dom::BrowserDom;
use crate::services::logging::Logger;
use crate::services::page::{viewport_width, PageContext};

pub type BrowserCalendar = CalendarWidget<ApiClient, BrowserDom>;

#[derive(Clone, PartialEq)]
pub struct UseCalendarActions {
    pub dispatch: Callback<CalendarCommand>,
}

pub struct UseCalendarResult {
    pub actions: UseCalendarActions,
}

/// Assemble the widget from what the page provided
pub fn build_calendar(context: &PageContext) -> BrowserCalendar {
    let mut navigator = PeriodNavigator::new(context.seed, &context.config);
    if let Some(anchor) = context.week_anchor {
        navigator = navigator.with_week_anchor(anchor);
    }

    CalendarWidget::new(
        ApiClient::new(context.base_url.clone(), context.csrf_token.clone()),
        BrowserDom,
        navigator,
        ViewModeController::new(context.config.breakpoint_px, viewport_width()),
    )
}

#[hook]
pub fn use_calendar(context: &PageContext) -> UseCalendarResult {
    let calendar: Rc<BrowserCalendar> = {
        let context = context.clone();
        use_memo((), move |_| build_calendar(&context))
    };

    // Each command runs to completion on its own; nothing is serialized
    let dispatch = {
        let calendar = calendar.clone();
        use_callback((), move |command: CalendarCommand, _| {
            let calendar = calendar.clone();
            if command.fetches() {
                Logger::debug_with_component("calendar", &format!("Navigating: {:?}", command));
            }

            spawn_local(async move {
                match calendar.dispatch(command).await {
                    DispatchOutcome::Committed(axis) => {
                        Logger::debug_with_component(
                            "calendar",
                            &format!("{:?} region now shows {}", axis, describe(&calendar, axis)),
                        );
                    }
                    DispatchOutcome::Failed(error) => {
                        Logger::error_with_component("calendar", &format!("{:?} failed: {}", command, error));
                    }
                    DispatchOutcome::ViewChanged(_) | DispatchOutcome::Discarded => {}
                }
            });
        })
    };

    UseCalendarResult {
        actions: UseCalendarActions { dispatch },
    }
}

fn describe(calendar: &BrowserCalendar, axis: shared::Axis) -> String {
    match axis {
        shared::Axis::Month => calendar.current_month().to_string(),
        shared::Axis::Week => calendar
            .current_week()
            .map(|anchor| anchor.to_string())
            .unwrap_or_default(),
    }
}
