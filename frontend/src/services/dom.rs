use gloo::utils::document;
use shared::{Axis, CalendarDom, Visibility};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::services::logging::Logger;

pub const MONTH_REGION_ID: &str = "calendar-content";
pub const WEEK_REGION_ID: &str = "calendar-week-content";
pub const WEEK_TOGGLE_ID: &str = "weekToggle";
pub const MONTH_TOGGLE_ID: &str = "monthToggle";

/// Region id written by each axis
pub fn region_id(axis: Axis) -> &'static str {
    match axis {
        Axis::Month => MONTH_REGION_ID,
        Axis::Week => WEEK_REGION_ID,
    }
}

/// Writes calendar state into the server-rendered page
#[derive(Clone, Default)]
pub struct BrowserDom;

impl BrowserDom {
    fn element(id: &str) -> Option<HtmlElement> {
        let element = document()
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        if element.is_none() {
            Logger::debug_with_component("dom", &format!("#{} not on this page", id));
        }
        element
    }

    fn set_shown(id: &str, shown: bool) {
        if let Some(element) = Self::element(id) {
            let style = element.style();
            // Removing the override restores the stylesheet's display value
            let result = if shown {
                style.remove_property("display").map(|_| ())
            } else {
                style.set_property("display", "none")
            };
            if let Err(e) = result {
                Logger::error_with_component("dom", &format!("Failed to toggle #{}: {:?}", id, e));
            }
        }
    }
}

impl CalendarDom for BrowserDom {
    fn replace_region(&self, axis: Axis, html: &str) {
        if let Some(element) = Self::element(region_id(axis)) {
            element.set_inner_html(html);
        }
    }

    fn apply_visibility(&self, visibility: Visibility) {
        Self::set_shown(WEEK_REGION_ID, visibility.week_region);
        Self::set_shown(WEEK_TOGGLE_ID, visibility.week_toggle);
        Self::set_shown(MONTH_REGION_ID, visibility.month_region);
        Self::set_shown(MONTH_TOGGLE_ID, visibility.month_toggle);
    }

    fn notify(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}
