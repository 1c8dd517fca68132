//! Values the surrounding page hands to the widget.
//!
//! The server template sets `window.CALENDAR_MONTH`, `window.CALENDAR_YEAR`
//! and `window.CSRF_TOKEN`, may set `window.WEEK_CALENDAR_DAY`, and may embed
//! a `<script type="application/json" id="calendar-config">` block.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use gloo::utils::{document, window};
use js_sys::Reflect;
use shared::{CalendarConfig, MonthPeriod, WeekAnchor};
use wasm_bindgen::JsValue;

use crate::services::logging::Logger;

pub const CONFIG_ELEMENT_ID: &str = "calendar-config";

#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub base_url: String,
    pub csrf_token: String,
    pub seed: MonthPeriod,
    pub week_anchor: Option<WeekAnchor>,
    pub config: CalendarConfig,
}

impl PageContext {
    pub fn read() -> Result<Self> {
        let config = read_config()?;
        let base_url = window()
            .location()
            .origin()
            .map_err(|e| anyhow!("window.location.origin unavailable: {:?}", e))?;

        let csrf_token = global_string("CSRF_TOKEN").unwrap_or_else(|| {
            Logger::warn_with_component("page", "CSRF_TOKEN not set, sending empty token");
            String::new()
        });

        let seed = seed_period(global_number("CALENDAR_MONTH"), global_number("CALENDAR_YEAR"))
            .unwrap_or_else(|| {
                let today = chrono::Local::now().date_naive();
                Logger::warn_with_component(
                    "page",
                    "CALENDAR_MONTH/CALENDAR_YEAR missing or invalid, seeding from today",
                );
                MonthPeriod::containing(today)
            });

        let week_anchor = global_string("WEEK_CALENDAR_DAY").and_then(|raw| parse_week_anchor(&raw));

        Ok(Self {
            base_url,
            csrf_token,
            seed,
            week_anchor,
            config,
        })
    }
}

/// Current viewport width in CSS pixels, excluding any scrollbar
pub fn viewport_width() -> u32 {
    let client_width = document()
        .document_element()
        .map(|root| root.client_width())
        .unwrap_or(0);
    if client_width > 0 {
        return client_width as u32;
    }

    window()
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .map(|width| width.max(0.0) as u32)
        .unwrap_or(0)
}

fn read_config() -> Result<CalendarConfig> {
    match document().get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => {
            let json = element.text_content().unwrap_or_default();
            CalendarConfig::from_json(&json).context("reading #calendar-config")
        }
        None => Ok(CalendarConfig::default()),
    }
}

fn global(name: &str) -> Option<JsValue> {
    Reflect::get(&window(), &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn global_string(name: &str) -> Option<String> {
    global(name).and_then(|value| value.as_string())
}

/// Accepts numbers and numeric strings, as templates emit either
fn global_number(name: &str) -> Option<f64> {
    let value = global(name)?;
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
}

pub fn seed_period(month: Option<f64>, year: Option<f64>) -> Option<MonthPeriod> {
    let (month, year) = (month?, year?);
    if month.fract() != 0.0 || year.fract() != 0.0 {
        return None;
    }
    MonthPeriod::new(month as u32, year as i32)
}

/// `YYYY-MM-DD`, normalised to the Monday of its week
pub fn parse_week_anchor(raw: &str) -> Option<WeekAnchor> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(WeekAnchor::containing)
}
