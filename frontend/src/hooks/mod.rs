pub mod use_calendar;
pub mod use_control_clicks;
pub mod use_viewport_mode;
