//! Navigation core of the session calendar widget.
//!
//! Two independent controllers share nothing but the page:
//! - [`ViewModeController`] picks month or week display
//! - [`PeriodNavigator`] owns the month period and week anchor
//!
//! [`CalendarWidget`] consumes [`CalendarCommand`]s and drives both against a
//! [`FragmentFetcher`] and a [`CalendarDom`].

pub mod command;
pub mod config;
pub mod fragment;
pub mod navigator;
pub mod period;
pub mod view_mode;
pub mod widget;

pub use command::{CalendarCommand, ControlSelector, CONTROL_BINDINGS};
pub use config::{CalendarConfig, ConfigError, StaleResponsePolicy};
pub use fragment::{Axis, FragmentError, FragmentFetcher, FragmentParams, FragmentRequest, CSRF_PARAM};
pub use navigator::{FetchTicket, PendingFetch, PendingPeriod, PeriodNavigator};
pub use period::{week_start, MonthPeriod, WeekAnchor};
pub use view_mode::{DisplayMode, ViewModeController, Visibility, DEFAULT_BREAKPOINT_PX};
pub use widget::{CalendarDom, CalendarWidget, Clock, DispatchOutcome, SystemClock};
