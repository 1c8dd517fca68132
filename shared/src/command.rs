use serde::{Deserialize, Serialize};

/// Every input the calendar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarCommand {
    PreviousMonth,
    NextMonth,
    PreviousWeek,
    NextWeek,
    ToggleToWeek,
    ToggleToMonth,
    ViewportChanged(u32),
}

/// How a page control is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSelector {
    Id(&'static str),
    Class(&'static str),
}

impl ControlSelector {
    pub fn matches(&self, id: &str, class_name: &str) -> bool {
        match self {
            ControlSelector::Id(expected) => id == *expected,
            ControlSelector::Class(expected) => class_name.split_whitespace().any(|c| c == *expected),
        }
    }
}

/// Controls rendered by the server fragments and the page around them.
///
/// The month arrows live inside the month fragment, so they are matched by
/// class; the rest are unique ids.
pub const CONTROL_BINDINGS: &[(ControlSelector, CalendarCommand)] = &[
    (ControlSelector::Class("month-prev"), CalendarCommand::PreviousMonth),
    (ControlSelector::Class("month-next"), CalendarCommand::NextMonth),
    (ControlSelector::Id("week-prev"), CalendarCommand::PreviousWeek),
    (ControlSelector::Id("week-next"), CalendarCommand::NextWeek),
    (ControlSelector::Id("weekToggle"), CalendarCommand::ToggleToWeek),
    (ControlSelector::Id("monthToggle"), CalendarCommand::ToggleToMonth),
];

impl CalendarCommand {
    /// Command bound to an element with the given id and class attribute
    pub fn for_control(id: &str, class_name: &str) -> Option<Self> {
        CONTROL_BINDINGS
            .iter()
            .find(|(selector, _)| selector.matches(id, class_name))
            .map(|(_, command)| *command)
    }

    /// Whether the command may issue a fragment fetch
    pub fn fetches(&self) -> bool {
        matches!(
            self,
            CalendarCommand::PreviousMonth
                | CalendarCommand::NextMonth
                | CalendarCommand::PreviousWeek
                | CalendarCommand::NextWeek
        )
    }
}
