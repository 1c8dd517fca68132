//! # Calendar Widget
//!
//! Ties the view-mode controller and the period navigator to the outside
//! world through two seams:
//! - [`FragmentFetcher`] performs the network read
//! - [`CalendarDom`] writes to the page
//!
//! All methods take `&self` so overlapping navigations can be in flight at the
//! same time, exactly as rapid clicks produce in the browser. State lives in
//! `RefCell`s that are never borrowed across an await.

use std::cell::RefCell;

use chrono::NaiveDate;

use crate::command::CalendarCommand;
use crate::fragment::{Axis, FragmentError, FragmentFetcher};
use crate::navigator::{PendingFetch, PeriodNavigator};
use crate::period::{MonthPeriod, WeekAnchor};
use crate::view_mode::{DisplayMode, ViewModeController, Visibility};

/// Page-side effects of the widget
pub trait CalendarDom {
    /// Replace the inner markup of the region owned by `axis`
    fn replace_region(&self, axis: Axis, html: &str);
    fn apply_visibility(&self, visibility: Visibility);
    /// Blocking user notification
    fn notify(&self, message: &str);
}

/// Source of "today" for seeding the week axis
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// What a dispatched command ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    ViewChanged(Visibility),
    Committed(Axis),
    Failed(FragmentError),
    /// A newer request on the same axis superseded this one
    Discarded,
}

pub struct CalendarWidget<F, D, C = SystemClock> {
    fetcher: F,
    dom: D,
    clock: C,
    navigator: RefCell<PeriodNavigator>,
    view_mode: RefCell<ViewModeController>,
}

impl<F, D> CalendarWidget<F, D, SystemClock>
where
    F: FragmentFetcher,
    D: CalendarDom,
{
    pub fn new(fetcher: F, dom: D, navigator: PeriodNavigator, view_mode: ViewModeController) -> Self {
        Self::with_clock(fetcher, dom, SystemClock, navigator, view_mode)
    }
}

impl<F, D, C> CalendarWidget<F, D, C>
where
    F: FragmentFetcher,
    D: CalendarDom,
    C: Clock,
{
    pub fn with_clock(
        fetcher: F,
        dom: D,
        clock: C,
        navigator: PeriodNavigator,
        view_mode: ViewModeController,
    ) -> Self {
        Self {
            fetcher,
            dom,
            clock,
            navigator: RefCell::new(navigator),
            view_mode: RefCell::new(view_mode),
        }
    }

    pub fn current_month(&self) -> MonthPeriod {
        self.navigator.borrow().current_month()
    }

    pub fn current_week(&self) -> Option<WeekAnchor> {
        self.navigator.borrow().current_week()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.view_mode.borrow().mode()
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub async fn dispatch(&self, command: CalendarCommand) -> DispatchOutcome {
        match command {
            CalendarCommand::PreviousMonth => self.go_to_previous_month().await,
            CalendarCommand::NextMonth => self.go_to_next_month().await,
            CalendarCommand::PreviousWeek => self.go_to_previous_week().await,
            CalendarCommand::NextWeek => self.go_to_next_week().await,
            CalendarCommand::ToggleToWeek => self.update_view(|view| view.activate_week_mode()),
            CalendarCommand::ToggleToMonth => self.update_view(|view| view.activate_month_mode()),
            CalendarCommand::ViewportChanged(width) => self.update_view(|view| view.viewport_changed(width)),
        }
    }

    pub async fn go_to_previous_month(&self) -> DispatchOutcome {
        let pending = self.navigator.borrow_mut().begin_previous_month();
        self.navigate(pending).await
    }

    pub async fn go_to_next_month(&self) -> DispatchOutcome {
        let pending = self.navigator.borrow_mut().begin_next_month();
        self.navigate(pending).await
    }

    pub async fn go_to_previous_week(&self) -> DispatchOutcome {
        let today = self.clock.today();
        let pending = self.navigator.borrow_mut().begin_previous_week(today);
        self.navigate(pending).await
    }

    pub async fn go_to_next_week(&self) -> DispatchOutcome {
        let today = self.clock.today();
        let pending = self.navigator.borrow_mut().begin_next_week(today);
        self.navigate(pending).await
    }

    fn update_view(&self, change: impl FnOnce(&mut ViewModeController) -> Visibility) -> DispatchOutcome {
        let visibility = change(&mut *self.view_mode.borrow_mut());
        self.dom.apply_visibility(visibility);
        DispatchOutcome::ViewChanged(visibility)
    }

    async fn navigate(&self, pending: PendingFetch) -> DispatchOutcome {
        let PendingFetch { ticket, request } = pending;
        let result = self.fetcher.fetch(&request).await;

        match result {
            Ok(html) => {
                if !self.navigator.borrow_mut().commit(&ticket) {
                    return DispatchOutcome::Discarded;
                }
                self.dom.replace_region(ticket.axis(), &html);
                DispatchOutcome::Committed(ticket.axis())
            }
            Err(error) => {
                if !self.navigator.borrow().accepts(&ticket) {
                    log::warn!("📅 Ignoring failure of superseded request: {}", error);
                    return DispatchOutcome::Discarded;
                }
                log::warn!("📅 Fragment fetch to {} failed: {}", request.endpoint, error);
                self.dom.notify(error.message());
                DispatchOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarConfig, StaleResponsePolicy};
    use crate::fragment::{FragmentParams, FragmentRequest};
    use crate::view_mode::DEFAULT_BREAKPOINT_PX;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type FetchResult = Result<String, FragmentError>;

    /// Answers each request immediately from a script
    #[derive(Default)]
    struct ScriptedFetcher {
        responses: RefCell<VecDeque<FetchResult>>,
        requests: RefCell<Vec<FragmentRequest>>,
    }

    impl ScriptedFetcher {
        fn with(responses: Vec<FetchResult>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl FragmentFetcher for ScriptedFetcher {
        async fn fetch(&self, request: &FragmentRequest) -> FetchResult {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(FragmentError::fetch_failed("no scripted response")))
        }
    }

    /// Holds each request open until the test releases it
    struct GatedFetcher {
        gates: RefCell<VecDeque<oneshot::Receiver<FetchResult>>>,
        requests: RefCell<Vec<FragmentRequest>>,
    }

    #[async_trait(?Send)]
    impl FragmentFetcher for GatedFetcher {
        async fn fetch(&self, request: &FragmentRequest) -> FetchResult {
            self.requests.borrow_mut().push(request.clone());
            let gate = self.gates.borrow_mut().pop_front().expect("a gate per request");
            gate.await
                .unwrap_or_else(|_| Err(FragmentError::fetch_failed("gate dropped")))
        }
    }

    #[derive(Default)]
    struct RecordingDom {
        month_html: RefCell<Option<String>>,
        week_html: RefCell<Option<String>>,
        visibility: RefCell<Option<Visibility>>,
        notifications: RefCell<Vec<String>>,
    }

    impl CalendarDom for RecordingDom {
        fn replace_region(&self, axis: Axis, html: &str) {
            let region = match axis {
                Axis::Month => &self.month_html,
                Axis::Week => &self.week_html,
            };
            *region.borrow_mut() = Some(html.to_string());
        }

        fn apply_visibility(&self, visibility: Visibility) {
            *self.visibility.borrow_mut() = Some(visibility);
        }

        fn notify(&self, message: &str) {
            self.notifications.borrow_mut().push(message.to_string());
        }
    }

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn widget_with<F: FragmentFetcher>(
        fetcher: F,
        month: u32,
        year: i32,
        config: &CalendarConfig,
    ) -> CalendarWidget<F, RecordingDom, FixedClock> {
        CalendarWidget::with_clock(
            fetcher,
            RecordingDom::default(),
            FixedClock(date(2024, 12, 31)),
            PeriodNavigator::new(MonthPeriod::new(month, year).unwrap(), config),
            ViewModeController::new(config.breakpoint_px, 1280),
        )
    }

    #[tokio::test]
    async fn test_previous_month_success_commits_and_renders() {
        let fetcher = ScriptedFetcher::with(vec![Ok("<div>Feb</div>".to_string())]);
        let widget = widget_with(fetcher, 3, 2024, &CalendarConfig::default());

        let outcome = widget.dispatch(CalendarCommand::PreviousMonth).await;

        assert_eq!(outcome, DispatchOutcome::Committed(Axis::Month));
        let requests = widget.fetcher.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].params, FragmentParams { month: 2, year: 2024, day: None });
        assert_eq!(widget.dom().month_html.borrow().as_deref(), Some("<div>Feb</div>"));
        assert_eq!(widget.current_month(), MonthPeriod::new(2, 2024).unwrap());
    }

    #[tokio::test]
    async fn test_previous_month_from_january_requests_december() {
        let fetcher = ScriptedFetcher::with(vec![Ok("<table></table>".to_string())]);
        let widget = widget_with(fetcher, 1, 2024, &CalendarConfig::default());

        widget.go_to_previous_month().await;

        let requests = widget.fetcher.requests.borrow();
        assert_eq!(requests[0].params, FragmentParams { month: 12, year: 2023, day: None });
        assert_eq!(widget.current_month(), MonthPeriod::new(12, 2023).unwrap());
    }

    #[tokio::test]
    async fn test_failure_leaves_period_and_notifies() {
        let fetcher = ScriptedFetcher::with(vec![Err(FragmentError::fetch_failed("Network Error"))]);
        let widget = widget_with(fetcher, 3, 2024, &CalendarConfig::default());

        let outcome = widget.go_to_next_month().await;

        assert_eq!(outcome, DispatchOutcome::Failed(FragmentError::fetch_failed("Network Error")));
        assert_eq!(widget.current_month(), MonthPeriod::new(3, 2024).unwrap());
        assert!(widget.dom().month_html.borrow().is_none());
        assert_eq!(*widget.dom().notifications.borrow(), vec!["Network Error".to_string()]);
    }

    #[tokio::test]
    async fn test_week_navigation_across_year_boundary() {
        let fetcher = ScriptedFetcher::with(vec![
            Ok("<div>w1</div>".to_string()),
            Ok("<div>w2</div>".to_string()),
        ]);
        let widget = widget_with(fetcher, 12, 2024, &CalendarConfig::default());

        // Clock says Tuesday 2024-12-31, so the seed is Monday 2024-12-30
        widget.dispatch(CalendarCommand::NextWeek).await;
        assert_eq!(widget.current_week().unwrap().date(), date(2025, 1, 6));

        widget.dispatch(CalendarCommand::NextWeek).await;
        assert_eq!(widget.current_week().unwrap().date(), date(2025, 1, 13));

        let requests = widget.fetcher.requests.borrow();
        assert_eq!(requests[0].endpoint, "/ajax-week-calendar/");
        assert_eq!(requests[0].params, FragmentParams { month: 1, year: 2025, day: Some(6) });
        assert_eq!(requests[1].params, FragmentParams { month: 1, year: 2025, day: Some(13) });
        assert_eq!(widget.dom().week_html.borrow().as_deref(), Some("<div>w2</div>"));
        assert!(widget.dom().month_html.borrow().is_none());
    }

    #[tokio::test]
    async fn test_failed_week_step_keeps_seeded_anchor() {
        let fetcher = ScriptedFetcher::with(vec![Err(FragmentError::fetch_failed("Not Found"))]);
        let widget = widget_with(fetcher, 12, 2024, &CalendarConfig::default());

        widget.go_to_previous_week().await;

        assert_eq!(widget.current_week().unwrap().date(), date(2024, 12, 30));
        assert_eq!(*widget.dom().notifications.borrow(), vec!["Not Found".to_string()]);
    }

    #[tokio::test]
    async fn test_view_commands_never_touch_periods() {
        let widget = widget_with(ScriptedFetcher::default(), 5, 2024, &CalendarConfig::default());
        assert_eq!(widget.display_mode(), DisplayMode::Month);

        let outcome = widget.dispatch(CalendarCommand::ToggleToWeek).await;
        assert_eq!(outcome, DispatchOutcome::ViewChanged(Visibility::for_mode(DisplayMode::Week)));
        assert_eq!(*widget.dom().visibility.borrow(), Some(Visibility::for_mode(DisplayMode::Week)));

        widget.dispatch(CalendarCommand::ViewportChanged(DEFAULT_BREAKPOINT_PX + 1)).await;
        assert_eq!(widget.display_mode(), DisplayMode::Month);

        widget.dispatch(CalendarCommand::ViewportChanged(DEFAULT_BREAKPOINT_PX)).await;
        assert_eq!(widget.display_mode(), DisplayMode::Week);

        widget.dispatch(CalendarCommand::ToggleToMonth).await;
        assert_eq!(widget.display_mode(), DisplayMode::Month);

        assert!(widget.fetcher.requests.borrow().is_empty());
        assert_eq!(widget.current_month(), MonthPeriod::new(5, 2024).unwrap());
        assert!(widget.current_week().is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_responses_discard_stale() {
        let (feb_tx, feb_rx) = oneshot::channel();
        let (apr_tx, apr_rx) = oneshot::channel();
        let fetcher = GatedFetcher {
            gates: RefCell::new(VecDeque::from(vec![feb_rx, apr_rx])),
            requests: RefCell::new(Vec::new()),
        };
        let widget = widget_with(fetcher, 3, 2024, &CalendarConfig::default());

        let (first, second, _) = tokio::join!(
            widget.dispatch(CalendarCommand::PreviousMonth),
            widget.dispatch(CalendarCommand::NextMonth),
            async {
                tokio::task::yield_now().await;
                apr_tx.send(Ok("<div>Apr</div>".to_string())).unwrap();
                feb_tx.send(Ok("<div>Feb</div>".to_string())).unwrap();
            }
        );

        assert_eq!(first, DispatchOutcome::Discarded);
        assert_eq!(second, DispatchOutcome::Committed(Axis::Month));
        assert_eq!(widget.current_month(), MonthPeriod::new(4, 2024).unwrap());
        assert_eq!(widget.dom().month_html.borrow().as_deref(), Some("<div>Apr</div>"));
    }

    #[tokio::test]
    async fn test_stale_failure_is_not_shown() {
        let (old_tx, old_rx) = oneshot::channel();
        let (new_tx, new_rx) = oneshot::channel();
        let fetcher = GatedFetcher {
            gates: RefCell::new(VecDeque::from(vec![old_rx, new_rx])),
            requests: RefCell::new(Vec::new()),
        };
        let widget = widget_with(fetcher, 3, 2024, &CalendarConfig::default());

        let (first, second, _) = tokio::join!(
            widget.dispatch(CalendarCommand::NextWeek),
            widget.dispatch(CalendarCommand::NextWeek),
            async {
                tokio::task::yield_now().await;
                old_tx.send(Err(FragmentError::fetch_failed("timeout"))).unwrap();
                new_tx.send(Ok("<div>week</div>".to_string())).unwrap();
            }
        );

        assert_eq!(first, DispatchOutcome::Discarded);
        assert_eq!(second, DispatchOutcome::Committed(Axis::Week));
        assert!(widget.dom().notifications.borrow().is_empty());
        // Both clicks computed their target from the same committed anchor
        let requests = widget.fetcher.requests.borrow();
        assert_eq!(requests[0].params, requests[1].params);
    }

    #[tokio::test]
    async fn test_last_wins_policy_notifies_every_failure() {
        let config = CalendarConfig {
            stale_responses: StaleResponsePolicy::LastWins,
            ..CalendarConfig::default()
        };
        let fetcher = ScriptedFetcher::with(vec![
            Err(FragmentError::fetch_failed("Bad Gateway")),
            Err(FragmentError::fetch_failed("Network Error")),
        ]);
        let widget = widget_with(fetcher, 3, 2024, &config);

        widget.go_to_next_month().await;
        widget.go_to_next_month().await;

        assert_eq!(
            *widget.dom().notifications.borrow(),
            vec!["Bad Gateway".to_string(), "Network Error".to_string()]
        );
        assert_eq!(widget.current_month(), MonthPeriod::new(3, 2024).unwrap());
    }
}
