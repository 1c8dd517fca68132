//! # Period Navigator
//!
//! Owns the committed month period and week anchor and hands out fetch
//! requests for the neighbouring periods.
//!
//! ## Lifecycle of a navigation:
//! 1. `begin_*` computes the candidate period from the *committed* state and
//!    returns a [`PendingFetch`]. Committed state is not touched.
//! 2. The caller performs the fetch.
//! 3. On success the caller hands the ticket back to [`PeriodNavigator::commit`].
//!    On failure nothing is committed.
//!
//! Every `begin_*` bumps a per-axis generation counter. Under
//! [`StaleResponsePolicy::Discard`] only the ticket carrying the latest
//! generation for its axis is accepted.

use chrono::NaiveDate;

use crate::config::{CalendarConfig, StaleResponsePolicy};
use crate::fragment::{Axis, FragmentRequest};
use crate::period::{MonthPeriod, WeekAnchor};

/// Candidate period carried by a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPeriod {
    Month(MonthPeriod),
    Week(WeekAnchor),
}

/// Proof that a request was issued, redeemed on success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    target: PendingPeriod,
}

impl FetchTicket {
    pub fn axis(&self) -> Axis {
        match self.target {
            PendingPeriod::Month(_) => Axis::Month,
            PendingPeriod::Week(_) => Axis::Week,
        }
    }

    pub fn target(&self) -> PendingPeriod {
        self.target
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A request ready to send plus the ticket that commits it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub request: FragmentRequest,
}

#[derive(Debug, Clone)]
pub struct PeriodNavigator {
    month: MonthPeriod,
    week: Option<WeekAnchor>,
    month_generation: u64,
    week_generation: u64,
    month_endpoint: String,
    week_endpoint: String,
    stale_responses: StaleResponsePolicy,
}

impl PeriodNavigator {
    /// Create a navigator seeded with the month the server rendered
    pub fn new(seed: MonthPeriod, config: &CalendarConfig) -> Self {
        Self {
            month: seed,
            week: None,
            month_generation: 0,
            week_generation: 0,
            month_endpoint: config.month_endpoint.clone(),
            week_endpoint: config.week_endpoint.clone(),
            stale_responses: config.stale_responses,
        }
    }

    /// Seed the week axis with an anchor the page already rendered
    pub fn with_week_anchor(mut self, anchor: WeekAnchor) -> Self {
        self.week = Some(anchor);
        self
    }

    pub fn current_month(&self) -> MonthPeriod {
        self.month
    }

    pub fn current_week(&self) -> Option<WeekAnchor> {
        self.week
    }

    pub fn begin_previous_month(&mut self) -> PendingFetch {
        let candidate = self.month.previous();
        self.begin_month(candidate)
    }

    pub fn begin_next_month(&mut self) -> PendingFetch {
        let candidate = self.month.next();
        self.begin_month(candidate)
    }

    /// `today` seeds the anchor when the week axis has not been used yet
    pub fn begin_previous_week(&mut self, today: NaiveDate) -> PendingFetch {
        let candidate = self.week_anchor_or_seed(today).previous();
        self.begin_week(candidate)
    }

    pub fn begin_next_week(&mut self, today: NaiveDate) -> PendingFetch {
        let candidate = self.week_anchor_or_seed(today).next();
        self.begin_week(candidate)
    }

    /// Whether a response for `ticket` may still affect state or the user
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        match self.stale_responses {
            StaleResponsePolicy::LastWins => true,
            StaleResponsePolicy::Discard => ticket.generation == self.latest_generation(ticket.axis()),
        }
    }

    /// Commit the ticket's period. Returns false if the ticket was stale and
    /// discarded.
    pub fn commit(&mut self, ticket: &FetchTicket) -> bool {
        if !self.accepts(ticket) {
            log::warn!(
                "📅 Discarding stale {:?} response (generation {} < {})",
                ticket.axis(),
                ticket.generation,
                self.latest_generation(ticket.axis())
            );
            return false;
        }

        match ticket.target {
            PendingPeriod::Month(period) => {
                self.month = period;
                log::info!("📅 Navigated to month {}", period);
            }
            PendingPeriod::Week(anchor) => {
                self.week = Some(anchor);
                log::info!("📅 Navigated to {}", anchor);
            }
        }
        true
    }

    fn latest_generation(&self, axis: Axis) -> u64 {
        match axis {
            Axis::Month => self.month_generation,
            Axis::Week => self.week_generation,
        }
    }

    fn week_anchor_or_seed(&mut self, today: NaiveDate) -> WeekAnchor {
        *self.week.get_or_insert_with(|| {
            let anchor = WeekAnchor::containing(today);
            log::debug!("📅 Seeding week axis with {}", anchor);
            anchor
        })
    }

    fn begin_month(&mut self, candidate: MonthPeriod) -> PendingFetch {
        self.month_generation += 1;
        log::debug!("📅 Requesting month {} (generation {})", candidate, self.month_generation);
        PendingFetch {
            ticket: FetchTicket {
                generation: self.month_generation,
                target: PendingPeriod::Month(candidate),
            },
            request: FragmentRequest {
                axis: Axis::Month,
                endpoint: self.month_endpoint.clone(),
                params: candidate.into(),
            },
        }
    }

    fn begin_week(&mut self, candidate: WeekAnchor) -> PendingFetch {
        self.week_generation += 1;
        log::debug!("📅 Requesting {} (generation {})", candidate, self.week_generation);
        PendingFetch {
            ticket: FetchTicket {
                generation: self.week_generation,
                target: PendingPeriod::Week(candidate),
            },
            request: FragmentRequest {
                axis: Axis::Week,
                endpoint: self.week_endpoint.clone(),
                params: candidate.into(),
            },
        }
    }
}
