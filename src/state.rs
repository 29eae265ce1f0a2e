// Application state owned by main and passed explicitly to the load flow and the console.
use crate::filter::{status_line, ListingFilter};
use crate::model::{FetchError, Listing};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub const LOADING_STATUS: &str = "Loading listings…";

/// Issued by `begin_load`; a completed load only lands if no newer load landed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(usize),
    Stale,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct AppState {
    listings: Vec<Listing>,
    filter: ListingFilter,
    status: String,
    loaded_at: Option<DateTime<Utc>>,
    issued: u64,
    settled: u64,
}

impl AppState {
    pub fn new(filter: ListingFilter) -> Self {
        Self { filter, ..Self::default() }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.status = LOADING_STATUS.into();
        info!("Load #{} started", self.issued);
        LoadTicket(self.issued)
    }

    /// Settles a load. Listings arrive in delivery order and are stored newest first.
    /// Failures keep the previous listings.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Listing>, FetchError>) -> LoadOutcome {
        if ticket.0 <= self.settled {
            warn!("Discarding stale load #{} (load #{} already landed)", ticket.0, self.settled);
            return LoadOutcome::Stale;
        }
        self.settled = ticket.0;

        match result {
            Ok(listings) => {
                let count = listings.len();
                self.replace(listings);
                info!("Load #{} applied: {} listing(s)", ticket.0, count);
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                warn!("Load #{} failed: {}", ticket.0, e);
                self.status = e.status_message();
                LoadOutcome::Failed(self.status.clone())
            }
        }
    }

    fn replace(&mut self, mut listings: Vec<Listing>) {
        listings.reverse();
        self.listings = listings;
        self.loaded_at = Some(Utc::now());
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        self.status = status_line(self.visible().len());
    }

    pub fn set_filter(&mut self, filter: ListingFilter) {
        self.filter = filter;
        if !self.is_loading() {
            self.refresh_status();
        }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn visible(&self) -> Vec<&Listing> {
        self.filter.apply(&self.listings)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(titles: &[&str]) -> Vec<Listing> {
        titles
            .iter()
            .map(|t| Listing { title: t.to_string(), ..Listing::default() })
            .collect()
    }

    fn titles(state: &AppState) -> Vec<&str> {
        state.listings().iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn applied_load_is_reversed() {
        let mut state = AppState::default();
        let ticket = state.begin_load();
        assert_eq!(state.status(), LOADING_STATUS);
        assert!(state.is_loading());
        assert_eq!(state.complete_load(ticket, Ok(listings(&["a", "b", "c"]))), LoadOutcome::Applied(3));
        assert_eq!(titles(&state), ["c", "b", "a"]);
        assert_eq!(state.status(), "Showing 3 listing(s).");
        assert!(state.loaded_at().is_some());
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_keeps_previous_listings() {
        let mut state = AppState::default();
        let first = state.begin_load();
        state.complete_load(first, Ok(listings(&["a"])));
        let second = state.begin_load();
        assert_eq!(titles(&state), ["a"]);
        let outcome = state.complete_load(second, Err(FetchError::Status(500)));
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(titles(&state), ["a"]);
        assert_eq!(state.status(), "Could not load the listings.");
    }

    #[test]
    fn slow_earlier_load_cannot_overwrite_newer_one() {
        let mut state = AppState::default();
        let slow = state.begin_load();
        let fast = state.begin_load();
        assert!(slow < fast);
        assert_eq!(state.complete_load(fast, Ok(listings(&["new"]))), LoadOutcome::Applied(1));
        assert_eq!(state.complete_load(slow, Ok(listings(&["old"]))), LoadOutcome::Stale);
        assert_eq!(titles(&state), ["new"]);
    }

    #[test]
    fn loads_landing_in_order_both_apply() {
        let mut state = AppState::default();
        let first = state.begin_load();
        let second = state.begin_load();
        assert_eq!(state.complete_load(first, Ok(listings(&["one"]))), LoadOutcome::Applied(1));
        assert!(state.is_loading());
        assert_eq!(state.complete_load(second, Ok(listings(&["two"]))), LoadOutcome::Applied(1));
        assert_eq!(titles(&state), ["two"]);
    }

    #[test]
    fn filter_change_updates_status() {
        let mut state = AppState::default();
        let ticket = state.begin_load();
        state.complete_load(ticket, Ok(listings(&["Casa", "Piso"])));
        state.set_filter(ListingFilter { query: "zzz".into(), ..Default::default() });
        assert!(state.visible().is_empty());
        assert_eq!(state.status(), "No listings match the filter.");
    }
}
