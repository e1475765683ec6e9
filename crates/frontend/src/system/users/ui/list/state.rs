use contracts::shared::list_page::Page;
use contracts::system::users::{AdminUser, AdminUserListParams, UserStatus};
use leptos::prelude::*;

use crate::shared::debounce::{Debounce, DebounceTicket, SEARCH_DEBOUNCE_MS};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Enabled, StatusFilter::Disabled];

    /// "All" means no `status` parameter at all.
    pub fn as_param(self) -> Option<UserStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Enabled => Some(UserStatus::Enabled),
            StatusFilter::Disabled => Some(UserStatus::Disabled),
        }
    }

    /// `<select>` option value.
    pub fn value(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Enabled => "1",
            StatusFilter::Disabled => "0",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "1" => StatusFilter::Enabled,
            "0" => StatusFilter::Disabled,
            _ => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Enabled => "Enable",
            StatusFilter::Disabled => "Disable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one list request; only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Everything a page fetch depends on. Equal keys never refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey {
    pub search: String,
    pub status_filter: StatusFilter,
    pub page: usize,
    pub page_size: usize,
    revision: u64,
}

impl QueryKey {
    pub fn params(&self) -> AdminUserListParams {
        let search = self.search.trim();
        AdminUserListParams {
            search: (!search.is_empty()).then(|| search.to_string()),
            status: self.status_filter.as_param(),
            page: Some(self.page),
            page_size: Some(self.page_size),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsersListState {
    pub items: Vec<AdminUser>,
    /// What the search box shows.
    pub search_input: String,
    /// What requests use; trails `search_input` by the debounce window.
    pub search: String,
    pub status_input: StatusFilter,
    pub status_filter: StatusFilter,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Server-reported record count.
    pub total: usize,
    pub phase: LoadPhase,
    pub error: Option<String>,
    revision: u64,
    generation: u64,
    search_debounce: Debounce,
    delete_candidate: Option<AdminUser>,
    deleting: bool,
}

impl Default for UsersListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_input: String::new(),
            search: String::new(),
            status_input: StatusFilter::All,
            status_filter: StatusFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            phase: LoadPhase::Idle,
            error: None,
            revision: 0,
            generation: 0,
            search_debounce: Debounce::new(SEARCH_DEBOUNCE_MS),
            delete_candidate: None,
            deleting: false,
        }
    }
}

impl UsersListState {
    pub fn query_key(&self) -> QueryKey {
        QueryKey {
            search: self.search.clone(),
            status_filter: self.status_filter,
            page: self.page,
            page_size: self.page_size,
            revision: self.revision,
        }
    }

    pub fn query(&self) -> AdminUserListParams {
        self.query_key().params()
    }

    pub fn total_pages(&self) -> usize {
        if self.total == 0 || self.page_size == 0 {
            1
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Keystroke in the search box. Returns the timer the caller must arm.
    pub fn type_search(&mut self, value: String, now_ms: u64) -> DebounceTicket {
        self.search_input = value;
        self.search_debounce.schedule(now_ms)
    }

    pub fn search_delay_ms(&self) -> u32 {
        self.search_debounce.delay_ms()
    }

    /// Debounce timer elapsed. Commits the raw input only if no newer
    /// keystroke superseded `ticket`.
    pub fn search_timer_elapsed(&mut self, ticket: DebounceTicket) -> bool {
        if !self.search_debounce.fire(ticket) {
            return false;
        }
        let value = self.search_input.clone();
        self.commit_search(value);
        true
    }

    /// Drop the pending keystroke timer (page unmount).
    pub fn cancel_search(&mut self) {
        self.search_debounce.cancel();
    }

    pub fn commit_search(&mut self, value: String) {
        self.search = value;
        self.page = 1;
    }

    /// "Filter" button: commit both inputs now, bypassing the debounce.
    pub fn apply_filters(&mut self) {
        self.search_debounce.cancel();
        self.search = self.search_input.clone();
        self.status_filter = self.status_input;
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.search_debounce.cancel();
        self.search_input.clear();
        self.search.clear();
        self.status_input = StatusFilter::All;
        self.status_filter = StatusFilter::All;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn change_page_size(&mut self, size: usize) {
        if size > 0 && size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Force the next fetch even though the query did not change.
    pub fn invalidate(&mut self) {
        self.revision += 1;
    }

    /// New records are expected on the first page.
    pub fn after_create(&mut self) {
        self.page = 1;
        self.invalidate();
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.error = None;
        FetchTicket(self.generation)
    }

    /// Apply a fetch result. A ticket superseded by a newer fetch is
    /// discarded and `false` is returned.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Page<AdminUser>, String>) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.phase = LoadPhase::Ready;
                // A delete can leave us past the last page.
                if self.page > self.total_pages() {
                    self.page = self.total_pages();
                }
            }
            Err(e) => {
                self.phase = LoadPhase::Failed;
                self.error = Some(e);
            }
        }
        true
    }

    pub fn delete_candidate(&self) -> Option<&AdminUser> {
        self.delete_candidate.as_ref()
    }

    pub fn request_delete(&mut self, user: AdminUser) {
        self.delete_candidate = Some(user);
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// The record to send the delete for, unless one is already in flight.
    pub fn begin_delete(&mut self) -> Option<AdminUser> {
        if self.deleting {
            return None;
        }
        let user = self.delete_candidate.clone()?;
        self.deleting = true;
        Some(user)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_candidate = None;
        self.deleting = false;
    }

    /// Keeps the candidate so the confirmation can be retried.
    pub fn delete_failed(&mut self) {
        self.deleting = false;
    }

    pub fn delete_completed(&mut self) {
        self.delete_candidate = None;
        self.deleting = false;
        self.invalidate();
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserId;

    fn user(id: i64) -> AdminUser {
        AdminUser {
            id: UserId::Number(id),
            email: format!("u{}@site.io", id),
            first_name: None,
            last_name: None,
            avatar: None,
            status: UserStatus::Enabled,
            date_joined: None,
        }
    }

    fn page(items: usize, total: usize) -> Page<AdminUser> {
        Page {
            items: (0..items as i64).map(user).collect(),
            total,
        }
    }

    #[test]
    fn debounced_search_commits_last_value_and_resets_page() {
        let mut state = UsersListState::default();
        state.total = 100;
        state.go_to_page(4);

        let t0 = state.type_search("a".into(), 0);
        let t1 = state.type_search("al".into(), 100);
        let t2 = state.type_search("ali".into(), 200);
        assert_eq!(state.search_input, "ali");
        assert_eq!(state.search, "");

        assert!(!state.search_timer_elapsed(t0));
        assert!(!state.search_timer_elapsed(t1));
        assert_eq!(state.page, 4);

        assert_eq!(t2.due_at_ms, 600);
        assert!(state.search_timer_elapsed(t2));
        assert_eq!(state.search, "ali");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn cancelled_search_never_commits() {
        let mut state = UsersListState::default();
        let ticket = state.type_search("gone".into(), 0);
        state.cancel_search();
        assert!(!state.search_timer_elapsed(ticket));
        assert_eq!(state.search, "");
    }

    #[test]
    fn query_uses_committed_values_only() {
        let mut state = UsersListState::default();
        state.type_search("  bob ".into(), 0);
        state.status_input = StatusFilter::Disabled;
        assert_eq!(
            state.query(),
            AdminUserListParams {
                search: None,
                status: None,
                page: Some(1),
                page_size: Some(DEFAULT_PAGE_SIZE),
            }
        );

        state.apply_filters();
        let query = state.query();
        assert_eq!(query.search.as_deref(), Some("bob"));
        assert_eq!(query.status, Some(UserStatus::Disabled));
    }

    #[test]
    fn filter_button_supersedes_pending_debounce() {
        let mut state = UsersListState::default();
        let ticket = state.type_search("x".into(), 0);
        state.apply_filters();
        assert!(!state.search_timer_elapsed(ticket));
        assert_eq!(state.search, "x");
    }

    #[test]
    fn reset_clears_inputs_and_filters() {
        let mut state = UsersListState::default();
        state.type_search("x".into(), 0);
        state.status_input = StatusFilter::Enabled;
        state.apply_filters();
        state.total = 50;
        state.go_to_page(3);

        state.reset_filters();
        assert_eq!(state.search_input, "");
        assert_eq!(state.search, "");
        assert_eq!(state.status_filter, StatusFilter::All);
        assert_eq!(state.page, 1);
        assert!(state.query().status.is_none());
    }

    #[test]
    fn total_pages_come_from_server_total() {
        let mut state = UsersListState::default();
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch(ticket, Ok(page(3, 42))));
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.total_pages(), 5);
        assert_eq!(state.phase, LoadPhase::Ready);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = UsersListState::default();
        let stale = state.begin_fetch();
        let fresh = state.begin_fetch();
        assert!(state.finish_fetch(fresh, Ok(page(2, 2))));
        assert!(!state.finish_fetch(stale, Ok(page(9, 9))));
        assert_eq!(state.total, 2);
    }

    #[test]
    fn identical_state_yields_identical_key() {
        let mut state = UsersListState::default();
        let before = state.query_key();
        state.commit_search(String::new());
        state.change_page_size(DEFAULT_PAGE_SIZE);
        assert_eq!(before, state.query_key());

        state.invalidate();
        assert_ne!(before, state.query_key());
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut state = UsersListState::default();
        state.total = 100;
        state.go_to_page(3);
        state.change_page_size(50);
        assert_eq!(state.page, 1);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn failed_fetch_keeps_rows() {
        let mut state = UsersListState::default();
        let t = state.begin_fetch();
        state.finish_fetch(t, Ok(page(2, 2)));
        let t = state.begin_fetch();
        state.finish_fetch(t, Err("offline".into()));
        assert_eq!(state.phase, LoadPhase::Failed);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[test]
    fn delete_confirmation_flow() {
        let mut state = UsersListState::default();
        state.request_delete(user(3));
        assert_eq!(state.delete_candidate().map(|u| u.id.clone()), Some(UserId::Number(3)));

        let key = state.query_key();
        state.cancel_delete();
        assert!(state.delete_candidate().is_none());
        assert_eq!(key, state.query_key());

        state.request_delete(user(3));
        assert_eq!(state.begin_delete().map(|u| u.id), Some(UserId::Number(3)));
        state.delete_completed();
        assert!(state.delete_candidate().is_none());
        assert!(!state.is_deleting());
        assert_ne!(key, state.query_key());
    }

    #[test]
    fn failed_delete_keeps_confirmation_open_for_retry() {
        let mut state = UsersListState::default();
        assert!(state.begin_delete().is_none());

        state.request_delete(user(4));
        assert!(state.begin_delete().is_some());
        assert!(state.begin_delete().is_none(), "one request at a time");

        let key = state.query_key();
        state.delete_failed();
        assert_eq!(state.delete_candidate().map(|u| u.id.clone()), Some(UserId::Number(4)));
        assert!(!state.is_deleting());
        assert_eq!(key, state.query_key());
        assert!(state.begin_delete().is_some());
    }

    #[test]
    fn emptied_last_page_steps_back() {
        let mut state = UsersListState::default();
        state.total = 21;
        state.go_to_page(3);
        let t = state.begin_fetch();
        state.finish_fetch(t, Ok(page(0, 20)));
        assert_eq!(state.page, 2);
    }

    #[test]
    fn create_returns_to_first_page_and_refetches() {
        let mut state = UsersListState::default();
        state.total = 40;
        state.go_to_page(2);
        let key = state.query_key();
        state.after_create();
        assert_eq!(state.page, 1);
        assert_ne!(key, state.query_key());
    }

    #[test]
    fn status_filter_values_round_trip() {
        for filter in StatusFilter::ALL {
            assert_eq!(StatusFilter::from_value(filter.value()), filter);
        }
    }
}
