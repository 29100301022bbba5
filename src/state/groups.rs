use crate::api::merge_unique_groups;
use crate::models::{Group, SelectedGroup};
use crate::state::request::{RequestSeq, Ticket};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Sidebar pagination cursor. Not persisted: every session starts at page 1 and
/// merges into the rehydrated list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Paging {
    pub next_page: u32,
    pub total_pages: Option<u32>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            next_page: 1,
            total_pages: None,
            loading: false,
            error: None,
        }
    }
}

impl Paging {
    pub fn has_more(&self) -> bool {
        match self.total_pages {
            Some(total) => self.next_page <= total,
            None => true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchState {
    pub query: String,
    pub results: Option<Vec<Group>>,
    pub loading: bool,
    pub error: Option<String>,
    pub seq: RequestSeq,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Group list, selection and search. The list and the selection survive reloads.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GroupsState {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub selected: Option<SelectedGroup>,
    #[serde(skip)]
    pub paging: Paging,
    #[serde(skip)]
    pub search: SearchState,
}

#[derive(Clone, Debug)]
pub(crate) enum GroupsAction {
    PageRequested,
    PageLoaded {
        page: u32,
        groups: Vec<Group>,
        total_pages: u32,
    },
    PageFailed(String),
    GroupCreated(Group),
    Select(Option<SelectedGroup>),
    SearchChanged(String),
    SearchResolved {
        ticket: Ticket,
        result: Result<Vec<Group>, String>,
    },
}

impl GroupsState {
    pub fn reduce(&mut self, action: GroupsAction) {
        match action {
            GroupsAction::PageRequested => {
                self.paging.loading = true;
                self.paging.error = None;
            }
            GroupsAction::PageLoaded {
                page,
                groups,
                total_pages,
            } => {
                merge_unique_groups(&mut self.groups, groups);
                self.paging.total_pages = Some(total_pages);
                self.paging.next_page = self.paging.next_page.max(page.saturating_add(1));
                self.paging.loading = false;
                self.paging.error = None;
            }
            GroupsAction::PageFailed(message) => {
                self.paging.loading = false;
                self.paging.error = Some(message);
            }
            GroupsAction::GroupCreated(group) => {
                merge_unique_groups(&mut self.groups, vec![group]);
            }
            GroupsAction::Select(selected) => {
                self.selected = selected;
            }
            GroupsAction::SearchChanged(query) => {
                let active = !query.trim().is_empty();
                self.search.query = query;
                self.search.error = None;
                if active {
                    self.search.seq.issue();
                    self.search.loading = true;
                } else {
                    self.search.seq.invalidate();
                    self.search.results = None;
                    self.search.loading = false;
                }
            }
            GroupsAction::SearchResolved { ticket, result } => {
                if !self.search.seq.is_current(ticket) || !self.search.is_active() {
                    tracing::debug!(?ticket, "dropping stale search response");
                    return;
                }
                self.search.loading = false;
                match result {
                    Ok(groups) => {
                        self.search.results = Some(groups);
                        self.search.error = None;
                    }
                    Err(e) => self.search.error = Some(e),
                }
            }
        }
    }

    /// Ticket of the search request the latest `SearchChanged` asked for.
    pub fn search_ticket(&self) -> Option<Ticket> {
        self.search
            .is_active()
            .then(|| self.search.seq.current())
    }

    pub fn can_request_page(&self) -> bool {
        !self.paging.loading && self.paging.has_more()
    }

    pub fn is_selected(&self, group_id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.id == group_id)
    }

    /// What the sidebar lists: search results while a query is active, otherwise
    /// the accumulated list ordered by last update (oldest first).
    pub fn visible_groups(&self) -> Vec<Group> {
        if self.search.is_active() {
            return self.search.results.clone().unwrap_or_default();
        }
        sorted_by_updated(&self.groups)
    }
}

fn parse_ts(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

pub(crate) fn sorted_by_updated(groups: &[Group]) -> Vec<Group> {
    let mut out = groups.to_vec();
    out.sort_by(|a, b| {
        parse_ts(&a.updated_at)
            .cmp(&parse_ts(&b.updated_at))
            .then_with(|| a.updated_at.cmp(&b.updated_at))
    });
    out
}
