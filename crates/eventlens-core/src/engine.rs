//! Filter, sort, and paginate over a normalized dataset.
//!
//! All view state lives in an explicit [`Session`]: the dataset, the active
//! [`FilterSpec`], the [`SortSpec`], the [`Pager`], and the session color
//! assigner. Consumers construct one session per dataset and drive it
//! through its methods; there is no module-level state.

use crate::colors::ColorAssigner;
use crate::types::{sort_and_index, Category, NormalizedEvent};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Conjunction of predicates: an event matches only when every populated
/// criterion matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Exact event identifier match.
    pub event: Option<String>,
    /// Category match.
    pub category: Option<Category>,
    /// Exact match against the stored level, which normalization uppercases.
    pub level: Option<String>,
    /// Case-insensitive substring over the event's salient fields, or over
    /// the whole serialized record when `raw_search` is set.
    pub search: Option<String>,
    pub raw_search: bool,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.category.is_none() && self.level.is_none() && self.search.is_none()
    }

    pub fn matches(&self, event: &NormalizedEvent) -> bool {
        if let Some(want) = &self.event {
            if &event.event != want {
                return false;
            }
        }
        if let Some(want) = self.category {
            if event.category != want {
                return false;
            }
        }
        if let Some(want) = &self.level {
            if !effective_level(event).is_some_and(|l| l == want) {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let haystack = if self.raw_search {
                raw_haystack(event)
            } else {
                field_haystack(event)
            };
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Level may live in the extracted properties or only in the raw record.
fn effective_level(event: &NormalizedEvent) -> Option<&str> {
    event
        .level
        .as_deref()
        .or_else(|| event.properties.get("level").and_then(Value::as_str))
        .or_else(|| event.raw_data.get("level").and_then(Value::as_str))
}

/// Salient-field haystack: identifier, description, user, page, and the
/// serialized properties map.
fn field_haystack(event: &NormalizedEvent) -> String {
    let props = serde_json::to_string(&event.properties).unwrap_or_default();
    format!(
        "{} {} {} {} {}",
        event.event, event.desc, event.user_id, event.page_path, props
    )
    .to_lowercase()
}

/// Whole-record haystack: the serialized event with whitespace and
/// backslash escapes stripped, so a query pasted from pretty-printed JSON
/// still matches. Only the haystack is normalized, never the query.
fn raw_haystack(event: &NormalizedEvent) -> String {
    let serialized = serde_json::to_string(event).unwrap_or_default().to_lowercase();
    serialized.chars().filter(|c| !c.is_whitespace() && *c != '\\').collect()
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Input order (the position each record held in the imported file).
    #[default]
    Index,
    Timestamp,
    /// Server-calibrated client time where the record carries one,
    /// timestamp otherwise. Carriers always sort ahead of non-carriers.
    Calibrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDir,
}

/// Calibrated client time, probed from the analytics payload.
fn calibrated_millis(event: &NormalizedEvent) -> Option<i64> {
    let analysis = event.properties.get("analysisData")?;
    ["calibrated_time", "calibratedTime"]
        .iter()
        .find_map(|key| analysis.get(key))
        .and_then(Value::as_i64)
}

fn sort_events(events: &mut [NormalizedEvent], spec: SortSpec) {
    // Keys are built on `original_index`, never on the renumbered `index`,
    // so applying the same spec twice yields the same order.
    match spec.key {
        SortKey::Index => {
            events.sort_by_key(|e| e.original_index);
            if spec.dir == SortDir::Desc {
                events.reverse();
            }
        }
        SortKey::Timestamp => {
            events.sort_by_key(|e| (e.timestamp, e.original_index));
            if spec.dir == SortDir::Desc {
                events.reverse();
            }
        }
        SortKey::Calibrated => {
            // Carriers first regardless of direction, then by calibrated
            // time among carriers and timestamp among the rest.
            events.sort_by_key(|e| match calibrated_millis(e) {
                Some(ms) => (0, ms, e.original_index),
                None => (1, e.timestamp, e.original_index),
            });
            if spec.dir == SortDir::Desc {
                let carriers = events
                    .iter()
                    .position(|e| calibrated_millis(e).is_none())
                    .unwrap_or(events.len());
                events[..carriers].reverse();
                events[carriers..].reverse();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page_size: 50, current_page: 1 }
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), current_page: 1 }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Total pages for a dataset of `total` rows, at least 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Navigate to a page. Out-of-range targets are no-ops.
    pub fn go_to(&mut self, page: usize, total: usize) {
        if page >= 1 && page <= self.total_pages(total) {
            self.current_page = page;
        }
    }

    /// Changing the page size resets to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// The current page's slice of `rows`.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= rows.len() {
            return &[];
        }
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One loaded dataset and its view state.
#[derive(Debug, Default)]
pub struct Session {
    events: Vec<NormalizedEvent>,
    pub filter: FilterSpec,
    sort: SortSpec,
    pub pager: Pager,
    pub colors: ColorAssigner,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset wholesale. Filter and page position reset, and
    /// session colors restart from the palette's first slot.
    pub fn load(&mut self, events: Vec<NormalizedEvent>) {
        self.events = events;
        self.filter = FilterSpec::default();
        self.pager.reset();
        self.colors.reset();
    }

    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Apply a new filter; the page position resets to 1.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.pager.reset();
    }

    /// Re-sort the dataset in place and renumber indices 1..N in the new
    /// order. Resorting resets the page position.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        sort_events(&mut self.events, sort);
        for (i, event) in self.events.iter_mut().enumerate() {
            event.index = i + 1;
        }
        self.pager.reset();
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Events passing the active filter, in the current sort order.
    pub fn filtered(&self) -> Vec<&NormalizedEvent> {
        self.events.iter().filter(|e| self.filter.matches(e)).collect()
    }

    /// The current page of the filtered view, plus the total filtered count.
    pub fn page(&self) -> (Vec<&NormalizedEvent>, usize) {
        let filtered = self.filtered();
        let total = filtered.len();
        let page = self.pager.slice(&filtered).to_vec();
        (page, total)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered().len();
        self.pager.go_to(page, total);
    }
}

/// Normalize then load in one step, restoring chronological order and index
/// contiguity regardless of how the events were produced.
pub fn load_sorted(session: &mut Session, mut events: Vec<NormalizedEvent>) {
    sort_and_index(&mut events);
    session.load(events);
}
