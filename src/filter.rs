use crate::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Derived filter state. `matches` holds indices into the full record list in
/// list order; `cursor` indexes into `matches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub matches: Vec<usize>,
    pub cursor: Option<usize>,
}

impl FilterState {
    /// The filter is active once a non-empty query has at least one match.
    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    /// Cursor position with -1 standing for "no cursor".
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }
}

/// The ordered record list plus the "Find ID" filter and its circular cursor.
#[derive(Debug, Clone, Default)]
pub struct RecordListView {
    records: Vec<Record>,
    filter: FilterState,
}

impl RecordListView {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            filter: FilterState::default(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access for field edits. `Id` is immutable after load, so the
    /// match list stays valid.
    pub fn record_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Recompute matches for `query`: case-insensitive substring match on `Id`.
    /// The cursor lands on the first match, or is cleared when there is none or
    /// the query is empty.
    pub fn set_query(&mut self, query: &str) -> &FilterState {
        let needle = query.to_lowercase();
        let matches: Vec<usize> = if needle.is_empty() {
            Vec::new()
        } else {
            self.records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.id.to_lowercase().contains(&needle))
                .map(|(i, _)| i)
                .collect()
        };

        let cursor = (!matches.is_empty()).then_some(0);
        log::debug!("filter {query:?}: {} of {} match", matches.len(), self.records.len());

        self.filter = FilterState {
            query: query.to_string(),
            matches,
            cursor,
        };
        &self.filter
    }

    /// Move the cursor one match forward or back, wrapping at either end.
    /// Returns the record under the new cursor and the cursor position, or
    /// `None` when nothing matches.
    pub fn advance(&mut self, direction: Direction) -> Option<(&Record, usize)> {
        let total = self.filter.matches.len();
        if total == 0 {
            return None;
        }

        let current = self.filter.cursor.unwrap_or(0);
        let next = match direction {
            Direction::Next if current + 1 < total => current + 1,
            Direction::Next => 0,
            Direction::Previous if current > 0 => current - 1,
            Direction::Previous => total - 1,
        };
        self.filter.cursor = Some(next);

        let record_index = self.filter.matches[next];
        Some((&self.records[record_index], next))
    }

    /// Index into `records()` of the record under the cursor.
    pub fn current_match(&self) -> Option<usize> {
        let cursor = self.filter.cursor?;
        self.filter.matches.get(cursor).copied()
    }

    pub fn is_match(&self, record_index: usize) -> bool {
        self.filter.matches.binary_search(&record_index).is_ok()
    }

    /// `"{cursor+1}/{matches}"` while a query is set, `"0/{records}"` otherwise.
    pub fn counter_text(&self) -> String {
        if self.filter.query.is_empty() {
            format!("0/{}", self.records.len())
        } else {
            format!(
                "{}/{}",
                self.filter.cursor_index() + 1,
                self.filter.matches.len()
            )
        }
    }
}
