use std::collections::BTreeSet;

use crate::domain::entities::dataset::{Dataset, Record};
use crate::domain::entities::edit::ModifiedSet;
use crate::domain::entities::query::{
    FilterColumn, PageRange, Projection, QueryState, SortDirection, SortSpec, DEFAULT_NUMERIC_COLUMN,
    DEFAULT_PAGE_SIZE,
};

/// Number of page buttons offered around the current page.
pub const PAGE_WINDOW_WIDTH: usize = 5;

/// Derives the filtered, sorted and paginated view of a dataset.
///
/// Every method is a pure function of its arguments; nothing is cached.
#[derive(Debug, Clone)]
pub struct QueryService {
    page_size: usize,
    numeric_columns: BTreeSet<String>,
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, [DEFAULT_NUMERIC_COLUMN.to_string()])
    }
}

impl QueryService {
    pub fn new(page_size: usize, numeric_columns: impl IntoIterator<Item = String>) -> Self {
        Self {
            page_size: page_size.max(1),
            numeric_columns: numeric_columns.into_iter().collect(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.contains(column)
    }

    pub fn filter<'a>(&self, records: &'a [Record], query: &QueryState) -> Vec<&'a Record> {
        if query.search_term.is_empty() {
            return records.iter().collect();
        }
        let needle = query.search_term.to_lowercase();
        records
            .iter()
            .filter(|record| matches_term(record, &query.filter_column, &needle))
            .collect()
    }

    /// Stable sort by `sort.column`. Descending order reverses the key
    /// comparison only, so equal keys keep their incoming order either way.
    pub fn sort(&self, rows: &mut Vec<&Record>, sort: &SortSpec) {
        let numeric = self.is_numeric(&sort.column);
        let mut keyed: Vec<(SortKey, &Record)> = rows
            .iter()
            .map(|record| {
                let value = record.get(&sort.column);
                let key = if numeric {
                    SortKey::Int(parse_leading_int(value))
                } else {
                    SortKey::Text(value.to_lowercase())
                };
                (key, *record)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match sort.direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        });

        *rows = keyed.into_iter().map(|(_, record)| record).collect();
    }

    /// Filter then sort, in source order when no sort key is set.
    pub fn derive<'a>(&self, records: &'a [Record], query: &QueryState) -> Vec<&'a Record> {
        let mut rows = self.filter(records, query);
        if let Some(sort) = &query.sort {
            self.sort(&mut rows, sort);
        }
        rows
    }

    /// `ceil(count / page_size)`, never less than 1.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Rows of the 1-based `page`; empty when the page lies past the end.
    pub fn page<'r, 'a>(&self, rows: &'r [&'a Record], page: usize) -> &'r [&'a Record] {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.page_size);
        if start >= rows.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(rows.len());
        &rows[start..end]
    }

    pub fn page_range(&self, total: usize, page: usize) -> Option<PageRange> {
        let start = page.max(1).saturating_sub(1).saturating_mul(self.page_size);
        if start >= total {
            return None;
        }
        Some(PageRange {
            start: start + 1,
            end: start.saturating_add(self.page_size).min(total),
            total,
        })
    }

    pub fn project(
        &self,
        dataset: &Dataset,
        query: &QueryState,
        modified: &ModifiedSet,
    ) -> Projection {
        let rows = self.derive(dataset.records(), query);
        let page = self
            .page(&rows, query.current_page)
            .iter()
            .map(|record| (*record).clone())
            .collect();

        Projection {
            page,
            current_page: query.current_page,
            total_filtered_count: rows.len(),
            total_pages: self.total_pages(rows.len()),
            modified_ids: modified.ids().clone(),
        }
    }
}

/// Up to `width` consecutive page numbers, centred on `current` where the
/// page count allows it.
pub fn page_window(current: usize, total_pages: usize, width: usize) -> Vec<usize> {
    let count = total_pages.min(width);
    let half = width / 2;
    let first = if total_pages <= width || current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages + 1 - width
    } else {
        current - half
    };
    (first..first + count).collect()
}

/// Integer prefix of `value` after leading whitespace, with an optional
/// sign. Anything without a leading digit, or out of range, reads as 0.
pub fn parse_leading_int(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return 0;
    }
    trimmed[..sign_len + digits].parse().unwrap_or(0)
}

fn matches_term(record: &Record, filter_column: &FilterColumn, needle: &str) -> bool {
    match filter_column {
        FilterColumn::All => record
            .values()
            .values()
            .any(|value| value.to_lowercase().contains(needle)),
        FilterColumn::Column(column) => record.get(column).to_lowercase().contains(needle),
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Int(i64),
    Text(String),
}
