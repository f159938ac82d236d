use std::collections::BTreeSet;

use crate::domain::entities::dataset::{Record, RecordId};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_NUMERIC_COLUMN: &str = "PublishedYear";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// Which cells a search term is matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterColumn {
    #[default]
    All,
    Column(String),
}

impl FilterColumn {
    pub fn label(&self) -> &str {
        match self {
            FilterColumn::All => "All Columns",
            FilterColumn::Column(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub filter_column: FilterColumn,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filter_column: FilterColumn::All,
            sort: None,
            current_page: 1,
        }
    }
}

impl QueryState {
    pub fn sort_direction_for(&self, column: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.column == column)
            .map(|sort| sort.direction)
    }
}

/// What the presentation layer renders for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub page: Vec<Record>,
    pub current_page: usize,
    pub total_filtered_count: usize,
    pub total_pages: usize,
    pub modified_ids: BTreeSet<RecordId>,
}

/// 1-based, inclusive bounds of the records shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub total_records: usize,
    pub filtered_records: usize,
    pub modified_records: usize,
}
