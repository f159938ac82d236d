use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::dataset::{Dataset, RecordId};
use crate::domain::entities::edit::{CellEdit, ModifiedSet};
use crate::domain::entities::query::{
    DatasetStats, FilterColumn, PageRange, Projection, QueryState, SortDirection, SortSpec,
    DEFAULT_NUMERIC_COLUMN, DEFAULT_PAGE_SIZE,
};
use crate::domain::error::EngineError;
use crate::usecase::ports::codec::TabularCodec;
use crate::usecase::ports::files::FileStore;
use crate::usecase::services::edit_service::apply_cell_edit;
use crate::usecase::services::export_service::{derive_export_file_name, ExportService};
use crate::usecase::services::import_service::{ImportService, UNNAMED_SOURCE};
use crate::usecase::services::query_service::{page_window, QueryService, PAGE_WINDOW_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub page_size: usize,
    /// Columns compared as integers when sorting.
    pub numeric_columns: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            numeric_columns: vec![DEFAULT_NUMERIC_COLUMN.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub source_name: String,
    pub record_count: usize,
    pub column_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub file_name: String,
    pub record_count: usize,
}

/// Owns the imported dataset, its working copy, the query state and the set
/// of edited rows.
///
/// Every mutator runs to completion on `&mut self`; callers that share the
/// engine must route all writes through a single owner.
pub struct TableEngine {
    importer: ImportService,
    exporter: ExportService,
    queries: QueryService,
    original: Dataset,
    working: Dataset,
    modified: ModifiedSet,
    query: QueryState,
    source_name: String,
}

impl TableEngine {
    pub fn new(codec: Arc<dyn TabularCodec>, settings: EngineSettings) -> Self {
        Self {
            importer: ImportService::new(codec.clone()),
            exporter: ExportService::new(codec),
            queries: QueryService::new(settings.page_size, settings.numeric_columns),
            original: Dataset::default(),
            working: Dataset::default(),
            modified: ModifiedSet::default(),
            query: QueryState::default(),
            source_name: UNNAMED_SOURCE.to_string(),
        }
    }

    /// Replaces both dataset copies, clears the edit marks and returns to the
    /// first page. Search, sort and the filter column are kept.
    pub fn load_dataset(&mut self, source_name: impl Into<String>, dataset: Dataset) -> ImportSummary {
        self.source_name = source_name.into();
        self.working = dataset.clone();
        self.original = dataset;
        self.modified.clear();
        self.query.current_page = 1;

        let summary = ImportSummary {
            source_name: self.source_name.clone(),
            record_count: self.original.len(),
            column_count: self.original.columns().len(),
        };
        info!(
            source = %summary.source_name,
            records = summary.record_count,
            columns = summary.column_count,
            "dataset loaded"
        );
        summary
    }

    /// On error the current dataset and query state are left untouched.
    pub fn import_text(
        &mut self,
        source_name: impl Into<String>,
        text: &str,
    ) -> Result<ImportSummary, EngineError> {
        let dataset = self.importer.parse(text).inspect_err(|err| {
            warn!(%err, "import rejected");
        })?;
        Ok(self.load_dataset(source_name, dataset))
    }

    pub fn import_file(
        &mut self,
        files: &dyn FileStore,
        path: &Path,
    ) -> Result<ImportSummary, EngineError> {
        let (source_name, dataset) = self.importer.read(files, path).inspect_err(|err| {
            warn!(%err, path = %path.display(), "import rejected");
        })?;
        Ok(self.load_dataset(source_name, dataset))
    }

    /// Returns `false` when no record has `id`; that case is not an error.
    pub fn edit_cell(&mut self, id: RecordId, column: &str, value: impl Into<String>) -> bool {
        apply_cell_edit(
            &mut self.working,
            &mut self.modified,
            CellEdit::new(id, column, value),
        )
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.query.current_page = 1;
        debug!(term = %self.query.search_term, "search changed");
    }

    pub fn set_filter_column(&mut self, filter_column: FilterColumn) {
        debug!(column = filter_column.label(), "filter column changed");
        self.query.filter_column = filter_column;
        self.query.current_page = 1;
    }

    /// Ascending on a new column, descending on a second click, ascending
    /// again after that. The current page is kept.
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match self.query.sort_direction_for(column) {
            Some(SortDirection::Asc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.query.sort = Some(SortSpec {
            column: column.to_string(),
            direction,
        });
        debug!(column, ?direction, "sort changed");
    }

    /// Pages past the end are accepted and project as empty; 0 is read as 1.
    pub fn set_page(&mut self, page: usize) {
        self.query.current_page = page.max(1);
    }

    pub fn next_page(&mut self) {
        let last = self.total_pages();
        self.query.current_page = (self.query.current_page + 1).min(last);
    }

    pub fn previous_page(&mut self) {
        let last = self.total_pages();
        self.query.current_page = self.query.current_page.saturating_sub(1).clamp(1, last);
    }

    /// Discards every edit, search and sort. The filter column survives.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
        self.modified.clear();
        self.query.search_term.clear();
        self.query.sort = None;
        self.query.current_page = 1;
        info!(records = self.working.len(), "working copy reset");
    }

    pub fn export_text(&self) -> Result<String, EngineError> {
        self.exporter.render(&self.working)
    }

    pub fn export_file_name(&self) -> String {
        derive_export_file_name(&self.source_name)
    }

    pub fn export_file(
        &self,
        files: &dyn FileStore,
        path: &Path,
    ) -> Result<ExportSummary, EngineError> {
        self.exporter
            .write(files, &self.working, path)
            .inspect_err(|err| warn!(%err, "export failed"))?;
        let summary = ExportSummary {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.export_file_name()),
            record_count: self.working.len(),
        };
        info!(path = %path.display(), records = summary.record_count, "dataset exported");
        Ok(summary)
    }

    pub fn projection(&self) -> Projection {
        self.queries
            .project(&self.working, &self.query, &self.modified)
    }

    pub fn filtered_count(&self) -> usize {
        self.queries.filter(self.working.records(), &self.query).len()
    }

    pub fn total_pages(&self) -> usize {
        self.queries.total_pages(self.filtered_count())
    }

    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.query.current_page, self.total_pages(), PAGE_WINDOW_WIDTH)
    }

    pub fn page_range(&self) -> Option<PageRange> {
        self.queries
            .page_range(self.filtered_count(), self.query.current_page)
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            total_records: self.working.len(),
            filtered_records: self.filtered_count(),
            modified_records: self.modified.len(),
        }
    }

    /// `All` followed by each schema column.
    pub fn filter_options(&self) -> Vec<FilterColumn> {
        std::iter::once(FilterColumn::All)
            .chain(
                self.working
                    .columns()
                    .iter()
                    .cloned()
                    .map(FilterColumn::Column),
            )
            .collect()
    }

    pub fn original(&self) -> &Dataset {
        &self.original
    }

    pub fn working(&self) -> &Dataset {
        &self.working
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn modified(&self) -> &ModifiedSet {
        &self.modified
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn page_size(&self) -> usize {
        self.queries.page_size()
    }
}
