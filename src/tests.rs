use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::csv_engine;
use crate::domain::entities::dataset::{Dataset, RecordId, TabularData};
use crate::domain::entities::query::{FilterColumn, SortDirection};
use crate::domain::error::EngineError;
use crate::infra::fs::LocalFileStore;
use crate::infra::sample::{SampleGenerator, SAMPLE_FILE_NAME};
use crate::usecase::engine::{EngineSettings, TableEngine};
use crate::usecase::ports::codec::TabularCodec;

const BOOKS: &str = "Title,Author,Genre,PublishedYear,ISBN\n\
                     Foo,Bar,Fiction,2000,978-1\n\
                     ,,,,\n\
                     Baz,Qux,Sci-Fi,1999,978-2";

fn books_engine() -> TableEngine {
    let mut engine = csv_engine(EngineSettings::default());
    engine
        .import_text("books.csv", BOOKS)
        .expect("fixture should import");
    engine
}

fn numbered_engine(count: usize) -> TableEngine {
    let mut text = String::from("Title,PublishedYear\n");
    for idx in 1..=count {
        text.push_str(&format!("Book {idx},{}\n", 1900 + idx));
    }
    let mut engine = csv_engine(EngineSettings::default());
    engine
        .import_text("numbered.csv", &text)
        .expect("fixture should import");
    engine
}

fn page_ids(engine: &TableEngine) -> Vec<u64> {
    engine.projection().page.iter().map(|r| r.id().0).collect()
}

fn column_values(engine: &TableEngine, column: &str) -> Vec<String> {
    engine
        .projection()
        .page
        .iter()
        .map(|r| r.get(column).to_string())
        .collect()
}

struct RejectingCodec;

impl TabularCodec for RejectingCodec {
    fn decode(&self, _text: &str) -> Result<TabularData, EngineError> {
        Err(EngineError::Parse {
            line: Some(3),
            message: "unterminated quote".to_string(),
        })
    }

    fn encode(&self, _data: &TabularData) -> Result<String, EngineError> {
        Ok(String::new())
    }
}

#[test]
fn import_drops_blank_rows_and_numbers_records() {
    let engine = books_engine();

    assert_eq!(engine.working().len(), 2);
    let ids: Vec<u64> = engine.working().records().iter().map(|r| r.id().0).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(engine.working().records()[1].get("Title"), "Baz");
    assert_eq!(engine.source_name(), "books.csv");
}

#[test]
fn import_replaces_state_and_clears_marks() {
    let mut engine = books_engine();
    engine.edit_cell(RecordId(1), "Title", "Changed");
    engine.set_page(4);

    let summary = engine
        .import_text("other.csv", "A,B\n1,2\n3,4\n5,6\n")
        .expect("second import should succeed");

    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.column_count, 2);
    assert!(engine.modified().is_empty());
    assert_eq!(engine.query().current_page, 1);
    assert_eq!(engine.original(), engine.working());
}

#[test]
fn empty_import_gives_an_empty_schema() {
    let mut engine = books_engine();

    engine.import_text("empty.csv", "").expect("empty text should import");

    assert!(engine.working().columns().is_empty());
    assert!(engine.working().is_empty());
    assert_eq!(engine.projection().total_pages, 1);
    assert_eq!(engine.export_text().expect("export should succeed"), "");
}

#[test]
fn failed_parse_leaves_previous_state_usable() {
    let mut engine = TableEngine::new(Arc::new(RejectingCodec), EngineSettings::default());
    engine.load_dataset("kept.csv", books_engine().working().clone());
    engine.edit_cell(RecordId(2), "Title", "Edited");
    engine.set_search_term("edit");
    let before = engine.working().clone();

    let result = engine.import_text("broken.csv", "\"oops");

    assert!(matches!(result, Err(EngineError::Parse { line: Some(3), .. })));
    assert_eq!(engine.working(), &before);
    assert!(engine.modified().contains(RecordId(2)));
    assert_eq!(engine.query().search_term, "edit");
    assert_eq!(engine.source_name(), "kept.csv");
    assert_eq!(engine.projection().total_filtered_count, 1);
}

#[test]
fn failed_read_leaves_previous_state_usable() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let mut engine = books_engine();
    let before = engine.working().clone();

    let result = engine.import_file(&LocalFileStore, &dir.path().join("missing.csv"));

    assert!(matches!(result, Err(EngineError::Read { .. })), "{result:?}");
    assert_eq!(engine.working(), &before);
    assert_eq!(engine.source_name(), "books.csv");
}

#[test]
fn import_file_uses_the_file_name_for_export() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("library.csv");
    fs::write(&path, BOOKS).expect("should write fixture");
    let mut engine = csv_engine(EngineSettings::default());

    let summary = engine
        .import_file(&LocalFileStore, &path)
        .expect("file import should succeed");

    assert_eq!(summary.source_name, "library.csv");
    assert_eq!(summary.record_count, 2);
    assert_eq!(engine.export_file_name(), "library_edited.csv");
}

#[test]
fn edit_changes_working_only() {
    let mut engine = books_engine();

    assert!(engine.edit_cell(RecordId(1), "Title", "New Title"));

    assert_eq!(engine.modified().ids().iter().copied().collect::<Vec<_>>(), vec![RecordId(1)]);
    assert_eq!(
        engine.working().get(RecordId(1)).map(|r| r.get("Title")),
        Some("New Title")
    );
    assert_eq!(engine.original().get(RecordId(1)).map(|r| r.get("Title")), Some("Foo"));
}

#[test]
fn edit_on_unknown_id_is_silently_ignored() {
    let mut engine = books_engine();

    assert!(!engine.edit_cell(RecordId(99), "Title", "ghost"));

    assert!(engine.modified().is_empty());
    assert_eq!(engine.original(), engine.working());
}

#[test]
fn original_survives_any_sequence_of_operations() {
    let mut engine = books_engine();
    let snapshot = engine.original().clone();

    engine.edit_cell(RecordId(1), "Title", "x");
    engine.edit_cell(RecordId(2), "Extra", "y");
    engine.toggle_sort("Title");
    engine.set_search_term("ba");
    engine.set_filter_column(FilterColumn::Column("Title".to_string()));
    engine.set_page(3);
    engine.next_page();

    assert_eq!(engine.original(), &snapshot);
}

#[test]
fn reset_restores_working_and_clears_query() {
    let mut engine = books_engine();
    engine.set_filter_column(FilterColumn::Column("Genre".to_string()));
    engine.edit_cell(RecordId(2), "Genre", "Poetry");
    engine.toggle_sort("Genre");
    engine.set_search_term("poe");

    engine.reset();

    assert_eq!(engine.working(), engine.original());
    assert!(engine.modified().is_empty());
    assert_eq!(engine.query().search_term, "");
    assert_eq!(engine.query().sort, None);
    assert_eq!(engine.query().current_page, 1);
    assert_eq!(
        engine.query().filter_column,
        FilterColumn::Column("Genre".to_string())
    );
}

#[test]
fn reset_is_independent_from_later_edits() {
    let mut engine = books_engine();
    engine.reset();

    engine.edit_cell(RecordId(1), "Title", "after reset");

    assert_eq!(engine.original().get(RecordId(1)).map(|r| r.get("Title")), Some("Foo"));
}

#[test]
fn year_sort_toggles_between_directions() {
    let mut engine = books_engine();

    engine.toggle_sort("PublishedYear");
    assert_eq!(column_values(&engine, "PublishedYear"), vec!["1999", "2000"]);
    assert_eq!(engine.query().sort_direction_for("PublishedYear"), Some(SortDirection::Asc));

    engine.toggle_sort("PublishedYear");
    assert_eq!(column_values(&engine, "PublishedYear"), vec!["2000", "1999"]);

    engine.toggle_sort("PublishedYear");
    assert_eq!(column_values(&engine, "PublishedYear"), vec!["1999", "2000"]);
}

#[test]
fn switching_sort_column_starts_ascending() {
    let mut engine = books_engine();
    engine.toggle_sort("PublishedYear");
    engine.toggle_sort("PublishedYear");

    engine.toggle_sort("Title");

    assert_eq!(engine.query().sort_direction_for("Title"), Some(SortDirection::Asc));
    assert_eq!(column_values(&engine, "Title"), vec!["Baz", "Foo"]);
}

#[test]
fn numeric_sort_uses_value_not_text() {
    let mut engine = csv_engine(EngineSettings::default());
    engine
        .import_text("y.csv", "Title,PublishedYear\na,2000\nb,999\nc,unknown\n")
        .expect("fixture should import");

    engine.toggle_sort("PublishedYear");

    assert_eq!(page_ids(&engine), vec![3, 2, 1]);
}

#[test]
fn numeric_columns_follow_settings() {
    let settings = EngineSettings {
        numeric_columns: vec!["Pages".to_string()],
        ..EngineSettings::default()
    };
    let mut engine = csv_engine(settings);
    engine
        .import_text("p.csv", "Pages,PublishedYear\n100,10\n9,9\n")
        .expect("fixture should import");

    engine.toggle_sort("Pages");
    assert_eq!(page_ids(&engine), vec![2, 1]);

    engine.toggle_sort("PublishedYear");
    // text comparison now: "10" < "9"
    assert_eq!(page_ids(&engine), vec![1, 2]);
}

#[test]
fn sort_keeps_page_but_search_and_filter_reset_it() {
    let mut engine = numbered_engine(120);

    engine.set_page(2);
    engine.toggle_sort("Title");
    assert_eq!(engine.query().current_page, 2);

    engine.set_search_term("book");
    assert_eq!(engine.query().current_page, 1);

    engine.set_page(3);
    engine.set_filter_column(FilterColumn::Column("Title".to_string()));
    assert_eq!(engine.query().current_page, 1);
}

#[test]
fn hundred_twenty_records_make_three_pages() {
    let mut engine = numbered_engine(120);

    let first = engine.projection();
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_filtered_count, 120);
    assert_eq!(first.page.len(), 50);

    engine.set_page(3);
    let ids = page_ids(&engine);
    assert_eq!(ids, (101..=120).collect::<Vec<u64>>());
    let range = engine.page_range().expect("page 3 has rows");
    assert_eq!((range.start, range.end, range.total), (101, 120, 120));
}

#[test]
fn concatenated_pages_reproduce_the_filtered_sorted_sequence() {
    let mut engine = numbered_engine(173);
    engine.set_search_term("1");
    engine.toggle_sort("PublishedYear");
    engine.toggle_sort("PublishedYear");

    let total_pages = engine.total_pages();
    let mut stitched = Vec::new();
    for page in 1..=total_pages {
        engine.set_page(page);
        stitched.extend(page_ids(&engine));
    }

    let mut expected: Vec<u64> = engine
        .working()
        .records()
        .iter()
        .filter(|r| r.get("Title").contains('1') || r.get("PublishedYear").contains('1'))
        .map(|r| r.id().0)
        .collect();
    expected.reverse();
    assert_eq!(stitched, expected);
}

#[test]
fn page_past_the_end_projects_empty_without_clamping() {
    let mut engine = numbered_engine(120);
    engine.set_page(3);

    engine.set_filter_column(FilterColumn::Column("Title".to_string()));
    engine.set_page(3);
    engine.edit_cell(RecordId(1), "Title", "only match");
    engine.set_search_term("only");
    engine.set_page(3);

    let projection = engine.projection();
    assert!(projection.page.is_empty());
    assert_eq!(projection.current_page, 3);
    assert_eq!(projection.total_pages, 1);
    assert_eq!(projection.total_filtered_count, 1);
    assert!(projection.modified_ids.contains(&RecordId(1)));
}

#[test]
fn next_and_previous_stay_within_bounds() {
    let mut engine = numbered_engine(120);

    engine.previous_page();
    assert_eq!(engine.query().current_page, 1);

    engine.next_page();
    engine.next_page();
    engine.next_page();
    assert_eq!(engine.query().current_page, 3);

    engine.set_page(9);
    engine.previous_page();
    assert_eq!(engine.query().current_page, 3);

    engine.set_page(0);
    assert_eq!(engine.query().current_page, 1);
}

#[test]
fn page_window_tracks_current_page() {
    let mut engine = numbered_engine(1000);

    assert_eq!(engine.page_window(), vec![1, 2, 3, 4, 5]);
    engine.set_page(10);
    assert_eq!(engine.page_window(), vec![8, 9, 10, 11, 12]);
    engine.set_page(20);
    assert_eq!(engine.page_window(), vec![16, 17, 18, 19, 20]);
}

#[test]
fn stats_count_total_filtered_and_modified() {
    let mut engine = books_engine();
    engine.edit_cell(RecordId(1), "Genre", "Poetry");
    engine.edit_cell(RecordId(1), "Title", "Again");
    engine.set_search_term("qux");

    let stats = engine.stats();

    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.filtered_records, 1);
    assert_eq!(stats.modified_records, 1);
}

#[test]
fn filter_options_list_all_then_schema() {
    let engine = books_engine();

    let labels: Vec<String> = engine
        .filter_options()
        .iter()
        .map(|option| option.label().to_string())
        .collect();

    assert_eq!(
        labels,
        vec!["All Columns", "Title", "Author", "Genre", "PublishedYear", "ISBN"]
    );
}

#[test]
fn export_writes_the_full_working_set_in_dataset_order() {
    let mut engine = books_engine();
    engine.edit_cell(RecordId(2), "Title", "Baz, Revised");
    engine.edit_cell(RecordId(1), "Notes", "not in schema");
    engine.set_search_term("qux");
    engine.toggle_sort("Title");

    let text = engine.export_text().expect("export should succeed");

    assert_eq!(
        text,
        "Title,Author,Genre,PublishedYear,ISBN\n\
         Foo,Bar,Fiction,2000,978-1\n\
         \"Baz, Revised\",Qux,Sci-Fi,1999,978-2\n"
    );
}

#[test]
fn exported_text_imports_back_to_the_same_records() {
    let mut engine = books_engine();
    engine.edit_cell(RecordId(1), "Title", "Line one\nline \"two\"");
    let text = engine.export_text().expect("export should succeed");

    let mut reloaded = csv_engine(EngineSettings::default());
    reloaded.import_text("round.csv", &text).expect("export should re-import");

    assert_eq!(reloaded.working(), engine.working());
}

#[test]
fn export_file_writes_to_the_chosen_path() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let mut engine = books_engine();
    engine.edit_cell(RecordId(1), "Author", "Someone");
    let path = dir.path().join(engine.export_file_name());

    let summary = engine
        .export_file(&LocalFileStore, &path)
        .expect("export should succeed");

    assert_eq!(summary.file_name, "books_edited.csv");
    assert_eq!(summary.record_count, 2);
    let written = fs::read_to_string(&path).expect("export file should exist");
    assert!(written.contains("Foo,Someone,Fiction"));
}

#[test]
fn export_to_missing_directory_is_a_write_error() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let engine = books_engine();

    let result = engine.export_file(&LocalFileStore, &dir.path().join("no/such/dir.csv"));

    assert!(matches!(result, Err(EngineError::Write { .. })), "{result:?}");
}

#[test]
fn sample_catalogue_loads_like_an_import() {
    let mut engine = csv_engine(EngineSettings::default());
    let sample: Dataset = SampleGenerator::new(Some(3)).generate(10_000);

    let summary = engine.load_dataset(SAMPLE_FILE_NAME, sample);

    assert_eq!(summary.record_count, 10_000);
    assert_eq!(engine.projection().total_pages, 200);
    assert_eq!(engine.export_file_name(), "sample-books_edited.csv");

    engine.set_filter_column(FilterColumn::Column("Genre".to_string()));
    engine.set_search_term("sci-fi");
    let projection = engine.projection();
    assert!(projection.total_filtered_count > 0);
    assert!(projection
        .page
        .iter()
        .all(|record| record.get("Genre") == "Sci-Fi"));
}
