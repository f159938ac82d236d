use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::error;

use shelf::config::AppConfig;
use shelf::domain::entities::query::{FilterColumn, QueryState, SortDirection};
use shelf::infra::fs::LocalFileStore;

use crate::ui::state::app_state::AppState;

const ALL_COLUMNS_VALUE: &str = "__all__";
const MODIFIED_ROW_STYLE: &str = "background: #fefce8;";
const HEADER_CELL_STYLE: &str =
    "border: 1px solid #bbb; padding: 6px; background: #f3f4f6; cursor: pointer; text-align: left;";
const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 2px;";
const ACTIVE_PAGE_STYLE: &str = "background: #4f46e5; color: #fff;";

fn filter_value(filter: &FilterColumn) -> String {
    match filter {
        FilterColumn::All => ALL_COLUMNS_VALUE.to_string(),
        FilterColumn::Column(name) => name.clone(),
    }
}

fn filter_from_value(value: String) -> FilterColumn {
    if value == ALL_COLUMNS_VALUE {
        FilterColumn::All
    } else {
        FilterColumn::Column(value)
    }
}

fn sort_marker(query: &QueryState, column: &str) -> &'static str {
    match query.sort_direction_for(column) {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "",
    }
}

fn cell_input_style(modified: bool) -> &'static str {
    if modified {
        "width: 100%; border: 1px solid #facc15; background: #fefce8;"
    } else {
        "width: 100%; border: 1px solid #d1d5db;"
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let AppState {
        mut engine,
        mut busy,
        mut status,
    } = AppState::new(&config);

    let snapshot = engine.read();
    let projection = snapshot.projection();
    let stats = snapshot.stats();
    let columns = snapshot.working().columns().to_vec();
    let filter_options = snapshot.filter_options();
    let page_window = snapshot.page_window();
    let page_range = snapshot.page_range();
    let query = snapshot.query().clone();
    let source_name = snapshot.source_name().to_string();
    drop(snapshot);

    let selected_filter = filter_value(&query.filter_column);
    let current_page = projection.current_page;
    let total_pages = projection.total_pages;
    let range_label = match page_range {
        Some(range) => format!(
            "Showing {} to {} of {} results",
            range.start, range.end, range.total
        ),
        None => format!("No results on page {current_page}"),
    };

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                strong { "{source_name}" }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .pick_file() else {
                            status.set("Import cancelled".to_string());
                            return;
                        };

                        busy.set(true);
                        let result = engine.write().import_file(&LocalFileStore, &path);
                        match result {
                            Ok(summary) => status.set(format!(
                                "Imported {} records from {}",
                                summary.record_count, summary.source_name
                            )),
                            Err(err) => {
                                error!(%err, "import failed");
                                status.set(format!("Import failed: {err}"));
                            }
                        }
                        busy.set(false);
                    },
                    "Upload CSV"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let file_name = engine.read().export_file_name();
                        let Some(path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name(file_name)
                            .save_file() else {
                            status.set("Export cancelled".to_string());
                            return;
                        };

                        busy.set(true);
                        let result = engine.read().export_file(&LocalFileStore, &path);
                        match result {
                            Ok(summary) => status.set(format!(
                                "Exported {} records to {}",
                                summary.record_count, summary.file_name
                            )),
                            Err(err) => {
                                error!(%err, "export failed");
                                status.set(format!("Export failed: {err}"));
                            }
                        }
                        busy.set(false);
                    },
                    "Download"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        engine.write().reset();
                        status.set("Changes discarded".to_string());
                    },
                    "Reset"
                }
                span { "{status}" }
            }

            div {
                style: "display: flex; gap: 24px; margin: 8px 0;",
                span { "Total: {stats.total_records}" }
                span { "Modified: {stats.modified_records}" }
                if stats.filtered_records != stats.total_records {
                    span { "Filtered: {stats.filtered_records}" }
                }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; margin: 12px 0;",
                input {
                    placeholder: "Search books...",
                    value: "{query.search_term}",
                    oninput: move |event| engine.write().set_search_term(event.value()),
                }
                select {
                    value: "{selected_filter}",
                    onchange: move |event| {
                        engine.write().set_filter_column(filter_from_value(event.value()));
                    },
                    for choice in filter_options.iter() {
                        option {
                            value: "{filter_value(choice)}",
                            selected: *choice == query.filter_column,
                            "{choice.label()}"
                        }
                    }
                }
            }

            table { style: "border-collapse: collapse; width: 100%; background: #fff;",
                thead {
                    tr {
                        for column in columns.iter() {
                            th {
                                key: "{column}",
                                style: "{HEADER_CELL_STYLE}",
                                onclick: {
                                    let column = column.clone();
                                    move |_| engine.write().toggle_sort(&column)
                                },
                                "{column} {sort_marker(&query, column)}"
                            }
                        }
                    }
                }
                tbody {
                    {projection.page.iter().map(|record| {
                        let id = record.id();
                        let modified = projection.modified_ids.contains(&id);
                        let row_style = if modified { MODIFIED_ROW_STYLE } else { "" };
                        rsx!(
                            tr {
                                key: "{id}",
                                style: "{row_style}",
                                {columns.iter().map(|column| {
                                    let value = record.get(column).to_string();
                                    let column = column.clone();
                                    rsx!(
                                        td { style: "{CELL_STYLE}",
                                            input {
                                                style: "{cell_input_style(modified)}",
                                                value: "{value}",
                                                oninput: move |event| {
                                                    engine.write().edit_cell(id, &column, event.value());
                                                },
                                            }
                                        }
                                    )
                                })}
                            }
                        )
                    })}
                }
            }

            if total_pages > 1 {
                div {
                    style: "display: flex; gap: 8px; align-items: center; justify-content: space-between; margin: 12px 0;",
                    span { "{range_label}" }
                    div {
                        style: "display: flex; gap: 4px;",
                        button {
                            disabled: current_page <= 1,
                            onclick: move |_| engine.write().previous_page(),
                            "Previous"
                        }
                        {page_window.iter().copied().map(|page_num| {
                            let button_style = if page_num == current_page {
                                ACTIVE_PAGE_STYLE
                            } else {
                                ""
                            };
                            rsx!(
                                button {
                                    key: "{page_num}",
                                    style: "{button_style}",
                                    onclick: move |_| engine.write().set_page(page_num),
                                    "{page_num}"
                                }
                            )
                        })}
                        button {
                            disabled: current_page >= total_pages,
                            onclick: move |_| engine.write().next_page(),
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
