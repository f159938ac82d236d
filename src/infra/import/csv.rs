use csv::ReaderBuilder;

use crate::domain::entities::dataset::TabularData;
use crate::domain::error::EngineError;

/// Tokenizes CSV into a header row and raw data rows.
///
/// Rows may be shorter or longer than the header; normalizing them is left
/// to [`Dataset::from_tabular`](crate::domain::entities::dataset::Dataset::from_tabular).
pub fn decode_csv(text: &str) -> Result<TabularData, EngineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let columns = match records.next() {
        Some(header) => header
            .map_err(parse_error)?
            .iter()
            .map(str::to_string)
            .collect(),
        None => return Ok(TabularData::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(parse_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TabularData { columns, rows })
}

fn parse_error(err: csv::Error) -> EngineError {
    EngineError::Parse {
        line: err.position().map(|pos| pos.line()),
        message: err.to_string(),
    }
}
