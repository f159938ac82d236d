use csv::WriterBuilder;

use crate::domain::entities::dataset::TabularData;
use crate::domain::error::EngineError;

/// Header row then one line per row. Fields holding the delimiter, a quote
/// or a line break are quoted.
pub fn encode_csv(data: &TabularData) -> Result<String, EngineError> {
    if data.columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&data.columns).map_err(serialize_error)?;
    for row in &data.rows {
        writer.write_record(row).map_err(serialize_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| EngineError::Serialize(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| EngineError::Serialize(err.to_string()))
}

fn serialize_error(err: csv::Error) -> EngineError {
    EngineError::Serialize(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owned(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn writes_header_then_rows() {
        let data = TabularData {
            columns: vec!["Title".to_string(), "Year".to_string()],
            rows: owned(&[&["Foo", "2000"], &["", "1999"]]),
        };

        let text = encode_csv(&data).expect("encode should succeed");

        assert_eq!(text, "Title,Year\nFoo,2000\n,1999\n");
    }

    #[test]
    fn quotes_fields_that_need_it() {
        let data = TabularData {
            columns: vec!["Title".to_string(), "Note".to_string()],
            rows: owned(&[&["Dust, Ash", "say \"hi\""], &["two\nlines", "plain"]]),
        };

        let text = encode_csv(&data).expect("encode should succeed");

        assert_eq!(
            text,
            "Title,Note\n\"Dust, Ash\",\"say \"\"hi\"\"\"\n\"two\nlines\",plain\n"
        );
    }

    #[test]
    fn empty_schema_writes_nothing() {
        let text = encode_csv(&TabularData::default()).expect("encode should succeed");

        assert_eq!(text, "");
    }
}
