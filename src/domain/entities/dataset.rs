use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::EngineError;

/// Header plus positional rows; what a delimited-text codec reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Surrogate key assigned at import time, 1-based in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value)
    }
}

impl From<RecordId> for u64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: RecordId, values: BTreeMap<String, String>) -> Self {
        Self { id, values }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Cell value for `column`, or `""` when the record has no such cell.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn set(&mut self, column: &str, value: String) {
        self.values.insert(column.to_string(), value);
    }
}

/// Ordered records sharing a column schema fixed at import time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Builds a dataset from positional rows.
    ///
    /// Header names are trimmed. Rows whose every field is blank are dropped,
    /// the survivors are numbered from 1 in source order, and fields missing
    /// from short rows default to the empty string. Fields past the last
    /// header are ignored.
    pub fn from_tabular(data: TabularData) -> Self {
        let columns: Vec<String> = data
            .columns
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        let records = data
            .rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .enumerate()
            .map(|(idx, row)| {
                let values = columns
                    .iter()
                    .enumerate()
                    .map(|(col_idx, column)| {
                        let value = row.get(col_idx).cloned().unwrap_or_default();
                        (column.clone(), value)
                    })
                    .collect();
                Record::new(RecordId(idx as u64 + 1), values)
            })
            .collect();

        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// Sets one cell of the record with `id`, adding the column to that
    /// record if it was absent.
    pub fn set_cell(&mut self, id: RecordId, column: &str, value: String) -> Result<(), EngineError> {
        let idx = self.position(id).ok_or(EngineError::EditOnMissingRow(id))?;
        self.records[idx].set(column, value);
        Ok(())
    }

    /// Rows in schema order, the shape the serializer expects.
    pub fn to_tabular(&self) -> TabularData {
        let rows = self
            .records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|column| record.get(column).to_string())
                    .collect()
            })
            .collect();

        TabularData {
            columns: self.columns.clone(),
            rows,
        }
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        // ids are dense after import; try slot id-1 before scanning
        let guess = (id.0 as usize).checked_sub(1);
        if let Some(idx) = guess.filter(|&idx| self.records.get(idx).is_some_and(|r| r.id == id)) {
            return Some(idx);
        }
        self.records.iter().position(|record| record.id == id)
    }
}
