use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::dataset::RecordId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to parse delimited text{}: {message}", line_suffix(.line))]
    Parse { line: Option<u64>, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dataset: {0}")]
    Serialize(String),

    #[error("no record with id {0}")]
    EditOnMissingRow(RecordId),
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}
