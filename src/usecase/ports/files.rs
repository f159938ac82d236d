use std::path::Path;

use crate::domain::error::EngineError;

/// Where import text comes from and export text goes to.
pub trait FileStore: Send + Sync {
    fn read_text(&self, path: &Path) -> Result<String, EngineError>;
    fn write_text(&self, path: &Path, contents: &str) -> Result<(), EngineError>;
}
