use std::path::Path;

use crate::domain::error::EngineError;
use crate::usecase::ports::files::FileStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    /// Bytes that are not UTF-8 count as malformed input, not a read failure.
    fn read_text(&self, path: &Path) -> Result<String, EngineError> {
        let bytes = std::fs::read(path).map_err(|source| EngineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        String::from_utf8(bytes).map_err(|err| EngineError::Parse {
            line: None,
            message: format!("{} is not valid UTF-8: {err}", path.display()),
        })
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), EngineError> {
        std::fs::write(path, contents).map_err(|source| EngineError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
