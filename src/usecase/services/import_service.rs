use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::dataset::Dataset;
use crate::domain::error::EngineError;
use crate::usecase::ports::codec::TabularCodec;
use crate::usecase::ports::files::FileStore;

/// Name remembered for a dataset that was not read from a file.
pub const UNNAMED_SOURCE: &str = "dataset.csv";

pub struct ImportService {
    codec: Arc<dyn TabularCodec>,
}

impl ImportService {
    pub fn new(codec: Arc<dyn TabularCodec>) -> Self {
        Self { codec }
    }

    /// Parses `text` completely before anything else sees it, so a failure
    /// never yields a partial dataset.
    pub fn parse(&self, text: &str) -> Result<Dataset, EngineError> {
        let data = self.codec.decode(text)?;
        Ok(Dataset::from_tabular(data))
    }

    pub fn read(&self, files: &dyn FileStore, path: &Path) -> Result<(String, Dataset), EngineError> {
        let text = files.read_text(path)?;
        let dataset = self.parse(&text)?;
        Ok((source_name(path), dataset))
    }
}

pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNNAMED_SOURCE.to_string())
}
