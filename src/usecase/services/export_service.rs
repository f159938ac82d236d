use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::dataset::Dataset;
use crate::domain::error::EngineError;
use crate::usecase::ports::codec::TabularCodec;
use crate::usecase::ports::files::FileStore;

const EDITED_SUFFIX: &str = "_edited";
const DEFAULT_EXTENSION: &str = "csv";

pub struct ExportService {
    codec: Arc<dyn TabularCodec>,
}

impl ExportService {
    pub fn new(codec: Arc<dyn TabularCodec>) -> Self {
        Self { codec }
    }

    /// The whole dataset in its own order and schema, regardless of any
    /// search, sort or page the caller is looking at.
    pub fn render(&self, dataset: &Dataset) -> Result<String, EngineError> {
        self.codec.encode(&dataset.to_tabular())
    }

    pub fn write(
        &self,
        files: &dyn FileStore,
        dataset: &Dataset,
        path: &Path,
    ) -> Result<(), EngineError> {
        let text = self.render(dataset)?;
        files.write_text(path, &text)
    }
}

/// `books.csv` becomes `books_edited.csv`. A name without an extension gets
/// `.csv`, since that is what the export writes.
pub fn derive_export_file_name(source_name: &str) -> String {
    let path = Path::new(source_name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "export".to_string());
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    format!("{stem}{EDITED_SUFFIX}.{extension}")
}
