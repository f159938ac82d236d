use crate::domain::entities::dataset::TabularData;
use crate::domain::error::EngineError;

/// Delimited-text parser/serializer.
pub trait TabularCodec: Send + Sync {
    /// Splits raw text into a header row and positional data rows. The first
    /// record becomes `columns`; empty input yields no columns and no rows.
    fn decode(&self, text: &str) -> Result<TabularData, EngineError>;

    fn encode(&self, data: &TabularData) -> Result<String, EngineError>;
}
