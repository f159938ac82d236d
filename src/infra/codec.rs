use crate::domain::entities::dataset::TabularData;
use crate::domain::error::EngineError;
use crate::infra::export::csv::encode_csv;
use crate::infra::import::csv::decode_csv;
use crate::usecase::ports::codec::TabularCodec;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl TabularCodec for CsvCodec {
    fn decode(&self, text: &str) -> Result<TabularData, EngineError> {
        decode_csv(text)
    }

    fn encode(&self, data: &TabularData) -> Result<String, EngineError> {
        encode_csv(data)
    }
}
