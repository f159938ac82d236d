use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod usecase;

#[cfg(test)]
mod tests;

use crate::infra::codec::CsvCodec;
use crate::usecase::engine::{EngineSettings, TableEngine};

/// Engine wired to the CSV codec.
pub fn csv_engine(settings: EngineSettings) -> TableEngine {
    TableEngine::new(Arc::new(CsvCodec), settings)
}
