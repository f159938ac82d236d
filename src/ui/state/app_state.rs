use dioxus::prelude::{use_signal, Signal};

use shelf::config::AppConfig;
use shelf::csv_engine;
use shelf::infra::sample::{SampleGenerator, SAMPLE_FILE_NAME};
use shelf::usecase::engine::TableEngine;

pub struct AppState {
    pub engine: Signal<TableEngine>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    /// Starts on a generated catalogue until the user imports a file.
    pub fn new(config: &AppConfig) -> Self {
        let settings = config.engine_settings();
        let sample_size = config.sample_size;
        let sample_seed = config.sample_seed;
        Self {
            engine: use_signal(move || {
                let mut engine = csv_engine(settings);
                let sample = SampleGenerator::new(sample_seed).generate(sample_size);
                engine.load_dataset(SAMPLE_FILE_NAME, sample);
                engine
            }),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
