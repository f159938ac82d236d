pub mod engine;
pub mod ports;
pub mod services;
