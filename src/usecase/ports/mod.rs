pub mod codec;
pub mod files;
