pub mod dataset;
pub mod edit;
pub mod query;
