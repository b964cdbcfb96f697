//! Data models shared across the pipeline.

pub mod config;
pub mod record;

pub use config::FieldscanConfig;
pub use record::{FieldMap, ItemRecord};
