#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod types;

pub use crate::error::MappingError;
pub use crate::model::FieldMappingModel;
pub use crate::session::{HeaderNames, ImportSession};
pub use crate::types::{
    DestinationRow, FieldMapping, MappingEntry, MappingPayload, MappingSummary,
};
