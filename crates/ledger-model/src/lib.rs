#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod field;
pub mod session;

pub use catalog::{AliasTable, Catalog};
pub use error::{ModelError, Result};
pub use field::{ConfidenceTier, DestinationField};
pub use session::{SessionContext, UserRef};
