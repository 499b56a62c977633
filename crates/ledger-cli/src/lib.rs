//! CLI library components for the ledger field mapper.

pub mod logging;
pub mod overrides;
pub mod report;
