//! Database access layer
//!
//! - `writer`: atomic two-table inserts for submissions
//! - `reader`: per-kind queries and the cross-kind feed aggregator
//! - `moderation`: the content status state machine
//! - `reports`: the report sub-workflow
//! - `contributors`: contributor rows
//! - `settings`: typed access to the settings table

pub mod contributors;
pub mod moderation;
pub mod reader;
pub mod reports;
pub mod settings;
pub mod writer;
