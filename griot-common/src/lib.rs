//! # Griot Common Library
//!
//! Shared code for the Griot cultural-heritage archive:
//! - Content domain model (kinds, statuses, per-kind payloads, unified feed shape)
//! - Database models, initialization, and schema migrations
//! - Error taxonomy
//! - Configuration loading
//! - Timestamp and UUID utilities

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod ids;
pub mod time;

pub use content::{ContentKind, ContentStatus, KindDetails, ReportStatus, UnifiedContent};
pub use error::{Error, Result};
