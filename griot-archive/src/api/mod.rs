//! HTTP API handlers

pub mod content;
pub mod error;
pub mod health;
pub mod moderation;

pub use error::ApiError;
