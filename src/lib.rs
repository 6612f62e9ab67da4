//! Fault attribution and compliance reporting for linehaul trip exports

pub mod analytics;
pub mod api;
pub mod attribution;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod percent;
pub mod rules;

pub use engine::{summarize, summarize_rows, EngineConfig, Report};
pub use error::{LinehaulError, Result};
