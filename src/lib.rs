//! Progress forecasting and journal sentiment for long-term dreams.

pub mod analyst;
pub mod board;
pub mod config;
pub mod error;
pub mod forecast;
pub mod messages;
pub mod models;
pub mod report;
pub mod sentiment;

pub use error::{DreamError, Result};
pub use forecast::analyze;
pub use models::{Category, Dream, Goal, Insight, InsightStatus, InsightTone, JournalEntry};
pub use sentiment::Lexicon;
