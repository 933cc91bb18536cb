//! Terminal views and command handlers

pub mod chart;
pub mod entry;
pub mod export;
pub mod list;
pub mod setup;
pub mod summary;
pub mod ui;
