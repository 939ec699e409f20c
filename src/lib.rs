pub mod app;
pub mod auxfile;
pub mod cli;
pub mod config;
pub mod draft;
pub mod entry;
pub mod error;
pub mod field;
pub mod groups;
pub mod history;
pub mod output;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
