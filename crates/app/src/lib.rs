//! Command-line front end for the flashcards services.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod study_loop;

pub use config::AppConfig;
pub use logging::{Verbosity, init_logging};
