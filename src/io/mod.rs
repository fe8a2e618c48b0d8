//! I/O module
//!
//! Handles session script parsing and history export.
//!
//! # Components
//!
//! - `script` - session script grammar and per-line parsing
//! - `export` - plain text history export

pub mod export;
pub mod script;

pub use export::write_history;
pub use script::{parse_line, Command};
