//! Library side of the `uniformity_check` tool.
//!
//! # Modules
//!
//! - `config` - run, range and tolerance settings, loaded from TOML
//! - `checks` - draws samples per output method and runs the uniformity tests
//! - `logging` - tracing subscriber setup

pub mod checks;
pub mod config;
pub mod logging;

pub use checks::{CheckKind, CheckOutcome, print_report, run_all, run_check};
pub use config::Config;
pub use logging::init_logger;
