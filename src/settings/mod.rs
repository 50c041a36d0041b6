//! Settings are read from a TOML file, see `settings/dev.toml`.
//! `bin/settings_demo.rs` prints what gets loaded.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
