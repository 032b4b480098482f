//! CLI module for mathtutor.
//!
//! Flags are handled before the terminal is touched:
//!
//! ```ignore
//! use mathtutor::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", mathtutor::cli::version_string()),
//!     CliCommand::Help => print!("{}", mathtutor::cli::USAGE),
//!     CliCommand::RunTui(args) => run(args),
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, CliError, USAGE};
pub use version::{version_string, VERSION};
