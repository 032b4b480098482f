//! Command-line argument parsing for mathtutor.

use thiserror::Error;

/// Overrides accepted on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// `--url <URL>`: backend base URL
    pub base_url: Option<String>,
    /// `--student <ID>`: student id sent with questions
    pub student_id: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the TUI application (default)
    RunTui(CliArgs),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

pub const USAGE: &str = "\
Usage: mathtutor [OPTIONS]

Options:
  --url <URL>       Backend base URL (env: MATHTUTOR_API_URL, default: http://localhost:8000)
  --student <ID>    Student id sent with questions (env: MATHTUTOR_STUDENT_ID, default: student1)
  -V, --version     Print version
  -h, --help        Print help
";

/// Parse command-line arguments.
///
/// `--version` and `--help` win as soon as they are seen.
///
/// # Examples
///
/// ```
/// use mathtutor::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["mathtutor".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--url" | "--student" => {
                let value = inline
                    .or_else(|| args.next())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| CliError::MissingValue(flag.clone()))?;
                if flag == "--url" {
                    parsed.base_url = Some(value);
                } else {
                    parsed.student_id = Some(value);
                }
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(CliCommand::RunTui(parsed))
}
