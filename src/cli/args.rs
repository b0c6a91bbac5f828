//! Command-line argument parsing.
//!
//! Flags may appear anywhere on the command line; the remaining words are
//! the subcommand and its positional arguments.

/// Usage text printed by `--help`
pub const USAGE: &str = "\
Usage:
  orgscout orgs <org name>
  orgscout people <org id> <title keyword>
  orgscout run <org name> <title keyword> <prompt> [--org-index N]

Options:
  --api-url <url>    Backend base URL (env: ORGSCOUT_API_URL)
  --org-index <n>    Organization to select in `run` (default: 0)
  --no-links         Print link targets instead of terminal hyperlinks
  -V, --version      Print version
  -h, --help         Print this help

Environment:
  ORGSCOUT_EMAIL, ORGSCOUT_PASSWORD   Credentials for the summary step
  ORGSCOUT_LOG                        Log filter (default: warn)";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Search organizations by name
    Orgs { org_name: String },
    /// Search people of one organization by title
    People { org_id: String, title: String },
    /// Organization search, selection, people search and summary in one go
    Run {
        org_name: String,
        title: String,
        prompt: String,
        org_index: usize,
    },
}

/// Options shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// `--api-url`, overrides the environment
    pub api_url: Option<String>,
    /// `--no-links`
    pub no_links: bool,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub command: CliCommand,
    pub options: CliOptions,
}

/// Argument errors, shown together with the usage text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("missing argument: <{0}>")]
    MissingArgument(&'static str),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
}

/// Parse command-line arguments, program name first.
///
/// # Examples
///
/// ```
/// use orgscout::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["orgscout".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<ParsedArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut org_index: Option<usize> = None;
    let mut words: Vec<String> = Vec::new();

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(simple(CliCommand::Version)),
            "--help" | "-h" => return Ok(simple(CliCommand::Help)),
            "--no-links" => options.no_links = true,
            "--api-url" => {
                options.api_url = Some(args.next().ok_or(ArgsError::MissingValue("--api-url"))?);
            }
            "--org-index" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--org-index"))?;
                let index = value.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: "--org-index",
                    value: value.clone(),
                })?;
                org_index = Some(index);
            }
            flag if flag.starts_with("--") && flag.len() > 2 => {
                return Err(ArgsError::UnknownFlag(arg));
            }
            _ => words.push(arg),
        }
    }

    let mut words = words.into_iter();
    let name = words.next().ok_or(ArgsError::MissingCommand)?;
    let mut positional =
        |placeholder: &'static str| words.next().ok_or(ArgsError::MissingArgument(placeholder));

    let command = match name.as_str() {
        "orgs" => CliCommand::Orgs {
            org_name: positional("org name")?,
        },
        "people" => CliCommand::People {
            org_id: positional("org id")?,
            title: positional("title keyword")?,
        },
        "run" => CliCommand::Run {
            org_name: positional("org name")?,
            title: positional("title keyword")?,
            prompt: positional("prompt")?,
            org_index: org_index.unwrap_or(0),
        },
        "help" => CliCommand::Help,
        _ => return Err(ArgsError::UnknownCommand(name)),
    };

    if let Some(extra) = words.next() {
        return Err(ArgsError::UnexpectedArgument(extra));
    }

    Ok(ParsedArgs { command, options })
}

fn simple(command: CliCommand) -> ParsedArgs {
    ParsedArgs {
        command,
        options: CliOptions::default(),
    }
}
