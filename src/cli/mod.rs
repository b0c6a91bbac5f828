//! Command-line interface.
//!
//! This module provides:
//! - Argument parsing
//! - Version display
//! - Running the search commands against the backend
//!
//! # Usage
//!
//! ```ignore
//! use orgscout::cli::{parse_args, run_cli_command};
//!
//! let parsed = parse_args(std::env::args())?;
//! run_cli_command(parsed).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CliOptions, ParsedArgs, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::io::Write;

use crate::app::{run_request_with, Session};
use crate::client::ScoutClient;
use crate::config::{ClientConfig, Credentials, EMAIL_ENV, PASSWORD_ENV};
use crate::markdown::{render_display, RenderOptions};
use crate::models::PeopleSearchRequest;
use crate::reducer::{DisplayValue, Endpoint};
use crate::traits::HttpClient;

/// Configuration for a parsed command line: environment first, then flags.
pub fn resolve_config(options: &CliOptions) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &options.api_url {
        config = config.with_api_base_url(url.as_str());
    }
    config.with_hyperlinks(!options.no_links)
}

/// Execute a parsed command line, writing results to stdout.
pub async fn run_cli_command(parsed: ParsedArgs) -> Result<()> {
    match parsed.command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        command => {
            let config = resolve_config(&parsed.options);
            let render = RenderOptions::for_stdout(&config);
            let credentials = Credentials::from_env();
            let client = ScoutClient::new(config).wrap_err("Failed to create HTTP client")?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            run_command(command, &client, &credentials, &render, &mut out).await
        }
    }
}

/// Run one search command, writing progress and results to `out`.
pub async fn run_command<C, W>(
    command: CliCommand,
    client: &ScoutClient<C>,
    credentials: &Credentials,
    render: &RenderOptions,
    out: &mut W,
) -> Result<()>
where
    C: HttpClient + 'static,
    W: Write,
{
    let mut session = Session::new();

    match command {
        CliCommand::Orgs { org_name } => {
            let body = session.org_search_request(&org_name);
            execute(&mut session, client, Endpoint::Organizations, &body, render, out).await
        }
        CliCommand::People { org_id, title } => {
            let body = PeopleSearchRequest::new(org_id, title.trim());
            execute(&mut session, client, Endpoint::People, &body, render, out).await
        }
        CliCommand::Run {
            org_name,
            title,
            prompt,
            org_index,
        } => {
            if !credentials.is_complete() {
                return Err(eyre!("{} and {} must be set", EMAIL_ENV, PASSWORD_ENV));
            }

            let body = session.org_search_request(&org_name);
            execute(&mut session, client, Endpoint::Organizations, &body, render, out).await?;

            let org = session.select_organization_at(org_index).wrap_err_with(|| {
                format!("No organization at index {} for {:?}", org_index, org_name)
            })?;
            writeln!(out, "Selected {} ({})", org.name, org.id)?;

            let body = session.people_search_request(&title)?;
            execute(&mut session, client, Endpoint::People, &body, render, out).await?;

            let body = session.summarize_request(&prompt, credentials)?;
            execute(&mut session, client, Endpoint::Summary, &body, render, out).await
        }
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}

/// Run one request. Streamed transcripts are printed line by line as they
/// grow; a summary is printed once, rendered, when the request is done.
async fn execute<C, B, W>(
    session: &mut Session,
    client: &ScoutClient<C>,
    endpoint: Endpoint,
    body: &B,
    render: &RenderOptions,
    out: &mut W,
) -> Result<()>
where
    C: HttpClient + 'static,
    B: serde::Serialize,
    W: Write,
{
    let mut printed = 0;
    let mut write_error = None;

    let result = run_request_with(session, client, endpoint, body, |session| {
        if endpoint == Endpoint::Summary || write_error.is_some() {
            return;
        }
        if let Err(e) = print_new_lines(session, &mut printed, render, out) {
            write_error = Some(e);
        }
    })
    .await;

    if let Some(e) = write_error {
        return Err(e.into());
    }

    if endpoint == Endpoint::Summary {
        let parsed = render_display(session.display(), render);
        for line in &parsed.lines {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;

    result.map_err(Into::into)
}

fn print_new_lines<W: Write>(
    session: &Session,
    printed: &mut usize,
    render: &RenderOptions,
    out: &mut W,
) -> std::io::Result<()> {
    let lines = session.transcript().lines();
    if lines.len() < *printed {
        *printed = 0;
    }
    for line in &lines[*printed..] {
        let display = DisplayValue::Plain {
            markdown: line.clone(),
        };
        for rendered in render_display(&display, render).lines {
            writeln!(out, "{}", rendered)?;
        }
    }
    *printed = lines.len();
    out.flush()
}
