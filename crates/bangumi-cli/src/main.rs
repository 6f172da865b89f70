use std::future::Future;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use bangumi_core::{BangumiError, BangumiScraper, WatchStatus};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod prompt;

use cli::{Cli, Commands};
use output::Delivery;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.hold_clipboard {
        return match output::hold_clipboard() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }
    init_tracing(cli.verbose);

    tokio::select! {
        result = run(&cli) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                report_error(&err, cli.json);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n{}", "Interrupted, nothing copied.".yellow());
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bangumi_core=debug,bangumi_import=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let scraper =
        BangumiScraper::with_config(cli.client_config()).context("failed to build HTTP client")?;
    let delivery = Delivery::from_flags(cli.print, cli.json);

    match (&cli.command, &cli.target) {
        (Some(Commands::Search { keyword }), _) => {
            search_session(&scraper, keyword.clone(), cli.status, delivery).await
        }
        (None, Some(target)) => {
            let status = cli.status.unwrap_or_default();
            import(&scraper, target, status, delivery).await
        }
        (None, None) => search_session(&scraper, None, cli.status, delivery).await,
    }
}

/// Fetches one subject and hands the record to the chosen output
async fn import(
    scraper: &BangumiScraper,
    input: &str,
    status: WatchStatus,
    delivery: Delivery,
) -> Result<()> {
    tracing::debug!(input, %status, "importing subject");
    let Some(record) = with_retry(move || scraper.fetch_subject(input, status)).await? else {
        return Ok(());
    };
    output::deliver(&record, delivery)
}

/// Search → pick → status → import, repeated until the user quits
///
/// A keyword given on the command line runs a single round.
async fn search_session(
    scraper: &BangumiScraper,
    mut keyword: Option<String>,
    status: Option<WatchStatus>,
    delivery: Delivery,
) -> Result<()> {
    if !prompt::is_interactive() {
        bail!("interactive search needs a terminal; pass a subject id or URL instead");
    }
    let single_round = keyword.is_some();

    loop {
        let kw = match keyword.take() {
            Some(kw) => kw,
            None => match prompt::keyword()? {
                Some(kw) => kw,
                None => break,
            },
        };

        if let Some(results) = with_retry(|| scraper.search(&kw)).await? {
            if results.is_empty() {
                eprintln!("{} {}", "No results for".yellow(), kw);
            } else {
                let Some(picked) = prompt::pick_result(&results)? else {
                    break;
                };

                if picked.id.is_empty() {
                    eprintln!(
                        "{} {}",
                        "Could not read a subject id from".red(),
                        picked
                    );
                } else {
                    let status = match status {
                        Some(status) => status,
                        None => match prompt::pick_status()? {
                            Some(status) => status,
                            None => break,
                        },
                    };
                    import(scraper, &picked.id, status, delivery).await?;
                }
            }
        }

        if single_round {
            break;
        }
    }

    Ok(())
}

/// Runs a request, offering a manual retry on network failure
///
/// Returns `Ok(None)` when the user declines to retry.
async fn with_retry<T, F, Fut>(mut request: F) -> Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bangumi_core::Result<T>>,
{
    loop {
        match request().await {
            Ok(value) => return Ok(Some(value)),
            Err(err) if err.is_network() => {
                eprintln!("{} {}", "Network error:".red().bold(), err);
                if !prompt::is_interactive() {
                    return Err(err.into());
                }
                if !prompt::confirm_retry()? {
                    eprintln!("Import abandoned.");
                    return Ok(None);
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        let value = match err.downcast_ref::<BangumiError>() {
            Some(e) => serde_json::json!({ "error": e }),
            None => serde_json::json!({ "error": format!("{err:#}") }),
        };
        println!("{}", value);
    } else {
        eprintln!("{} {err:#}", "error:".red().bold());
    }
}
