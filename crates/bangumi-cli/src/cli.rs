//! Command line arguments

use bangumi_core::{ClientConfig, WatchStatus};
use clap::{Parser, Subcommand};

/// Internal flag that turns the process into a clipboard holder
pub const HOLD_CLIPBOARD_FLAG: &str = "--hold-clipboard";

#[derive(Parser, Debug)]
#[command(
    name = "bangumi-import",
    version,
    about = "Copy a bangumi subject as a BANGUMI_DATA snippet"
)]
pub struct Cli {
    /// Subject id (9912) or page URL (https://chii.in/subject/9912).
    /// Omit to search interactively.
    pub target: Option<String>,

    /// Watch status to record; prompted for in interactive mode when omitted
    #[arg(long, short, global = true, value_parser = parse_status)]
    pub status: Option<WatchStatus>,

    /// Print the snippet to stdout instead of copying it
    #[arg(long, global = true)]
    pub print: bool,

    /// Print the bare record as JSON instead of the snippet
    #[arg(long, global = true)]
    pub json: bool,

    /// Log requests and extraction details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Catalog site used for bare ids and searches
    #[arg(long, global = true, env = "BANGUMI_BASE_URL", default_value = bangumi_core::url::BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 15)]
    pub timeout: u64,

    /// Serve stdin as clipboard contents until replaced
    #[arg(long, hide = true)]
    pub hold_clipboard: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search by keyword, pick a result and import it
    #[command(visible_alias = "s")]
    Search { keyword: Option<String> },
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            ..ClientConfig::default()
        }
    }
}

fn parse_status(s: &str) -> Result<WatchStatus, String> {
    s.parse().map_err(|e: bangumi_core::BangumiError| e.to_string())
}
