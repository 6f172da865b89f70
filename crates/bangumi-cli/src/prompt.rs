//! Interactive prompts
//!
//! Every prompt returns `Ok(None)` when the user backs out, either with
//! Esc or with Ctrl-C (which the terminal delivers as a key press while
//! a prompt is active).

use std::io::{self, IsTerminal};

use anyhow::Result;
use bangumi_core::{SearchResult, WatchStatus};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Whether prompts can be shown at all
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Maps a user interrupt to `None` and keeps every other error
fn cancelled_on_interrupt<T>(result: dialoguer::Result<Option<T>>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Asks for a search keyword; an empty answer means quit
pub fn keyword() -> Result<Option<String>> {
    let answer = Input::<String>::with_theme(&theme())
        .with_prompt("Search keyword (empty to quit)")
        .allow_empty(true)
        .interact_text()
        .map(Some);

    Ok(cancelled_on_interrupt(answer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Lets the user pick one search result
pub fn pick_result(results: &[SearchResult]) -> Result<Option<&SearchResult>> {
    let items: Vec<String> = results.iter().map(ToString::to_string).collect();
    let selection = Select::with_theme(&theme())
        .with_prompt("Select a subject (Esc to cancel)")
        .items(&items)
        .default(0)
        .interact_opt();

    Ok(cancelled_on_interrupt(selection)?.map(|idx| &results[idx]))
}

/// Lets the user pick a watch status, `planned` preselected
pub fn pick_status() -> Result<Option<WatchStatus>> {
    let default_idx = WatchStatus::ALL
        .iter()
        .position(|s| *s == WatchStatus::default())
        .unwrap_or(0);

    let selection = Select::with_theme(&theme())
        .with_prompt("Watch status")
        .items(&WatchStatus::ALL)
        .default(default_idx)
        .interact_opt();

    Ok(cancelled_on_interrupt(selection)?.map(|idx| WatchStatus::ALL[idx]))
}

/// Asks whether a failed request should be sent again
pub fn confirm_retry() -> Result<bool> {
    let answer = Confirm::with_theme(&theme())
        .with_prompt("Network request failed. Retry?")
        .default(true)
        .interact_opt();

    Ok(cancelled_on_interrupt(answer)?.unwrap_or(false))
}
