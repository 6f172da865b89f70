//! Delivering the formatted record

use anyhow::{Context, Result};
use bangumi_core::{to_js_snippet, to_json, SubjectRecord};
use colored::Colorize;

/// Where the formatted record goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Snippet onto the system clipboard
    Clipboard,
    /// Snippet on stdout
    Print,
    /// Bare record JSON on stdout
    Json,
}

impl Delivery {
    pub fn from_flags(print: bool, json: bool) -> Self {
        if json {
            Delivery::Json
        } else if print {
            Delivery::Print
        } else {
            Delivery::Clipboard
        }
    }
}

pub fn deliver(record: &SubjectRecord, delivery: Delivery) -> Result<()> {
    match delivery {
        Delivery::Json => {
            println!("{}", to_json(record)?);
        }
        Delivery::Print => {
            println!("{}", to_js_snippet(record)?);
        }
        Delivery::Clipboard => {
            let snippet = to_js_snippet(record)?;
            match copy_to_clipboard(&snippet) {
                Ok(()) => {
                    eprintln!(
                        "{} {} [{}] copied to clipboard. Paste it into the import box.",
                        "✔".green().bold(),
                        display_title(record),
                        record.id
                    );
                }
                Err(e) => {
                    tracing::warn!("clipboard unavailable: {e:#}");
                    eprintln!("{}", "Clipboard unavailable, printing instead:".yellow());
                    println!("{}", snippet);
                }
            }
        }
    }
    Ok(())
}

/// Line the clipboard holder writes once it owns the selection
const HOLDER_READY: &str = "ok";

/// Copies the text in place; the clipboard keeps it after we exit
#[cfg(not(target_os = "linux"))]
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write clipboard")?;
    Ok(())
}

/// Hands the text to a detached copy of this binary
///
/// On X11 and Wayland the selection lives only as long as its owner, so a
/// background process keeps serving it until another program takes over.
/// Success is reported only after that process confirms ownership.
#[cfg(target_os = "linux")]
fn copy_to_clipboard(text: &str) -> Result<()> {
    use std::io::{BufRead, BufReader, Write};
    use std::os::unix::process::CommandExt;
    use std::process::{Command, Stdio};

    let exe = std::env::current_exe().context("failed to locate own executable")?;
    let mut child = Command::new(exe)
        .arg(crate::cli::HOLD_CLIPBOARD_FLAG)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .context("failed to start clipboard holder")?;

    {
        let mut stdin = child.stdin.take().context("clipboard holder has no stdin")?;
        stdin
            .write_all(text.as_bytes())
            .context("failed to send text to clipboard holder")?;
    }

    let mut line = String::new();
    if let Some(stdout) = child.stdout.take() {
        BufReader::new(stdout)
            .read_line(&mut line)
            .context("failed to read from clipboard holder")?;
    }

    if holder_ready(&line) {
        tracing::debug!(pid = child.id(), "clipboard holder running");
        Ok(())
    } else {
        let status = child.wait().context("clipboard holder vanished")?;
        anyhow::bail!("clipboard holder exited without taking the selection ({status})")
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn holder_ready(line: &str) -> bool {
    line.trim() == HOLDER_READY
}

/// Body of the detached holder process
///
/// Reads the text from stdin, takes the selection, acknowledges on stdout
/// and then blocks until another program replaces the clipboard contents.
pub fn hold_clipboard() -> Result<()> {
    use std::io::Write;

    let text = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
    let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
    clipboard
        .set_text(text.clone())
        .context("failed to write clipboard")?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{HOLDER_READY}")?;
    stdout.flush()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait()
            .text(text)
            .context("lost clipboard while holding it")?;
    }
    Ok(())
}

fn display_title(record: &SubjectRecord) -> &str {
    if record.main_title.is_empty() {
        "(untitled)"
    } else {
        &record.main_title
    }
}
