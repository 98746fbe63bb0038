// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::common::error::AppError;
use crate::domain::constants::{BUTTON_CONNECT, BUTTON_MINT, UI_TITLE};
use crate::services::marketplace::{MarketplaceSession, Notifier};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Connect,
    Mint,
    Quit,
}

impl Click {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "c" | "connect" => Some(Click::Connect),
            "2" | "m" | "mint" => Some(Click::Mint),
            "q" | "quit" | "exit" => Some(Click::Quit),
            _ => None,
        }
    }
}

fn render<W: Write>(out: &mut W, account: Option<String>) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{UI_TITLE}")?;
    match account {
        Some(account) => writeln!(out, "  connected: {account}")?,
        None => writeln!(out, "  not connected")?,
    }
    writeln!(out, "  [1] {BUTTON_CONNECT}")?;
    writeln!(out, "  [2] {BUTTON_MINT}")?;
    writeln!(out, "  [q] quit")?;
    write!(out, "> ")?;
    out.flush()
}

/// Drive the session from line-oriented input, one click per line.
///
/// Each click finishes before the next line is read. A failed click is reported and the loop
/// keeps going; end of input quits.
pub async fn run_console<R, W, N>(
    session: &mut MarketplaceSession<N>,
    input: R,
    out: &mut W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    N: Notifier,
{
    let io_err = |e: std::io::Error| AppError::Unknown(e.into());
    let mut lines = input.lines();

    loop {
        render(out, session.account().map(|a| a.to_checksum(None))).map_err(io_err)?;
        let Some(line) = lines.next_line().await.map_err(io_err)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match Click::parse(&line) {
            Some(Click::Connect) => session.connect_wallet().await.map(|_| ()),
            Some(Click::Mint) => session.mint_nft().await.map(|_| ()),
            Some(Click::Quit) => break,
            None => {
                writeln!(out, "unknown choice '{}'", line.trim()).map_err(io_err)?;
                continue;
            }
        };

        if let Err(e) = outcome {
            tracing::debug!(target: "console", error = ?e, "Action failed");
            eprintln!("Error: {e}");
        }
    }

    writeln!(out).map_err(io_err)?;
    Ok(())
}
