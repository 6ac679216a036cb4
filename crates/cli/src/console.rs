//! Interactive terminal input.
//!
//! Reads stdin on a background task and hands complete lines to the chat
//! loop over a channel, so the loop only ever awaits one thing.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// What the user asked for on one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Message(String),
    Clear,
}

/// Classify a raw line. `None` means the session should end.
///
/// Blank lines are passed through as empty messages so the session can
/// reject them the same way it rejects any other empty input.
pub fn parse_line(line: &str) -> Option<ConsoleInput> {
    let trimmed = line.trim();
    match trimmed {
        "exit" | "quit" | "/exit" | "/quit" | ":q" => None,
        "/clear" => Some(ConsoleInput::Clear),
        _ => Some(ConsoleInput::Message(trimmed.to_string())),
    }
}

/// Start reading stdin. The channel closes on exit commands, EOF (Ctrl+D)
/// or a read error.
pub fn start() -> mpsc::Receiver<ConsoleInput> {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let Some(input) = parse_line(&line) else {
                        break;
                    };
                    if tx.send(input).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read from stdin");
                    break;
                }
            }
        }
    });

    rx
}
