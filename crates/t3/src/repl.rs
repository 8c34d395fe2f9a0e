//! Line-oriented loop driving a [`Session`].

use crate::command::Command;
use crate::session::{Reply, Session};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, instrument};

/// Reads commands from `input` until `quit` or end of input.
///
/// The board is printed after every command that changes it. Invalid
/// input and failed file operations are reported and the loop continues.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    let mut lines = input.lines();
    writeln!(output, "{}\n", session.render())?;

    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next().transpose()? else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        let mut reply = match session.handle(command) {
            Ok(reply) => reply,
            Err(e) => {
                writeln!(output, "Error: {e:#}")?;
                continue;
            }
        };

        if let Reply::Confirm(confirmation) = reply {
            write!(output, "{}", confirmation.prompt())?;
            output.flush()?;
            let answer = lines.next().transpose()?.unwrap_or_default();
            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                writeln!(output, "Cancelled.")?;
                continue;
            }
            reply = session.confirm(confirmation)?;
        }

        writeln!(output, "{reply}")?;
        match reply {
            Reply::Quit => break,
            Reply::Help | Reply::Rejected(_) | Reply::Saved(_) => {}
            _ => writeln!(output, "\n{}\n", session.render())?,
        }
    }
    Ok(())
}
