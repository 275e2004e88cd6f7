//! Notifier trait and shell command implementation.

use super::NotifyError;
use crate::monitor::ChangeEvent;
use std::net::IpAddr;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Shell used to interpret the notification command line.
const SHELL: &str = "/bin/sh";

/// Trait for reacting to classified address events.
///
/// Only events that [`should_notify`](ChangeEvent::should_notify) are passed
/// in; the caller awaits each call to completion before handling the next
/// event, so implementations never run concurrently with themselves.
pub trait Notifier: Send + Sync {
    /// Reacts to a new or changed address.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the notification could not be delivered.
    /// The caller logs the error and keeps monitoring.
    fn notify(
        &self,
        event: &ChangeEvent,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// What a notification command printed, and how it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Output lines with stdout and stderr interleaved, newlines stripped.
    pub lines: Vec<String>,
    /// The command's exit status.
    pub status: ExitStatus,
}

/// Runs `<script> <address>` through `/bin/sh` for each notified event.
///
/// Standard error is folded into standard output, and every output line is
/// logged at INFO as `==> <line>`. The command is waited for before
/// [`notify`](Notifier::notify) returns. A non-zero exit status is logged
/// but is not an error.
///
/// The script string is passed to the shell verbatim and is neither
/// validated nor quoted.
///
/// # Example
///
/// ```no_run
/// use ipnotd::notify::CommandNotifier;
///
/// # async fn example() -> Result<(), ipnotd::notify::NotifyError> {
/// let notifier = CommandNotifier::new("/usr/local/bin/update-dns");
/// let output = notifier.run("192.0.2.7".parse().unwrap()).await?;
/// println!("exited with {}", output.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNotifier {
    script: String,
}

impl CommandNotifier {
    /// Creates a notifier running `script`.
    #[must_use]
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Returns the configured script.
    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Builds the command line for `address`: the script, a space, the address.
    #[must_use]
    pub fn command_line(&self, address: IpAddr) -> String {
        format!("{} {address}", self.script)
    }

    /// Runs the command for `address` and collects its output.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Spawn`] if the shell cannot be started
    /// - [`NotifyError::Read`] if reading its output fails
    /// - [`NotifyError::Wait`] if the child cannot be reaped
    pub async fn run(&self, address: IpAddr) -> Result<CommandOutput, NotifyError> {
        let command = format!("{} 2>&1", self.command_line(address));
        tracing::debug!("Running \"{command}\"");

        let mut child = Command::new(SHELL)
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| NotifyError::Spawn {
                command: command.clone(),
                source,
            })?;

        // The pipe is dropped before waiting, so a child still writing after
        // a read failure gets EPIPE instead of blocking forever.
        let lines = match child.stdout.take() {
            Some(stdout) => read_lines(stdout).await,
            None => Ok(Vec::new()),
        };
        let status = child.wait().await.map_err(NotifyError::Wait)?;
        let lines = lines?;

        if status.success() {
            tracing::debug!("\"{command}\" finished");
        } else {
            tracing::warn!("\"{command}\" exited with {status}");
        }

        Ok(CommandOutput { lines, status })
    }
}

impl Notifier for CommandNotifier {
    async fn notify(&self, event: &ChangeEvent) -> Result<(), NotifyError> {
        self.run(event.address).await.map(|_| ())
    }
}

/// Logs and collects every line from `reader` until end-of-file.
///
/// Lines are split on `\n` only and decoded lossily, so binary output
/// cannot fail the read.
async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>, NotifyError> {
    let mut reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(NotifyError::Read)?;
        if n == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf).into_owned();
        tracing::info!("==> {line}");
        lines.push(line);
    }

    Ok(lines)
}
