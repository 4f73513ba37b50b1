/*!
`invoke` - child-process invocation for wrapped developer tools.

Every tool the server exposes funnels through the same flow:

  1. Compose an argument vector with `Invocation` (required tokens,
     conditional optional flags, repeated key=value map flags).
  2. `run()` the vector as a child process, capturing both streams.
  3. Hand the `InvocationOutput` to `translate` for shaping.

The builder never interprets exit codes and carries no state beyond the
argument vector; each invocation is built fresh per call and dropped when
the call completes.
*/

use std::collections::BTreeMap;
use std::fmt::Display;
use std::process::ExitStatus;

use tokio::process::Command;

use crate::log_debug;

pub mod translate;

/// One pending external process run: a program plus its ordered arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

/// Captured result of one completed process run. Owned by the call that
/// produced it; never shared or mutated afterwards.
#[derive(Debug)]
pub struct InvocationOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one required token.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.args.push(token.into());
        self
    }

    /// Append a sequence of required tokens.
    pub fn args<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Append `flag value` only when the optional parameter is present.
    ///
    /// Presence is `Option`-based, not falsy-based: `Some(0)` appends
    /// `flag 0` because a zero time limit is a materially different
    /// request than an unspecified one.
    pub fn opt_arg<T: Display>(mut self, flag: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.args.push(flag.to_string());
            self.args.push(v.to_string());
        }
        self
    }

    /// Flatten a map parameter into repeated `flag key=value` tokens,
    /// one pair per entry, in the map's iteration order.
    pub fn map_args(mut self, flag: &str, entries: &BTreeMap<String, String>) -> Self {
        for (key, value) in entries {
            self.args.push(flag.to_string());
            self.args.push(format!("{key}={value}"));
        }
        self
    }

    /// Repeat `flag value` once per list element, preserving order.
    pub fn list_args(mut self, flag: &str, values: &[String]) -> Self {
        for value in values {
            self.args.push(flag.to_string());
            self.args.push(value.clone());
        }
        self
    }

    /// The composed argument vector (program excluded). Exposed for tests
    /// and debug logging.
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Execute synchronously (from the caller's point of view): spawn the
    /// child, capture stdout/stderr as text, and block until it exits.
    ///
    /// A non-zero exit status is not an error here; interpreting it is the
    /// translator's job. Only a spawn failure surfaces as `Err`.
    pub async fn run(&self) -> std::io::Result<InvocationOutput> {
        log_debug!("invoke: {} {}", self.program, self.args.join(" "));
        let output = Command::new(&self.program).args(&self.args).output().await?;
        Ok(InvocationOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status,
        })
    }
}
