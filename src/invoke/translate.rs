/*!
`translate.rs` - shaping captured process output into caller-facing values.

Three expected shapes:
  - plain text (stdout, surrounding whitespace trimmed)
  - line list (stdout split on line boundaries, interior empty lines kept)
  - JSON document (stdout parsed with serde_json)

Failure taxonomy:
  - Process: the binary exited non-zero; the message names the operation
    and embeds the captured stderr. Exit code and partial stdout are
    deliberately not retained.
  - Decode: the binary exited zero but its stdout did not parse into the
    expected shape; never masked as a process failure.
  - Spawn: the binary could not be started at all.

No retries, no recovery, no partial results: each call yields one fully
formed value or one failure.
*/

use std::fmt;

use rmcp::model::ErrorData;
use serde_json::Value;

use super::{Invocation, InvocationOutput};

/// Why a wrapped tool call failed.
#[derive(Debug)]
pub enum ToolFailure {
    /// Non-zero exit status from the external binary.
    Process {
        operation: &'static str,
        stderr: String,
    },
    /// Exit was clean but stdout did not decode into the expected shape.
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },
    /// The child process could not be spawned.
    Spawn {
        operation: &'static str,
        source: std::io::Error,
    },
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolFailure::Process { operation, stderr } => {
                write!(f, "{operation} failed: {}", stderr.trim())
            }
            ToolFailure::Decode { operation, source } => {
                write!(f, "{operation} produced undecodable output: {source}")
            }
            ToolFailure::Spawn { operation, source } => {
                write!(f, "{operation} could not start its tool process: {source}")
            }
        }
    }
}

impl std::error::Error for ToolFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolFailure::Process { .. } => None,
            ToolFailure::Decode { source, .. } => Some(source),
            ToolFailure::Spawn { source, .. } => Some(source),
        }
    }
}

impl ToolFailure {
    fn kind(&self) -> &'static str {
        match self {
            ToolFailure::Process { .. } => "process_failure",
            ToolFailure::Decode { .. } => "decode_failure",
            ToolFailure::Spawn { .. } => "spawn_failure",
        }
    }
}

impl From<ToolFailure> for ErrorData {
    fn from(failure: ToolFailure) -> Self {
        ErrorData::internal_error(
            failure.to_string(),
            Some(serde_json::json!({ "kind": failure.kind() })),
        )
    }
}

/// Run an invocation and surface a non-zero exit as a process failure.
async fn run_checked(
    operation: &'static str,
    invocation: &Invocation,
) -> Result<InvocationOutput, ToolFailure> {
    let output = invocation
        .run()
        .await
        .map_err(|source| ToolFailure::Spawn { operation, source })?;
    if !output.status.success() {
        return Err(ToolFailure::Process {
            operation,
            stderr: output.stderr,
        });
    }
    Ok(output)
}

/// Plain-text shape: trimmed stdout.
pub async fn run_text(
    operation: &'static str,
    invocation: &Invocation,
) -> Result<String, ToolFailure> {
    let output = run_checked(operation, invocation).await?;
    Ok(output.stdout.trim().to_string())
}

/// Raw-text shape: stdout exactly as captured (build logs etc.).
pub async fn run_raw(
    operation: &'static str,
    invocation: &Invocation,
) -> Result<String, ToolFailure> {
    let output = run_checked(operation, invocation).await?;
    Ok(output.stdout)
}

/// Line-list shape: stdout split on line boundaries.
pub async fn run_lines(
    operation: &'static str,
    invocation: &Invocation,
) -> Result<Vec<String>, ToolFailure> {
    let output = run_checked(operation, invocation).await?;
    Ok(split_lines(&output.stdout))
}

/// JSON shape: stdout parsed as a single document.
pub async fn run_json(
    operation: &'static str,
    invocation: &Invocation,
) -> Result<Value, ToolFailure> {
    let output = run_checked(operation, invocation).await?;
    decode_json(operation, &output.stdout)
}

/// Split captured stdout into its lines. Empty stdout yields an empty
/// sequence; interior empty lines are retained as empty strings; a trailing
/// newline contributes no extra element.
pub fn split_lines(stdout: &str) -> Vec<String> {
    stdout.lines().map(str::to_string).collect()
}

/// Parse stdout as JSON, mapping a parse error to a decode failure.
pub fn decode_json(operation: &'static str, stdout: &str) -> Result<Value, ToolFailure> {
    serde_json::from_str(stdout).map_err(|source| ToolFailure::Decode { operation, source })
}
