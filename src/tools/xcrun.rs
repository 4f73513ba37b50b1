/*!
`xcrun.rs` - SDK queries, tool lookup, and arbitrary tool runs via `xcrun`.

`run_tool` accepts its extra arguments as one free-form string and splits
it with shell-style rules (quoting respected), the same way target command
lines are split elsewhere in this codebase.
*/

use anyhow::{Context, Result};
use rmcp::schemars;
use serde::Deserialize;
use shell_words::split as shell_split;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindToolRequest {
    /// Name of the developer tool to locate (e.g. "swiftc")
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RunToolRequest {
    /// Name of the developer tool to run
    pub name: String,
    /// SDK to run the tool under (e.g. "iphonesimulator")
    pub sdk: String,
    /// Extra arguments as one shell-style string (quoting respected)
    pub args: Option<String>,
}

pub fn sdk_path() -> Invocation {
    Invocation::new("xcrun").arg("--show-sdk-path")
}

pub fn sdk_version() -> Invocation {
    Invocation::new("xcrun").arg("--show-sdk-version")
}

pub fn sdk_platform_path() -> Invocation {
    Invocation::new("xcrun").arg("--show-sdk-platform-path")
}

pub fn find_tool(name: &str) -> Invocation {
    Invocation::new("xcrun").arg("--find").arg(name)
}

pub fn run_tool(request: &RunToolRequest) -> Result<Invocation> {
    let extra = match &request.args {
        Some(raw) => shell_split(raw)
            .with_context(|| format!("Failed to parse extra arguments: '{raw}'"))?,
        None => Vec::new(),
    };
    Ok(Invocation::new("xcrun")
        .arg("--sdk")
        .arg(&request.sdk)
        .arg(&request.name)
        .args(extra))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_queries_take_no_parameters() {
        assert_eq!(sdk_path().argv(), ["--show-sdk-path"]);
        assert_eq!(sdk_version().argv(), ["--show-sdk-version"]);
        assert_eq!(sdk_platform_path().argv(), ["--show-sdk-platform-path"]);
    }

    #[test]
    fn find_tool_argv() {
        assert_eq!(find_tool("swiftc").argv(), ["--find", "swiftc"]);
    }

    #[test]
    fn run_tool_without_extra_args() {
        let req = RunToolRequest {
            name: "metal".into(),
            sdk: "macosx".into(),
            args: None,
        };
        let inv = run_tool(&req).unwrap();
        assert_eq!(inv.argv(), ["--sdk", "macosx", "metal"]);
    }

    #[test]
    fn run_tool_splits_quoted_extra_args() {
        let req = RunToolRequest {
            name: "metal".into(),
            sdk: "macosx".into(),
            args: Some(r#"-o "/tmp/out dir/a.air" -c shader.metal"#.into()),
        };
        let inv = run_tool(&req).unwrap();
        assert_eq!(
            inv.argv(),
            [
                "--sdk",
                "macosx",
                "metal",
                "-o",
                "/tmp/out dir/a.air",
                "-c",
                "shader.metal"
            ]
        );
    }

    #[test]
    fn run_tool_rejects_unbalanced_quotes() {
        let req = RunToolRequest {
            name: "metal".into(),
            sdk: "macosx".into(),
            args: Some(r#"-o "unterminated"#.into()),
        };
        assert!(run_tool(&req).is_err());
    }
}
