/*!
`xctrace.rs` - performance tracing operations (`xctrace`).

The record variants carry the richest optional surface in the server:
an optional recording time limit, a template-options map, a launch-args
list, and an env-vars map. Absent optionals contribute no tokens; map
parameters flatten into one repeated `--flag key=value` pair per entry.

A zero time limit is passed through as `--time-limit 0`: the caller asked
for zero, which is not the same as leaving the limit unspecified.
*/

use std::collections::BTreeMap;

use rmcp::schemars;
use serde::Deserialize;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordRequest {
    /// Instruments template name (e.g. "Time Profiler")
    pub template: String,
    /// UDID of the target device
    pub device_id: String,
    /// Bundle identifier of the app to record
    pub app_bundle_id: String,
    /// Path to write the .trace file
    pub output_path: String,
    /// Recording time limit in seconds
    pub time_limit: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecordAdvancedRequest {
    /// Instruments template name (e.g. "Time Profiler")
    pub template: String,
    /// UDID of the target device
    pub device_id: String,
    /// Bundle identifier of the app to record
    pub app_bundle_id: String,
    /// Path to write the .trace file
    pub output_path: String,
    /// Recording time limit in seconds
    pub time_limit: Option<u64>,
    /// Per-template options, passed as repeated `--template-option key=value`
    pub template_options: Option<BTreeMap<String, String>>,
    /// Arguments handed to the launched app, one `--launch-arg` each
    pub launch_args: Option<Vec<String>>,
    /// Environment variables for the launched app, passed as `--env key=value`
    pub env_vars: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AttachRequest {
    /// Process id to attach the recorder to
    pub pid: u32,
    /// Instruments template name
    pub template: String,
    /// Path to write the .trace file
    pub output_path: String,
    /// Recording time limit in seconds
    pub time_limit: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportRequest {
    /// Path to the recorded .trace file
    pub trace_path: String,
    /// Path to write the exported data
    pub output_path: String,
    /// Export format (defaults to "json")
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DiagnoseRequest {
    /// Path to the diagnostic archive to inspect
    pub archive_path: String,
    /// Directory to write diagnosis output into
    pub output_dir: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SymbolicateRequest {
    /// Path to the recorded .trace file
    pub trace_path: String,
    /// Path to the matching .dSYM bundle
    pub dsym_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareRequest {
    /// Path to the trace under comparison
    pub trace_path: String,
    /// Path to the baseline trace
    pub baseline_path: String,
    /// Path to write the comparison report
    pub output_path: Option<String>,
}

pub fn list_devices() -> Invocation {
    Invocation::new("xctrace").args(["list", "devices", "--json"])
}

pub fn list_templates() -> Invocation {
    Invocation::new("xctrace").args(["list", "templates", "--json"])
}

pub fn record(request: &RecordRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("record")
        .arg("--template")
        .arg(&request.template)
        .arg("--device")
        .arg(&request.device_id)
        .arg("--target")
        .arg(&request.app_bundle_id)
        .arg("--output")
        .arg(&request.output_path)
        .opt_arg("--time-limit", request.time_limit)
}

pub fn record_advanced(request: &RecordAdvancedRequest) -> Invocation {
    let mut inv = Invocation::new("xctrace")
        .arg("record")
        .arg("--template")
        .arg(&request.template)
        .arg("--device")
        .arg(&request.device_id)
        .arg("--target")
        .arg(&request.app_bundle_id)
        .arg("--output")
        .arg(&request.output_path)
        .opt_arg("--time-limit", request.time_limit);
    if let Some(options) = &request.template_options {
        inv = inv.map_args("--template-option", options);
    }
    if let Some(args) = &request.launch_args {
        inv = inv.list_args("--launch-arg", args);
    }
    if let Some(env) = &request.env_vars {
        inv = inv.map_args("--env", env);
    }
    inv
}

pub fn attach(request: &AttachRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("record")
        .arg("--template")
        .arg(&request.template)
        .arg("--attach")
        .arg(request.pid.to_string())
        .arg("--output")
        .arg(&request.output_path)
        .opt_arg("--time-limit", request.time_limit)
}

pub fn export(request: &ExportRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("export")
        .arg("--input")
        .arg(&request.trace_path)
        .arg("--output")
        .arg(&request.output_path)
        .arg("--type")
        .arg(request.format.as_deref().unwrap_or("json"))
}

pub fn diagnose(request: &DiagnoseRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("diagnose")
        .arg("--input")
        .arg(&request.archive_path)
        .opt_arg("--output", request.output_dir.as_deref())
}

pub fn symbolicate(request: &SymbolicateRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("symbolicate")
        .arg("--input")
        .arg(&request.trace_path)
        .arg("--dsym")
        .arg(&request.dsym_path)
}

pub fn compare(request: &CompareRequest) -> Invocation {
    Invocation::new("xctrace")
        .arg("compare")
        .arg("--input")
        .arg(&request.trace_path)
        .arg("--baseline")
        .arg(&request.baseline_path)
        .opt_arg("--output", request.output_path.as_deref())
}

pub fn record_confirmation(output_path: &str) -> String {
    format!("Trace recorded to {output_path}")
}

pub fn export_confirmation(trace_path: &str, output_path: &str) -> String {
    format!("Exported {trace_path} to {output_path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> RecordRequest {
        RecordRequest {
            template: "Time Profiler".into(),
            device_id: "ABC-123".into(),
            app_bundle_id: "com.example.app".into(),
            output_path: "/tmp/out.trace".into(),
            time_limit: None,
        }
    }

    #[test]
    fn record_without_time_limit_has_no_limit_tokens() {
        let inv = record(&base_record());
        assert_eq!(
            inv.argv(),
            [
                "record",
                "--template",
                "Time Profiler",
                "--device",
                "ABC-123",
                "--target",
                "com.example.app",
                "--output",
                "/tmp/out.trace"
            ]
        );
    }

    #[test]
    fn record_with_zero_time_limit_keeps_the_flag() {
        let mut req = base_record();
        req.time_limit = Some(0);
        let inv = record(&req);
        assert!(inv.argv().ends_with(&["--time-limit".into(), "0".into()]));
    }

    #[test]
    fn record_advanced_flattens_maps_and_lists() {
        let req = RecordAdvancedRequest {
            template: "Time Profiler".into(),
            device_id: "ABC-123".into(),
            app_bundle_id: "com.example.app".into(),
            output_path: "/tmp/out.trace".into(),
            time_limit: Some(30),
            template_options: Some(
                [("rate", "100"), ("scope", "all")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            launch_args: Some(vec!["--fast".into()]),
            env_vars: Some(
                [("DEBUG", "1")]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        };
        let inv = record_advanced(&req);
        let argv = inv.argv();
        // Two template options -> exactly two repeated pairs, sorted key order.
        assert_eq!(
            argv[argv.len() - 8..],
            [
                "--template-option".to_string(),
                "rate=100".into(),
                "--template-option".into(),
                "scope=all".into(),
                "--launch-arg".into(),
                "--fast".into(),
                "--env".into(),
                "DEBUG=1".into()
            ]
        );
    }

    #[test]
    fn record_advanced_absent_optionals_add_nothing() {
        let req = RecordAdvancedRequest {
            template: "Leaks".into(),
            device_id: "ABC-123".into(),
            app_bundle_id: "com.example.app".into(),
            output_path: "/tmp/out.trace".into(),
            time_limit: None,
            template_options: None,
            launch_args: None,
            env_vars: None,
        };
        let inv = record_advanced(&req);
        assert!(!inv.argv().iter().any(|t| t.starts_with("--time-limit")
            || t.starts_with("--template-option")
            || t.starts_with("--launch-arg")
            || t.starts_with("--env")));
    }

    #[test]
    fn attach_targets_pid() {
        let inv = attach(&AttachRequest {
            pid: 4242,
            template: "Time Profiler".into(),
            output_path: "/tmp/out.trace".into(),
            time_limit: Some(10),
        });
        assert_eq!(
            inv.argv(),
            [
                "record",
                "--template",
                "Time Profiler",
                "--attach",
                "4242",
                "--output",
                "/tmp/out.trace",
                "--time-limit",
                "10"
            ]
        );
    }

    #[test]
    fn export_defaults_to_json_type() {
        let inv = export(&ExportRequest {
            trace_path: "/tmp/out.trace".into(),
            output_path: "/tmp/out.json".into(),
            format: None,
        });
        assert_eq!(
            inv.argv(),
            [
                "export",
                "--input",
                "/tmp/out.trace",
                "--output",
                "/tmp/out.json",
                "--type",
                "json"
            ]
        );
    }

    #[test]
    fn diagnose_output_dir_is_optional() {
        let inv = diagnose(&DiagnoseRequest {
            archive_path: "/tmp/archive".into(),
            output_dir: None,
        });
        assert_eq!(inv.argv(), ["diagnose", "--input", "/tmp/archive"]);
    }
}
