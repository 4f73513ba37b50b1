/*!
`xcodebuild.rs` - SDK/scheme listing and project builds (`xcrun xcodebuild`).

`list_schemes` post-processes the JSON document `xcodebuild -list -json`
prints: the caller gets the `project.schemes` array rather than the whole
document. A missing or malformed `schemes` entry yields an empty list.
*/

use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSchemesRequest {
    /// Path to the .xcodeproj or .xcworkspace
    pub project_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BuildRequest {
    /// Path to the .xcodeproj or .xcworkspace
    pub project_path: String,
    /// Scheme to build
    pub scheme: String,
    /// Build configuration (defaults to "Debug")
    pub configuration: Option<String>,
    /// SDK to build for (defaults to "iphonesimulator")
    pub sdk: Option<String>,
    /// Destination specifier (e.g. "platform=iOS Simulator,name=iPhone 14")
    pub destination: Option<String>,
}

pub fn list_sdks() -> Invocation {
    Invocation::new("xcrun").args(["xcodebuild", "-showsdks", "-json"])
}

pub fn list_schemes(project_path: &str) -> Invocation {
    Invocation::new("xcrun")
        .args(["xcodebuild", "-list", "-project"])
        .arg(project_path)
        .arg("-json")
}

pub fn build(request: &BuildRequest) -> Invocation {
    Invocation::new("xcrun")
        .arg("xcodebuild")
        .arg("-project")
        .arg(&request.project_path)
        .arg("-scheme")
        .arg(&request.scheme)
        .arg("-configuration")
        .arg(request.configuration.as_deref().unwrap_or("Debug"))
        .arg("-sdk")
        .arg(request.sdk.as_deref().unwrap_or("iphonesimulator"))
        .opt_arg("-destination", request.destination.as_deref())
}

/// Pull the scheme names out of an `xcodebuild -list -json` document.
pub fn extract_schemes(document: &Value) -> Vec<String> {
    document
        .get("project")
        .and_then(|p| p.get("schemes"))
        .and_then(|s| s.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_sdks_argv() {
        assert_eq!(list_sdks().argv(), ["xcodebuild", "-showsdks", "-json"]);
    }

    #[test]
    fn list_schemes_argv() {
        assert_eq!(
            list_schemes("/tmp/App.xcodeproj").argv(),
            ["xcodebuild", "-list", "-project", "/tmp/App.xcodeproj", "-json"]
        );
    }

    #[test]
    fn build_applies_defaults() {
        let inv = build(&BuildRequest {
            project_path: "/tmp/App.xcodeproj".into(),
            scheme: "App".into(),
            configuration: None,
            sdk: None,
            destination: None,
        });
        assert_eq!(
            inv.argv(),
            [
                "xcodebuild",
                "-project",
                "/tmp/App.xcodeproj",
                "-scheme",
                "App",
                "-configuration",
                "Debug",
                "-sdk",
                "iphonesimulator"
            ]
        );
    }

    #[test]
    fn build_appends_destination_when_present() {
        let inv = build(&BuildRequest {
            project_path: "/tmp/App.xcodeproj".into(),
            scheme: "App".into(),
            configuration: Some("Release".into()),
            sdk: Some("iphoneos".into()),
            destination: Some("platform=iOS Simulator,name=iPhone 14".into()),
        });
        assert!(inv.argv().ends_with(&[
            "-destination".into(),
            "platform=iOS Simulator,name=iPhone 14".into()
        ]));
    }

    #[test]
    fn extract_schemes_reads_project_schemes() {
        let doc = json!({ "project": { "schemes": ["App", "AppTests"] } });
        assert_eq!(extract_schemes(&doc), vec!["App", "AppTests"]);
    }

    #[test]
    fn extract_schemes_missing_key_yields_empty() {
        assert!(extract_schemes(&json!({})).is_empty());
        assert!(extract_schemes(&json!({ "project": {} })).is_empty());
    }
}
