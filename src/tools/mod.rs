/*!
Tool registration for the MCP server.

One module per wrapped binary family:
  simctl.rs     - simulator control
  xcrun.rs      - SDK queries / tool lookup / arbitrary tool runs
  xctrace.rs    - performance tracing
  xcodebuild.rs - SDK/scheme listing and builds
  altool.rs     - App Store validate/upload
  inspect.rs    - binary inspection (otool / nm / swift-demangle)

Every handler is the same four steps: compose an `Invocation` from the
typed request, run it, translate the captured output into the expected
shape, wrap it for the protocol. The shape-specific runners in
`invoke::translate` carry all of the shared logic, so each `#[tool]`
method stays a couple of lines.
*/

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData, Implementation, ProtocolVersion, ServerCapabilities,
    ServerInfo,
};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use serde_json::Value;

use crate::invoke::translate::{run_json, run_lines, run_raw, run_text};

pub mod altool;
pub mod inspect;
pub mod simctl;
pub mod xcodebuild;
pub mod xcrun;
pub mod xctrace;

/// MCP server exposing Xcode developer tooling as remote-callable tools.
#[derive(Clone)]
pub struct XcodeServer {
    tool_router: ToolRouter<Self>,
}

impl Default for XcodeServer {
    fn default() -> Self {
        Self::new()
    }
}

fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

fn structured(value: Value) -> CallToolResult {
    CallToolResult::structured(value)
}

#[tool_router]
impl XcodeServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Registered tool names, in registration order. Used by the CLI
    /// `tools` subcommand.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    #[tool(description = "Summary of this server and the tooling it wraps")]
    async fn about(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text(format!(
            "mcp-xcode {}: MCP server wrapping Xcode developer tooling \
             (simctl, xctrace, xcodebuild, altool, otool/nm/swift-demangle).",
            env!("CARGO_PKG_VERSION")
        )))
    }

    /* ---- Simulator control (simctl) ---- */

    #[tool(description = "List simulator devices as a JSON document")]
    async fn list_devices(&self) -> Result<CallToolResult, ErrorData> {
        let doc = run_json("list_devices", &simctl::list_devices()).await?;
        Ok(structured(doc))
    }

    #[tool(description = "Boot a simulator device by UDID")]
    async fn boot_device(
        &self,
        Parameters(req): Parameters<simctl::DeviceRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("boot_device", &simctl::boot(&req.device_id)).await?;
        Ok(text(simctl::boot_confirmation(&req.device_id)))
    }

    #[tool(description = "Shut down a simulator device by UDID")]
    async fn shutdown_device(
        &self,
        Parameters(req): Parameters<simctl::DeviceRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("shutdown_device", &simctl::shutdown(&req.device_id)).await?;
        Ok(text(simctl::shutdown_confirmation(&req.device_id)))
    }

    #[tool(description = "Install an .app bundle on a simulator device")]
    async fn install_app(
        &self,
        Parameters(req): Parameters<simctl::InstallAppRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("install_app", &simctl::install(&req.device_id, &req.app_path)).await?;
        Ok(text(simctl::install_confirmation(
            &req.app_path,
            &req.device_id,
        )))
    }

    #[tool(description = "Launch an installed app on a simulator device")]
    async fn launch_app(
        &self,
        Parameters(req): Parameters<simctl::LaunchAppRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("launch_app", &simctl::launch(&req.device_id, &req.bundle_id)).await?;
        Ok(text(simctl::launch_confirmation(
            &req.bundle_id,
            &req.device_id,
        )))
    }

    /* ---- SDK queries / tool lookup (xcrun) ---- */

    #[tool(description = "Path of the active SDK")]
    async fn sdk_path(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text(run_text("sdk_path", &xcrun::sdk_path()).await?))
    }

    #[tool(description = "Version of the active SDK")]
    async fn sdk_version(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text(run_text("sdk_version", &xcrun::sdk_version()).await?))
    }

    #[tool(description = "Platform path of the active SDK")]
    async fn sdk_platform_path(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_text("sdk_platform_path", &xcrun::sdk_platform_path()).await?,
        ))
    }

    #[tool(description = "Locate a developer tool by name")]
    async fn find_tool(
        &self,
        Parameters(req): Parameters<xcrun::FindToolRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(run_text("find_tool", &xcrun::find_tool(&req.name)).await?))
    }

    #[tool(description = "Run an arbitrary developer tool under an SDK; returns raw stdout")]
    async fn run_tool(
        &self,
        Parameters(req): Parameters<xcrun::RunToolRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let inv = xcrun::run_tool(&req)
            .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;
        Ok(text(run_raw("run_tool", &inv).await?))
    }

    /* ---- Performance tracing (xctrace) ---- */

    #[tool(description = "List devices available for tracing as a JSON document")]
    async fn trace_list_devices(&self) -> Result<CallToolResult, ErrorData> {
        let doc = run_json("trace_list_devices", &xctrace::list_devices()).await?;
        Ok(structured(doc))
    }

    #[tool(description = "List tracing templates as a JSON document")]
    async fn trace_list_templates(&self) -> Result<CallToolResult, ErrorData> {
        let doc = run_json("trace_list_templates", &xctrace::list_templates()).await?;
        Ok(structured(doc))
    }

    #[tool(description = "Record app performance with a template; optional time limit in seconds")]
    async fn trace_record(
        &self,
        Parameters(req): Parameters<xctrace::RecordRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("trace_record", &xctrace::record(&req)).await?;
        Ok(text(xctrace::record_confirmation(&req.output_path)))
    }

    #[tool(
        description = "Record app performance with template options, launch args, and env vars"
    )]
    async fn trace_record_advanced(
        &self,
        Parameters(req): Parameters<xctrace::RecordAdvancedRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("trace_record_advanced", &xctrace::record_advanced(&req)).await?;
        Ok(text(xctrace::record_confirmation(&req.output_path)))
    }

    #[tool(description = "Attach the recorder to a running process by pid")]
    async fn trace_attach(
        &self,
        Parameters(req): Parameters<xctrace::AttachRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("trace_attach", &xctrace::attach(&req)).await?;
        Ok(text(xctrace::record_confirmation(&req.output_path)))
    }

    #[tool(description = "Export recorded trace data to another format (default json)")]
    async fn trace_export(
        &self,
        Parameters(req): Parameters<xctrace::ExportRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        run_text("trace_export", &xctrace::export(&req)).await?;
        Ok(text(xctrace::export_confirmation(
            &req.trace_path,
            &req.output_path,
        )))
    }

    #[tool(description = "Diagnose a tracing archive")]
    async fn trace_diagnose(
        &self,
        Parameters(req): Parameters<xctrace::DiagnoseRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_text("trace_diagnose", &xctrace::diagnose(&req)).await?,
        ))
    }

    #[tool(description = "Symbolicate a recorded trace with a dSYM bundle")]
    async fn trace_symbolicate(
        &self,
        Parameters(req): Parameters<xctrace::SymbolicateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_text("trace_symbolicate", &xctrace::symbolicate(&req)).await?,
        ))
    }

    #[tool(description = "Compare a recorded trace against a baseline trace")]
    async fn trace_compare(
        &self,
        Parameters(req): Parameters<xctrace::CompareRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_text("trace_compare", &xctrace::compare(&req)).await?,
        ))
    }

    /* ---- Builds (xcodebuild) ---- */

    #[tool(description = "List available SDKs as a JSON document")]
    async fn list_sdks(&self) -> Result<CallToolResult, ErrorData> {
        let doc = run_json("list_sdks", &xcodebuild::list_sdks()).await?;
        Ok(structured(doc))
    }

    #[tool(description = "List the schemes of an Xcode project")]
    async fn list_schemes(
        &self,
        Parameters(req): Parameters<xcodebuild::ListSchemesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let doc = run_json("list_schemes", &xcodebuild::list_schemes(&req.project_path)).await?;
        Ok(structured(serde_json::json!(xcodebuild::extract_schemes(
            &doc
        ))))
    }

    #[tool(description = "Build an Xcode project; returns the raw build log")]
    async fn build_project(
        &self,
        Parameters(req): Parameters<xcodebuild::BuildRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_raw("build_project", &xcodebuild::build(&req)).await?,
        ))
    }

    /* ---- App Store distribution (altool) ---- */

    #[tool(description = "Validate an app before App Store submission")]
    async fn validate_app(
        &self,
        Parameters(req): Parameters<altool::AppStoreRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(
            run_text("validate_app", &altool::validate(&req)).await?,
        ))
    }

    #[tool(description = "Upload an app to App Store Connect")]
    async fn upload_app(
        &self,
        Parameters(req): Parameters<altool::AppStoreRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(text(run_text("upload_app", &altool::upload(&req)).await?))
    }

    /* ---- Binary inspection ---- */

    #[tool(description = "Demangled Swift symbols of a binary, one per line")]
    async fn swift_symbols(
        &self,
        Parameters(req): Parameters<inspect::BinaryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let lines = run_lines("swift_symbols", &inspect::swift_symbols(&req.binary_path)).await?;
        Ok(structured(serde_json::json!(lines)))
    }

    #[tool(description = "Mach-O headers of a binary, one line per row")]
    async fn otool_headers(
        &self,
        Parameters(req): Parameters<inspect::BinaryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let lines = run_lines("otool_headers", &inspect::otool_headers(&req.binary_path)).await?;
        Ok(structured(serde_json::json!(lines)))
    }

    #[tool(description = "Linked libraries of a binary, one per line")]
    async fn otool_libraries(
        &self,
        Parameters(req): Parameters<inspect::BinaryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let lines =
            run_lines("otool_libraries", &inspect::otool_libraries(&req.binary_path)).await?;
        Ok(structured(serde_json::json!(lines)))
    }

    #[tool(description = "Symbol table of a binary, one entry per line")]
    async fn nm_symbols(
        &self,
        Parameters(req): Parameters<inspect::BinaryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let lines = run_lines("nm_symbols", &inspect::nm_symbols(&req.binary_path)).await?;
        Ok(structured(serde_json::json!(lines)))
    }
}

#[tool_handler]
impl ServerHandler for XcodeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "mcp-xcode".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Tools wrapping Xcode developer binaries. Simulator control: \
                 list_devices / boot_device / shutdown_device / install_app / launch_app. \
                 SDK queries: sdk_path / sdk_version / sdk_platform_path / find_tool / run_tool. \
                 Tracing: trace_list_* / trace_record(_advanced) / trace_attach / trace_export / \
                 trace_diagnose / trace_symbolicate / trace_compare. Builds: list_sdks / \
                 list_schemes / build_project. Distribution: validate_app / upload_app. \
                 Binary inspection: swift_symbols / otool_headers / otool_libraries / nm_symbols. \
                 Each call runs exactly one external process and returns its translated output."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_is_registered() {
        let names = XcodeServer::new().tool_names();
        for expected in [
            "about",
            "list_devices",
            "boot_device",
            "shutdown_device",
            "install_app",
            "launch_app",
            "sdk_path",
            "sdk_version",
            "sdk_platform_path",
            "find_tool",
            "run_tool",
            "trace_list_devices",
            "trace_list_templates",
            "trace_record",
            "trace_record_advanced",
            "trace_attach",
            "trace_export",
            "trace_diagnose",
            "trace_symbolicate",
            "trace_compare",
            "list_sdks",
            "list_schemes",
            "build_project",
            "validate_app",
            "upload_app",
            "swift_symbols",
            "otool_headers",
            "otool_libraries",
            "nm_symbols",
        ] {
            assert!(
                names.iter().any(|n| n == expected),
                "tool '{expected}' not registered"
            );
        }
    }

    #[test]
    fn server_advertises_tools_capability() {
        let info = XcodeServer::new().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
