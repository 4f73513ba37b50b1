/*!
`simctl.rs` - simulator control operations (`xcrun simctl`).

Request structs + invocation builders + confirmation strings. The server
module wires these into MCP tools; everything here is pure argument
composition, so tests assert on exact argument vectors.
*/

use rmcp::schemars;
use serde::Deserialize;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeviceRequest {
    /// Simulator device UDID (or device name accepted by simctl)
    pub device_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InstallAppRequest {
    /// Simulator device UDID
    pub device_id: String,
    /// Path to the .app bundle to install
    pub app_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LaunchAppRequest {
    /// Simulator device UDID
    pub device_id: String,
    /// Bundle identifier of the installed app
    pub bundle_id: String,
}

pub fn list_devices() -> Invocation {
    Invocation::new("xcrun").args(["simctl", "list", "devices", "--json"])
}

pub fn boot(device_id: &str) -> Invocation {
    Invocation::new("xcrun").args(["simctl", "boot"]).arg(device_id)
}

pub fn shutdown(device_id: &str) -> Invocation {
    Invocation::new("xcrun")
        .args(["simctl", "shutdown"])
        .arg(device_id)
}

pub fn install(device_id: &str, app_path: &str) -> Invocation {
    Invocation::new("xcrun")
        .args(["simctl", "install"])
        .arg(device_id)
        .arg(app_path)
}

pub fn launch(device_id: &str, bundle_id: &str) -> Invocation {
    Invocation::new("xcrun")
        .args(["simctl", "launch"])
        .arg(device_id)
        .arg(bundle_id)
}

pub fn boot_confirmation(device_id: &str) -> String {
    format!("Successfully booted device {device_id}")
}

pub fn shutdown_confirmation(device_id: &str) -> String {
    format!("Successfully shut down device {device_id}")
}

pub fn install_confirmation(app_path: &str, device_id: &str) -> String {
    format!("Successfully installed {app_path} on device {device_id}")
}

pub fn launch_confirmation(bundle_id: &str, device_id: &str) -> String {
    format!("Successfully launched {bundle_id} on device {device_id}")
}
