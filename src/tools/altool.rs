/*!
`altool.rs` - App Store validation and upload (`xcrun altool`).

The password never travels as a literal: the request names a keychain item
and altool receives the `@keychain:` reference, resolving it itself.
*/

use rmcp::schemars;
use serde::Deserialize;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AppStoreRequest {
    /// Path to the .ipa file
    pub app_path: String,
    /// App Store Connect username
    pub username: String,
    /// Name of the keychain item holding the password
    pub password_keychain_item: String,
}

fn keychain_ref(item: &str) -> String {
    format!("@keychain:{item}")
}

fn altool(action: &str, request: &AppStoreRequest) -> Invocation {
    Invocation::new("xcrun")
        .arg("altool")
        .arg(action)
        .arg("-f")
        .arg(&request.app_path)
        .arg("-u")
        .arg(&request.username)
        .arg("-p")
        .arg(keychain_ref(&request.password_keychain_item))
}

pub fn validate(request: &AppStoreRequest) -> Invocation {
    altool("--validate-app", request)
}

pub fn upload(request: &AppStoreRequest) -> Invocation {
    altool("--upload-app", request)
}
