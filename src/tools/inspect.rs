/*!
`inspect.rs` - binary inspection (`swift-demangle`, `otool`, `nm`).

All four operations share one request shape (a binary path) and the
line-list result shape.
*/

use rmcp::schemars;
use serde::Deserialize;

use crate::invoke::Invocation;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BinaryRequest {
    /// Path to the binary to inspect
    pub binary_path: String,
}

pub fn swift_symbols(binary_path: &str) -> Invocation {
    Invocation::new("xcrun").arg("swift-demangle").arg(binary_path)
}

pub fn otool_headers(binary_path: &str) -> Invocation {
    Invocation::new("xcrun").args(["otool", "-h"]).arg(binary_path)
}

pub fn otool_libraries(binary_path: &str) -> Invocation {
    Invocation::new("xcrun").args(["otool", "-L"]).arg(binary_path)
}

pub fn nm_symbols(binary_path: &str) -> Invocation {
    Invocation::new("xcrun").arg("nm").arg(binary_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_argvs() {
        assert_eq!(
            swift_symbols("/bin/a").argv(),
            ["swift-demangle", "/bin/a"]
        );
        assert_eq!(otool_headers("/bin/a").argv(), ["otool", "-h", "/bin/a"]);
        assert_eq!(otool_libraries("/bin/a").argv(), ["otool", "-L", "/bin/a"]);
        assert_eq!(nm_symbols("/bin/a").argv(), ["nm", "/bin/a"]);
    }
}
