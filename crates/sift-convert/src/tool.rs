//! External tool invocation helpers.

use crate::error::{ConvertError, ConvertResult};
use std::path::PathBuf;
use std::process::Command;

/// Resolve a tool on PATH or fail with a typed error.
pub fn require_tool(name: &str) -> ConvertResult<PathBuf> {
    which::which(name).map_err(|_| ConvertError::ToolNotFound {
        tool: name.to_string(),
    })
}

/// Run a prepared command, surfacing stderr on failure.
pub fn run_tool(command: &mut Command, tool: &str) -> ConvertResult<()> {
    let output = command.output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ConvertError::ToolFailed {
            tool: tool.to_string(),
            message: if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            },
        });
    }
    Ok(())
}
