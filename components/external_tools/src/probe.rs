// components/external_tools/src/probe.rs
use crate::{ToolError, ToolRunner, ToolSet};
use std::path::Path;

/// Ask the duration probe for a file's length in whole milliseconds.
///
/// Empty output is an error: every track needs a duration downstream.
pub fn probe_duration_ms(
    runner: &dyn ToolRunner,
    tools: &ToolSet,
    file: &Path,
) -> Result<String, ToolError> {
    let output = runner.run(&tools.duration(file))?;
    let first_line = output.lines().next().unwrap_or_default().trim();
    let whole_ms = first_line.split('.').next().unwrap_or_default().trim();

    if whole_ms.is_empty() {
        return Err(ToolError::EmptyDuration {
            path: file.to_path_buf(),
        });
    }

    Ok(whole_ms.to_string())
}
