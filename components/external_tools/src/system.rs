// components/external_tools/src/system.rs
use crate::{ToolCommand, ToolError, ToolRunner};
use std::process::Command;

/// Runs tools found on `PATH`, blocking until each exits
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn check_available(&self, program: &str) -> Result<(), ToolError> {
        which::which(program)
            .map(|_| ())
            .map_err(|_| ToolError::NotFound {
                tool: program.to_string(),
            })
    }

    fn run(&self, command: &ToolCommand) -> Result<String, ToolError> {
        let program = which::which(command.program()).map_err(|_| ToolError::NotFound {
            tool: command.program().to_string(),
        })?;

        tracing::debug!("Running {}", command);

        let output = Command::new(&program)
            .args(command.arguments())
            .output()
            .map_err(|source| ToolError::Spawn {
                tool: command.program().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn missing_tool_is_reported() {
        let result = SystemRunner.check_available("definitely-not-a-real-tool-4711");
        assert_matches!(result, Err(ToolError::NotFound { tool }) if tool == "definitely-not-a-real-tool-4711");
    }

    #[test]
    fn captures_stdout() {
        let out = SystemRunner
            .run(&ToolCommand::new("echo").arg("hello"))
            .unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn non_zero_exit_is_fatal() {
        let result = SystemRunner.run(&ToolCommand::new("false"));
        assert_matches!(result, Err(ToolError::Failed { .. }));
    }
}
