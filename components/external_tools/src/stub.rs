// components/external_tools/src/stub.rs
//! A `ToolRunner` that never starts a process.

use crate::{ToolCommand, ToolError, ToolRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Where a program writes its output file
#[derive(Debug, Clone)]
pub enum OutputArg {
    /// The argument following this flag
    After(String),
    /// The final argument
    Last,
    /// The argument at this zero-based position
    Position(usize),
}

/// Records every command and answers from canned stdout keyed by program.
///
/// Programs without a canned answer succeed with empty output; programs
/// marked failing return `ToolError::Failed`. Programs registered with
/// [`StubRunner::creates_output`] leave a small file where the real tool
/// would have written one.
#[derive(Debug, Default)]
pub struct StubRunner {
    responses: HashMap<String, String>,
    outputs: HashMap<String, OutputArg>,
    failing: Vec<String>,
    log: RefCell<Vec<String>>,
}

impl StubRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, program: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.responses.insert(program.into(), stdout.into());
        self
    }

    pub fn fail(mut self, program: impl Into<String>) -> Self {
        self.failing.push(program.into());
        self
    }

    pub fn creates_output(mut self, program: impl Into<String>, output: OutputArg) -> Self {
        self.outputs.insert(program.into(), output);
        self
    }

    /// Rendered command lines, in call order
    pub fn invocations(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Invocations of one program
    pub fn calls_to(&self, program: &str) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|line| line.split(' ').next() == Some(program))
            .cloned()
            .collect()
    }

    fn write_output(&self, command: &ToolCommand) -> Result<(), ToolError> {
        let Some(output) = self.outputs.get(command.program()) else {
            return Ok(());
        };

        let args = command.arguments();
        let target = match output {
            OutputArg::Last => args.last(),
            OutputArg::Position(i) => args.get(*i),
            OutputArg::After(flag) => args
                .iter()
                .position(|a| a.to_str() == Some(flag.as_str()))
                .and_then(|i| args.get(i + 1)),
        };

        match target {
            Some(path) => std::fs::write(Path::new(path), command.to_string()).map_err(|source| {
                ToolError::Spawn {
                    tool: command.program().to_string(),
                    source,
                }
            }),
            None => Ok(()),
        }
    }
}

impl ToolRunner for StubRunner {
    fn check_available(&self, program: &str) -> Result<(), ToolError> {
        if self.failing.iter().any(|p| p == program) {
            return Err(ToolError::NotFound {
                tool: program.to_string(),
            });
        }
        Ok(())
    }

    fn run(&self, command: &ToolCommand) -> Result<String, ToolError> {
        self.log.borrow_mut().push(command.to_string());

        if self.failing.iter().any(|p| p == command.program()) {
            return Err(ToolError::Failed {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            });
        }

        self.write_output(command)?;

        Ok(self
            .responses
            .get(command.program())
            .cloned()
            .unwrap_or_default())
    }
}
