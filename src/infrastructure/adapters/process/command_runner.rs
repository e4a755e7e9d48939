//! Tokio Command Runner - 基于 tokio::process 的命令执行

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{CommandError, CommandOutput, CommandRunnerPort, CommandSpec};

/// 真实的子进程执行器
#[derive(Debug, Clone, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunnerPort for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        tracing::debug!(command = %spec.display(), "Running command");

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::NotFound(spec.program.clone())
                } else {
                    CommandError::SpawnFailed {
                        program: spec.program.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
