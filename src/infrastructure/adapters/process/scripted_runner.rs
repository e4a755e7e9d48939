//! Scripted Command Runner - 用于测试的命令执行器
//!
//! 不启动进程，记录调用并返回预设结果

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{CommandError, CommandOutput, CommandRunnerPort, CommandSpec};

enum Outcome {
    Output(CommandOutput),
    Missing,
}

pub struct ScriptedCommandRunner {
    outcome: Outcome,
    invocations: Mutex<Vec<CommandSpec>>,
}

impl ScriptedCommandRunner {
    /// 每次都以退出码 0 结束
    pub fn succeeding() -> Self {
        Self::with_output(CommandOutput {
            exit_code: Some(0),
            ..CommandOutput::default()
        })
    }

    pub fn with_output(output: CommandOutput) -> Self {
        Self {
            outcome: Outcome::Output(output),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// 模拟可执行文件不存在
    pub fn missing_program() -> Self {
        Self {
            outcome: Outcome::Missing,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations
            .lock()
            .map(|specs| specs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunnerPort for ScriptedCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        if let Ok(mut specs) = self.invocations.lock() {
            specs.push(spec.clone());
        }
        match &self.outcome {
            Outcome::Output(output) => Ok(output.clone()),
            Outcome::Missing => Err(CommandError::NotFound(spec.program.clone())),
        }
    }
}
