//! Command Runner Port - 外部命令执行抽象
//!
//! 合并工具、命令行 TTS 都通过此端口调用，测试时可替换为假实现

use async_trait::async_trait;
use thiserror::Error;

/// 命令执行错误（进程没能跑起来）
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Program not found: {0}")]
    NotFound(String),

    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },
}

/// 要执行的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 用于日志
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// 命令执行结果（进程已退出）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// 退出码，被信号终止时为 None
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Command Runner Port
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// 执行命令并等待退出，捕获 stdout/stderr
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;
}
