//! Process Adapter - 外部命令执行

mod command_runner;
mod scripted_runner;

pub use command_runner::TokioCommandRunner;
pub use scripted_runner::ScriptedCommandRunner;
