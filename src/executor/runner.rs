use crate::error::{Result, SweepError};
use tokio::process::Command;
use tracing::debug;

/// 셸 명령어 하나를 실행하고 종료 코드를 돌려줌
pub struct CommandRunner {
    shell: String,
}

impl CommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// 명령어 실행
    ///
    /// 출력은 명령어 안의 리다이렉션이 처리합니다. 프로세스를 띄우지 못한 경우만
    /// 에러이고, 0이 아닌 종료 코드는 그대로 반환합니다. 시그널로 종료되면 -1.
    pub async fn execute(&self, command: &str) -> Result<i32> {
        debug!(shell = %self.shell, command, "spawning");

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .status()
            .await
            .map_err(|e| SweepError::ExecutionError(format!("{}: {}", self.shell, e)))?;

        Ok(status.code().unwrap_or(-1))
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}
