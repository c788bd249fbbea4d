use crate::error::{Result, SweepError};
use colored::*;
use dialoguer::Confirm;

pub struct ConfirmPrompt;

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self
    }

    /// 큰 스윕을 실행하기 전에 확인
    ///
    /// 터미널이 없으면 물어볼 수 없으므로 `ConfirmationRequired`.
    pub fn confirm_sweep(&self, count: usize, source: &str) -> Result<bool> {
        // stdout은 명령어 출력용이므로 stderr 사용
        eprintln!(
            "\n{} {} encodes will run sequentially.",
            "[!]".yellow().bold(),
            count.to_string().bold()
        );
        eprintln!("  source: {}", source.dimmed());

        Confirm::new()
            .with_prompt("Start the sweep?")
            .default(false)
            .interact()
            .map_err(|_| SweepError::ConfirmationRequired(count))
    }
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}
