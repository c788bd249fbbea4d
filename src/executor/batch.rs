use crate::error::{Result, SweepError};
use crate::executor::planner::{EncodePlan, EncodeTask};
use crate::executor::runner::CommandRunner;
use crate::ui::BatchProgressDisplay;
use chrono::{DateTime, Utc};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// 인코딩 하나의 실행 결과
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// 작업 ID
    pub task_id: usize,
    /// 출력 이름
    pub name: String,
    /// 성공 여부
    pub success: bool,
    /// 종료 코드 (프로세스를 띄우지 못했으면 None)
    pub exit_code: Option<i32>,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 인코더 출력 로그
    pub log_path: PathBuf,
    /// 시작 시각
    pub started_at: DateTime<Utc>,
    /// 실행 시간 (밀리초)
    pub duration_ms: u128,
}

impl TaskResult {
    pub fn success(task: &EncodeTask, started_at: DateTime<Utc>, duration_ms: u128) -> Self {
        Self {
            task_id: task.id,
            name: task.name.clone(),
            success: true,
            exit_code: Some(0),
            error: None,
            log_path: task.log_path.clone(),
            started_at,
            duration_ms,
        }
    }

    pub fn failure(
        task: &EncodeTask,
        exit_code: Option<i32>,
        error: String,
        started_at: DateTime<Utc>,
        duration_ms: u128,
    ) -> Self {
        Self {
            task_id: task.id,
            name: task.name.clone(),
            success: false,
            exit_code,
            error: Some(error),
            log_path: task.log_path.clone(),
            started_at,
            duration_ms,
        }
    }
}

/// 배치 실행 결과
#[derive(Debug)]
pub struct BatchResult {
    /// 총 작업 수
    pub total: usize,
    /// 성공한 작업 수
    pub success_count: usize,
    /// 실패한 작업 수
    pub failure_count: usize,
    /// 개별 작업 결과
    pub task_results: Vec<TaskResult>,
    /// 전체 실행 시간 (밀리초)
    pub total_duration_ms: u128,
}

impl BatchResult {
    fn from_results(task_results: Vec<TaskResult>, total_duration_ms: u128) -> Self {
        let success_count = task_results.iter().filter(|r| r.success).count();
        Self {
            total: task_results.len(),
            success_count,
            failure_count: task_results.len() - success_count,
            task_results,
            total_duration_ms,
        }
    }

    /// 모든 작업이 성공했는지 확인
    pub fn all_succeeded(&self) -> bool {
        self.failure_count == 0
    }

    /// 실패한 작업들 반환
    pub fn failed_tasks(&self) -> Vec<&TaskResult> {
        self.task_results.iter().filter(|r| !r.success).collect()
    }

    /// 성공률 계산
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.success_count as f64 / self.total as f64) * 100.0
    }

    /// 하나라도 실패했으면 `BatchPartialFailure`
    pub fn into_result(self) -> Result<()> {
        if self.all_succeeded() {
            Ok(())
        } else {
            Err(SweepError::BatchPartialFailure {
                success: self.success_count,
                total: self.total,
            })
        }
    }
}

/// 순차 배치 실행기
///
/// 한 번에 하나의 인코더 프로세스만 실행하고, 끝날 때까지 기다린 뒤 다음으로 넘어갑니다.
/// 실패한 인코딩은 재시도하지 않고 기록만 한 뒤 계속 진행합니다.
pub struct BatchExecutor {
    runner: CommandRunner,
    dry_run: bool,
    show_progress: bool,
}

impl BatchExecutor {
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            dry_run: false,
            show_progress: true,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// 실행 계획에 따라 배치 실행
    pub async fn execute(&self, plan: &EncodePlan) -> Result<BatchResult> {
        if self.dry_run {
            for task in &plan.tasks {
                println!("{}", task.shell_line());
            }
            return Ok(BatchResult::from_results(Vec::new(), 0));
        }

        if !plan.output_dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&plan.output_dir).await?;
        }

        let start_time = Instant::now();
        let total = plan.task_count();
        let display = if self.show_progress {
            BatchProgressDisplay::new(total, "encoding")
        } else {
            BatchProgressDisplay::hidden(total)
        };

        info!(total, shell = self.runner.shell(), "starting sweep");

        let mut results = Vec::with_capacity(total);
        for task in &plan.tasks {
            let result = self.execute_task(task, &display).await;
            results.push(result);
        }

        let batch = BatchResult::from_results(results, start_time.elapsed().as_millis());
        display.finish(batch.success_count, batch.total);

        Ok(batch)
    }

    /// 단일 인코딩 실행
    async fn execute_task(&self, task: &EncodeTask, display: &BatchProgressDisplay) -> TaskResult {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let line = task.shell_line();

        display.println(&format!("{} {}", "▶".cyan(), line));
        let spinner = display.add_task(&task.name);

        match self.runner.execute(&line).await {
            Ok(0) => {
                let duration = start_time.elapsed().as_millis();
                display.finish_task(&spinner, duration);
                TaskResult::success(task, started_at, duration)
            }
            Ok(code) => {
                let duration = start_time.elapsed().as_millis();
                let error = format!("exited with status {}, see {}", code, task.log_path.display());
                warn!(name = %task.name, code, "encode failed");
                display.fail_task(&spinner, &error);
                TaskResult::failure(task, Some(code), error, started_at, duration)
            }
            Err(e) => {
                let duration = start_time.elapsed().as_millis();
                warn!(name = %task.name, error = %e, "encode could not start");
                display.fail_task(&spinner, &e.to_string());
                TaskResult::failure(task, None, e.to_string(), started_at, duration)
            }
        }
    }
}
