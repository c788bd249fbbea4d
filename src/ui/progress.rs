use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// 배치 인코딩용 프로그레스 디스플레이
///
/// 전체 진행 막대 하나와 현재 실행 중인 인코딩의 스피너 하나.
pub struct BatchProgressDisplay {
    multi: MultiProgress,
    main_bar: ProgressBar,
}

impl BatchProgressDisplay {
    /// 새 배치 프로그레스 생성
    pub fn new(total: usize, title: &str) -> Self {
        Self::with_target(total, title, ProgressDrawTarget::stderr())
    }

    /// 아무것도 그리지 않는 디스플레이 (dry-run, 테스트)
    pub fn hidden(total: usize) -> Self {
        Self::with_target(total, "", ProgressDrawTarget::hidden())
    }

    fn with_target(total: usize, title: &str, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let main_bar = ProgressBar::new(total as u64);

        main_bar.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{percent}}%) {{msg}}",
                    title
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );

        let main_bar = multi.add(main_bar);

        Self { multi, main_bar }
    }

    /// 막대 위에 한 줄 출력
    ///
    /// 숨겨진 디스플레이는 `MultiProgress::println`을 무시하므로 stderr에 직접 씀.
    pub fn println(&self, line: &str) {
        if self.multi.is_hidden() || self.multi.println(line).is_err() {
            eprintln!("{}", line);
        }
    }

    /// 개별 작업 스피너 추가
    pub fn add_task(&self, name: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(TICKS)
                .template(&format!("  {{spinner:.cyan}} {}: {{elapsed}} {{msg}}", name))
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.multi.add(spinner)
    }

    /// 작업 성공 완료
    pub fn finish_task(&self, spinner: &ProgressBar, duration_ms: u128) {
        spinner.finish_and_clear();
        self.main_bar.set_message(format!("{} ({}ms)", "last ok".green(), duration_ms));
        self.main_bar.inc(1);
    }

    /// 작업 실패
    pub fn fail_task(&self, spinner: &ProgressBar, error: &str) {
        spinner.finish_and_clear();
        self.main_bar.set_message(format!("{} {}", "last failed".red(), error.dimmed()));
        self.main_bar.inc(1);
    }

    /// 전체 완료
    pub fn finish(&self, success: usize, total: usize) {
        self.main_bar.finish_with_message(format!(
            "{} done (ok: {}, failed: {})",
            "✓".green().bold(),
            success.to_string().green(),
            (total - success).to_string().red()
        ));
    }

    pub fn position(&self) -> u64 {
        self.main_bar.position()
    }
}
