use crate::cli::Cli;
use crate::commands::plan::{print_json, print_list};
use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::executor::{BatchExecutor, BatchResult, CommandRunner, EncodePlan, EncodePlanner};
use crate::expander::expand;
use crate::spec::Specification;
use crate::ui::ConfirmPrompt;
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// 명세 로드 -> (확인) -> 확장 -> 계획 -> 순차 실행 -> 요약
pub async fn execute_sweep(cli: &Cli, config: &Config) -> Result<()> {
    let spec = load_spec(cli)?;
    let prompt = ConfirmPrompt::new();
    let plan = prepare_plan(cli, config, spec, |count, source| {
        prompt.confirm_sweep(count, source)
    })?;

    if cli.json {
        return print_json(&plan);
    }
    if cli.list {
        print_list(&plan);
        return Ok(());
    }

    eprintln!(
        "{} {} encodes planned from {}",
        "[>>]".cyan().bold(),
        plan.task_count().to_string().bold(),
        cli.spec.display()
    );

    if cli.dry_run {
        eprintln!("{} Output commands only (will not execute).", "[i]".cyan());
    }

    let shell = cli.shell.as_deref().unwrap_or(&config.shell);
    let executor = BatchExecutor::new(CommandRunner::new(shell)).with_dry_run(cli.dry_run);
    let result = executor.execute(&plan).await?;

    if cli.dry_run {
        return Ok(());
    }

    print_summary(&result);
    result.into_result()
}

/// 명세 파일 로드 후 CLI 오버라이드 적용
pub fn load_spec(cli: &Cli) -> Result<Specification> {
    let mut spec = Specification::load(&cli.spec)?;
    if let Some(exe) = &cli.exe {
        spec = spec.with_executable(exe.as_str());
    }
    if let Some(source) = &cli.source {
        spec = spec.with_source(source.as_str());
    }
    Ok(spec)
}

/// 조합 수만 보고 확인을 받은 뒤에 확장
///
/// 확장은 모든 명령어 문자열을 메모리에 만들기 때문에, 거절된 스윕은
/// 확장 단계까지 가지 않아야 함.
pub fn prepare_plan<F>(cli: &Cli, config: &Config, spec: Specification, confirm: F) -> Result<EncodePlan>
where
    F: FnOnce(usize, &str) -> Result<bool>,
{
    let count = spec.combination_count()?;
    info!(count, source = %spec.full_path, "specification loaded");

    if needs_confirmation(cli, config, count) && !confirm(count, &spec.full_path)? {
        return Err(SweepError::UserCancelled);
    }

    build_plan(cli, config, &spec)
}

fn needs_confirmation(cli: &Cli, config: &Config, count: usize) -> bool {
    let executes = !(cli.dry_run || cli.list || cli.json);
    executes && !cli.yes && count > config.confirm_threshold
}

/// 확장 결과와 CLI/설정 값으로 실행 계획 생성
pub fn build_plan(cli: &Cli, config: &Config, spec: &Specification) -> Result<EncodePlan> {
    let expansion = expand(spec)?;
    debug!(commands = expansion.len(), "expansion complete");

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    let container = cli.container.as_deref().unwrap_or(&config.container_ext);

    Ok(EncodePlanner::create(expansion, &output_dir, container))
}

fn print_summary(result: &BatchResult) {
    eprintln!("\n{} Sweep complete!", "[OK]".green().bold());
    eprintln!("  - Total encodes: {}", result.total);
    eprintln!("  - Success: {}", result.success_count.to_string().green());
    eprintln!("  - Failed: {}", result.failure_count.to_string().red());
    eprintln!("  - Success rate: {:.1}%", result.success_rate());
    eprintln!("  - Execution time: {}ms", result.total_duration_ms);

    let failed = result.failed_tasks();
    if !failed.is_empty() {
        eprintln!("\n{} Failed encodes:", "[X]".red());
        for task in failed {
            eprintln!(
                "  - {} ({}): {}",
                task.name,
                task.started_at.format("%H:%M:%S"),
                task.error.as_deref().unwrap_or("unknown error").red()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    const SPEC: &str = r#"{
        "exePath": "vpxenc",
        "fullPath": "/in/clip.y4m",
        "NonVar": { "NoArg": { "good": null } },
        "Var": { "NoArg": { "preset": ["rt", "q"] } }
    }"#;

    #[test]
    fn test_build_plan_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("pa.json");
        fs::write(&spec_path, SPEC).unwrap();

        let cli = Cli::parse_from([
            "encsweep",
            spec_path.to_str().unwrap(),
            "--exe",
            "/opt/vpxenc",
            "--source",
            "/in/other.y4m",
            "--container",
            "ivf",
        ]);
        let spec = load_spec(&cli).unwrap();
        let plan = build_plan(&cli, &Config::default(), &spec).unwrap();

        assert_eq!(plan.task_count(), 2);
        assert_eq!(plan.tasks[0].command, "/opt/vpxenc --good --rt /in/other.y4m");
        assert_eq!(plan.tasks[0].output_path, PathBuf::from("other_rt.ivf"));
    }

    #[test]
    fn test_build_plan_uses_config_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("pa.json");
        fs::write(&spec_path, SPEC).unwrap();

        let config = Config {
            output_dir: "/data/encodes".to_string(),
            ..Config::default()
        };
        let cli = Cli::parse_from(["encsweep", spec_path.to_str().unwrap()]);
        let plan = build_plan(&cli, &config, &load_spec(&cli).unwrap()).unwrap();

        assert_eq!(plan.tasks[1].log_path, PathBuf::from("/data/encodes/clip_q.txt"));
    }

    #[test]
    fn test_build_plan_rejects_malformed_spec() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("pa.json");
        fs::write(
            &spec_path,
            r#"{ "exePath": "x", "fullPath": "a.y4m", "Var": { "NoArgGrp": { "a": ["1", "2"], "b": ["1", "2", "3"] } } }"#,
        )
        .unwrap();

        let cli = Cli::parse_from(["encsweep", spec_path.to_str().unwrap()]);
        let spec = load_spec(&cli).unwrap();
        let confirm = |_: usize, _: &str| -> Result<bool> { panic!("asked to confirm a malformed sweep") };

        assert!(matches!(
            prepare_plan(&cli, &Config::default(), spec, confirm),
            Err(SweepError::MalformedSpecification(_))
        ));
    }

    fn wide_spec(dims: usize) -> Specification {
        let keys: Vec<String> = (0..dims).map(|i| format!(r#""k{}": ["a", "b"]"#, i)).collect();
        Specification::from_json(&format!(
            r#"{{ "exePath": "enc", "fullPath": "a.y4m", "Var": {{ "NoArg": {{ {} }} }} }}"#,
            keys.join(", ")
        ))
        .unwrap()
    }

    #[test]
    fn test_declined_sweep_is_never_expanded() {
        // 2^40개 조합: 확인보다 확장이 먼저라면 여기서 메모리가 바닥남
        let cli = Cli::parse_from(["encsweep"]);
        let mut asked = None;

        let result = prepare_plan(&cli, &Config::default(), wide_spec(40), |count, source| {
            asked = Some((count, source.to_string()));
            Ok(false)
        });

        assert!(matches!(result, Err(SweepError::UserCancelled)));
        assert_eq!(asked, Some((1usize << 40, "a.y4m".to_string())));
    }

    #[test]
    fn test_small_sweep_skips_confirmation() {
        let cli = Cli::parse_from(["encsweep"]);
        let confirm = |_: usize, _: &str| -> Result<bool> { panic!("small sweep asked for confirmation") };

        let plan = prepare_plan(&cli, &Config::default(), wide_spec(3), confirm).unwrap();
        assert_eq!(plan.task_count(), 8);
    }

    #[test]
    fn test_yes_and_dry_run_skip_confirmation() {
        let config = Config {
            confirm_threshold: 1,
            ..Config::default()
        };

        assert!(needs_confirmation(&Cli::parse_from(["encsweep"]), &config, 2));
        assert!(!needs_confirmation(&Cli::parse_from(["encsweep", "--yes"]), &config, 2));
        assert!(!needs_confirmation(&Cli::parse_from(["encsweep", "--dry-run"]), &config, 2));
        assert!(!needs_confirmation(&Cli::parse_from(["encsweep", "--list"]), &config, 2));
    }
}
