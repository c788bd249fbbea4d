use crate::error::{Result, SweepError};
use crate::executor::EncodePlan;
use std::io;

/// `name<TAB>command` 한 줄씩 출력
pub fn print_list(plan: &EncodePlan) {
    for line in list_lines(plan) {
        println!("{}", line);
    }
}

/// 실행 계획을 JSON으로 출력
pub fn print_json(plan: &EncodePlan) -> Result<()> {
    println!("{}", render_json(plan)?);
    Ok(())
}

fn render_json(plan: &EncodePlan) -> Result<String> {
    serde_json::to_string_pretty(plan).map_err(output_error)
}

// `From<serde_json::Error>`는 명세 파싱 오류로 가므로 출력 쪽은 직접 변환
fn output_error(e: serde_json::Error) -> SweepError {
    SweepError::IoError(io::Error::new(io::ErrorKind::InvalidData, e))
}

fn list_lines(plan: &EncodePlan) -> Vec<String> {
    plan.tasks
        .iter()
        .map(|task| format!("{}\t{}", task.name, task.command))
        .collect()
}
