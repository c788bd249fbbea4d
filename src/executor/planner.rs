use crate::expander::Expansion;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 인코딩 작업 단위
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeTask {
    /// 작업 ID (확장 결과의 인덱스)
    pub id: usize,
    /// 출력 이름 (`clip_rt_cpu-used=1`)
    pub name: String,
    /// 확장된 인코더 명령어 (출력 옵션 제외)
    pub command: String,
    /// 인코딩 결과 파일
    pub output_path: PathBuf,
    /// 인코더 출력 로그 파일
    pub log_path: PathBuf,
}

impl EncodeTask {
    /// 셸에 넘길 최종 명령어
    ///
    /// `<command> -o "<output>" > "<log>" 2>&1`
    pub fn shell_line(&self) -> String {
        format!(
            "{} -o \"{}\" > \"{}\" 2>&1",
            self.command,
            self.output_path.display(),
            self.log_path.display()
        )
    }
}

/// 실행 계획
#[derive(Debug, Clone, Serialize)]
pub struct EncodePlan {
    pub generated_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub tasks: Vec<EncodeTask>,
}

impl EncodePlan {
    /// 전체 작업 수
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

/// 실행 계획 생성기
pub struct EncodePlanner;

impl EncodePlanner {
    /// 확장 결과에서 계획 생성
    ///
    /// 출력 디렉토리가 `.`이면 경로 없이 이름만 사용합니다.
    pub fn create(expansion: Expansion, output_dir: &Path, container_ext: &str) -> EncodePlan {
        let ext = container_ext.trim_start_matches('.');
        let (commands, names) = expansion.into_parts();

        let tasks = commands
            .into_iter()
            .zip(names)
            .enumerate()
            .map(|(id, (command, name))| EncodeTask {
                id,
                output_path: Self::place(output_dir, format!("{}.{}", name, ext)),
                log_path: Self::place(output_dir, format!("{}.txt", name)),
                name,
                command,
            })
            .collect();

        EncodePlan {
            generated_at: Utc::now(),
            output_dir: output_dir.to_path_buf(),
            tasks,
        }
    }

    fn place(output_dir: &Path, file_name: String) -> PathBuf {
        if output_dir == Path::new(".") || output_dir.as_os_str().is_empty() {
            PathBuf::from(file_name)
        } else {
            output_dir.join(file_name)
        }
    }
}
