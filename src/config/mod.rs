use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// encsweep 사용자 설정
///
/// 설정 파일은 ~/.encsweep/config.toml에 저장됩니다.
/// CLI 옵션이 주어지면 항상 설정 파일보다 우선합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 출력 컨테이너 확장자
    #[serde(default = "default_container_ext")]
    pub container_ext: String,

    /// 인코딩 결과와 로그를 저장할 디렉토리
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// 명령어 실행에 사용할 셸 (`<shell> -c <command>`)
    #[serde(default = "default_shell")]
    pub shell: String,

    /// 이 개수보다 많은 인코딩은 실행 전에 확인을 받음
    #[serde(default = "default_confirm_threshold")]
    pub confirm_threshold: usize,
}

fn default_container_ext() -> String {
    "webm".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_shell() -> String {
    "bash".to_string()
}

fn default_confirm_threshold() -> usize {
    32
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_ext: default_container_ext(),
            output_dir: default_output_dir(),
            shell: default_shell(),
            confirm_threshold: default_confirm_threshold(),
        }
    }
}

impl Config {
    /// 설정 디렉토리 경로
    fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SweepError::ConfigError("Could not find home directory".to_string()))?;
        Ok(home.join(".encsweep"))
    }

    /// 설정 파일 경로 가져오기
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// 설정 파일에서 로드 (없으면 기본값 사용)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        // 설정 파일이 없으면 기본값 반환
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SweepError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// 설정을 파일에 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 디렉토리가 없으면 생성
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| SweepError::ConfigError(e.to_string()))?;

        fs::write(path, toml_string)?;

        Ok(())
    }

    /// 설정 파일 초기화 (기본값으로). 저장된 경로 반환
    pub fn init() -> Result<PathBuf> {
        let path = Self::config_path()?;
        Self::default().save_to(&path)?;
        Ok(path)
    }
}
