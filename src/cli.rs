use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "encsweep")]
#[command(version)]
#[command(about = "Expand an encoder parameter sweep into named encode runs", long_about = None)]
pub struct Cli {
    /// 파라미터 명세 JSON 파일
    #[arg(default_value = "pa.json")]
    pub spec: PathBuf,

    /// 인코더 실행 파일 경로 (명세의 exePath 대신 사용)
    #[arg(short = 'x', long)]
    pub exe: Option<String>,

    /// 입력 미디어 경로 (명세의 fullPath 대신 사용)
    #[arg(short = 's', long)]
    pub source: Option<String>,

    /// 인코딩 결과와 로그를 저장할 디렉토리. 미지정시 설정 파일의 output_dir 사용
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// 출력 컨테이너 확장자 (예: webm, ivf)
    #[arg(short = 'e', long)]
    pub container: Option<String>,

    /// 명령어 실행에 사용할 셸
    #[arg(long)]
    pub shell: Option<String>,

    /// 확인 없이 바로 실행
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// 명령어만 출력하고 실행하지 않음
    #[arg(long)]
    pub dry_run: bool,

    /// 이름과 명령어 목록만 출력
    #[arg(long, conflicts_with = "json")]
    pub list: bool,

    /// 실행 계획을 JSON으로 출력
    #[arg(long)]
    pub json: bool,

    /// 디버그 모드
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// 기본 설정 파일 생성
    #[arg(long)]
    pub init_config: bool,
}
