//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::writer::output_path;

/// geomerge CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "geomerge",
    author = "YourName <your@email.com>",
    version,
    about = "GEOJSON FOLDER MERGER - 폴더 내 GeoJSON 좌표를 하나의 MultiLineString Feature로 병합",
    long_about = r#"
GEOJSON FOLDER MERGER
=====================

지정된 폴더 바로 아래의 모든 GeoJSON 파일을 읽어
각 feature의 geometry.coordinates 배열을 이어 붙인 뒤
하나의 MultiLineString Feature로 <NAME>.json 에 저장합니다.

특징:
  • 파일 이름 순서로 정렬된 결정적인 출력
  • 기존 출력 파일은 절대 덮어쓰지 않음
  • 잘못된 입력 파일을 모두 찾아 한 번에 보고
  • 병렬 파싱 및 진행률 표시

예제:
  geomerge ./tracks merged
  geomerge ./tracks merged --pattern "2024-*.geojson"
  geomerge ./tracks merged --validate-only --verbose
"#
)]
pub struct Args {
    /// GeoJSON 파일들이 있는 입력 폴더 경로
    pub path: PathBuf,

    /// 출력 파일 이름 (확장자 제외, <NAME>.json 으로 저장)
    pub name: String,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "*.geojson", "day?.json")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 병합 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 입력 파일 구조 검사만 수행 (출력 없음)
    #[arg(long)]
    pub validate_only: bool,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 에러 로그 파일 경로
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// 들여쓰기된 JSON 출력 (기본값: 한 줄)
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// 출력 파일 경로 (`<NAME>.json`)
    pub fn output(&self) -> PathBuf {
        output_path(&self.name)
    }
}
