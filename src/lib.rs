//! geomerge - GEOJSON FOLDER MERGER
//!
//! 폴더 내 GeoJSON 파일들의 모든 feature 좌표를 이어 붙여
//! 하나의 MultiLineString Feature 파일로 저장하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📂 **폴더 탐색**: 입력 폴더 바로 아래의 일반 파일을 파일 이름 순으로 수집
//! - 🧭 **좌표 병합**: `features[].geometry.coordinates` 를 파일/feature 순서대로 연결
//! - 🛡️ **덮어쓰기 방지**: `<NAME>.json` 이 이미 있으면 실패
//! - ❌ **일괄 에러 보고**: 잘못된 입력 파일을 모두 찾아 파일별로 보고, 출력은 만들지 않음
//! - 🚀 **병렬 파싱**: Rayon으로 파일 단위 병렬 처리, 결과 순서는 유지
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법: ./tracks 의 파일들을 merged.json 으로 병합
//! geomerge ./tracks merged
//!
//! # 구조 검사만
//! geomerge ./tracks merged --validate-only
//! ```

pub mod cli;
pub mod error;
pub mod model;
pub mod pattern;
pub mod processor;
pub mod scanner;
pub mod stats;
pub mod writer;

use std::path::{Path, PathBuf};

// Re-exports for convenient access
pub use cli::Args;
pub use error::{FileFailure, GeoMergeError, Result};
pub use model::MultiLineStringFeature;
pub use pattern::PatternMatcher;
pub use processor::{process_file, process_files, FileOutcome, MergeOptions, Merged};
pub use scanner::scan_directory;
pub use stats::{format_bytes, Statistics};
pub use writer::{output_path, write_feature};

/// 폴더의 모든 파일을 병합하여 `output` 에 저장
pub fn merge_directory(
    input: &Path,
    output: &Path,
    matcher: &PatternMatcher,
    options: &MergeOptions,
) -> Result<Merged> {
    let files = scan_directory(input, matcher)?;
    merge_into(files, output, options, |_| {})
}

/// 파일 목록을 순서대로 병합하여 `output` 에 저장
///
/// 출력 파일이 이미 있으면 입력을 읽기 전에 실패하고, 입력 중 하나라도 잘못되면
/// 출력 파일을 만들지 않습니다. `on_each`는 파일 하나의 처리가 끝날 때마다 호출됩니다.
pub fn merge_into<F>(
    files: Vec<PathBuf>,
    output: &Path,
    options: &MergeOptions,
    on_each: F,
) -> Result<Merged>
where
    F: Fn(&FileOutcome) + Sync,
{
    writer::ensure_absent(output)?;

    let merged = processor::merge_outcomes(process_files(files, options, on_each))?;

    let feature = MultiLineStringFeature::new(merged.coordinates);
    let bytes_written = write_feature(output, &feature, options.pretty)?;

    Ok(Merged {
        coordinates: feature.into_coordinates(),
        bytes_written,
        ..merged
    })
}
