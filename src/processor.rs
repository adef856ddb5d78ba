//! GeoJSON 파일 처리 모듈
//!
//! 개별 파일의 읽기와 파싱, 좌표 추출, 그리고 파일별 결과를 순서대로 병합하는 일을 담당합니다.

use memmap2::Mmap;
use rayon::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{FileFailure, GeoMergeError, Result};
use crate::model::FeatureCollection;

/// 파일 하나에서 추출한 좌표
#[derive(Debug)]
pub struct FileContribution {
    /// 파일 내 모든 feature의 좌표를 feature 순서대로 이어 붙인 값
    pub coordinates: Vec<Value>,
    /// feature 수
    pub feature_count: usize,
}

/// 파일 처리 결과
#[derive(Debug)]
pub struct FileOutcome {
    /// 처리된 파일 경로
    pub path: PathBuf,
    /// 원본 파일 크기
    pub file_size: u64,
    /// 추출 결과
    pub result: Result<FileContribution>,
}

impl FileOutcome {
    /// 실패 사유 (성공 시 None)
    pub fn error_message(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| e.to_string())
    }
}

/// 병합 결과
#[derive(Debug, Default)]
pub struct Merged {
    /// 전체 좌표 (파일 순서, feature 순서)
    pub coordinates: Vec<Value>,
    /// 병합된 파일 수
    pub file_count: usize,
    /// 병합된 feature 수
    pub feature_count: usize,
    /// 출력 파일에 쓴 바이트 수 (저장 전에는 0)
    pub bytes_written: u64,
}

/// 파일 처리 옵션
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// 대용량 파일 임계값 (이상이면 메모리 매핑 사용)
    pub mmap_threshold: u64,
    /// 들여쓰기된 JSON 출력 여부
    pub pretty: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self {
            mmap_threshold: 10 * 1024 * 1024, // 10MB
            pretty: false,
        }
    }

    /// 메모리 매핑 임계값 설정
    pub fn with_mmap_threshold(mut self, mmap_threshold: u64) -> Self {
        self.mmap_threshold = mmap_threshold;
        self
    }

    /// Pretty 출력 설정
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// 단일 GeoJSON 파일 처리
pub fn process_file(path: PathBuf, options: &MergeOptions) -> FileOutcome {
    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let result = load_file(&path, file_size, options);

    FileOutcome {
        path,
        file_size,
        result,
    }
}

fn load_file(path: &Path, file_size: u64, options: &MergeOptions) -> Result<FileContribution> {
    let collection = if file_size >= options.mmap_threshold {
        parse_with_mmap(path)?
    } else {
        parse_with_reader(path)?
    };

    extract_coordinates(collection, path)
}

/// 버퍼 리더를 사용한 파싱
fn parse_with_reader(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path).map_err(|e| GeoMergeError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| GeoMergeError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 메모리 매핑을 사용한 파싱 (대용량 파일용)
fn parse_with_mmap(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path).map_err(|e| GeoMergeError::FileOpenError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // 매핑이 살아있는 동안 파일이 외부에서 변경되지 않는다고 가정
    let mmap = unsafe {
        Mmap::map(&file).map_err(|e| GeoMergeError::FileOpenError {
            file: path.to_path_buf(),
            reason: format!("메모리 매핑 실패: {}", e),
        })?
    };

    serde_json::from_slice(&mmap).map_err(|e| GeoMergeError::ParseError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// FeatureCollection에서 좌표 추출
///
/// 각 feature의 `geometry.coordinates` 배열 요소를 feature 순서대로 이어 붙입니다.
/// 첫 번째로 누락된 키에서 중단하며, 에러에는 파일 경로와 feature 인덱스가 포함됩니다.
pub fn extract_coordinates(collection: FeatureCollection, file: &Path) -> Result<FileContribution> {
    let features = collection
        .features
        .ok_or_else(|| GeoMergeError::MissingKey {
            file: file.to_path_buf(),
            key: "features",
            feature: None,
        })?;

    let feature_count = features.len();
    let mut coordinates = Vec::new();

    for (index, feature) in features.into_iter().enumerate() {
        let geometry = feature.geometry.ok_or_else(|| GeoMergeError::MissingKey {
            file: file.to_path_buf(),
            key: "geometry",
            feature: Some(index),
        })?;

        let coords = geometry
            .coordinates
            .ok_or_else(|| GeoMergeError::MissingKey {
                file: file.to_path_buf(),
                key: "coordinates",
                feature: Some(index),
            })?;

        coordinates.extend(coords);
    }

    Ok(FileContribution {
        coordinates,
        feature_count,
    })
}

/// 여러 파일을 병렬로 처리
///
/// 결과는 입력 순서와 같은 순서로 반환됩니다. `on_each`는 파일 하나가 끝날 때마다
/// 작업 스레드에서 호출됩니다.
pub fn process_files<F>(files: Vec<PathBuf>, options: &MergeOptions, on_each: F) -> Vec<FileOutcome>
where
    F: Fn(&FileOutcome) + Sync,
{
    files
        .into_par_iter()
        .map(|path| {
            let outcome = process_file(path, options);
            on_each(&outcome);
            outcome
        })
        .collect()
}

/// 파일별 결과를 순서대로 병합
///
/// 하나라도 실패한 파일이 있으면 모든 실패를 모아 `InvalidInputs`로 반환합니다.
pub fn merge_outcomes(outcomes: Vec<FileOutcome>) -> Result<Merged> {
    let mut failures = Vec::new();

    let merged = outcomes
        .into_iter()
        .fold(Merged::default(), |mut acc, outcome| {
            match outcome.result {
                Ok(contribution) if failures.is_empty() => {
                    acc.coordinates.extend(contribution.coordinates);
                    acc.file_count += 1;
                    acc.feature_count += contribution.feature_count;
                }
                Ok(_) => {}
                Err(e) => failures.push(FileFailure {
                    path: outcome.path,
                    reason: e.to_string(),
                }),
            }
            acc
        });

    if failures.is_empty() {
        Ok(merged)
    } else {
        Err(GeoMergeError::InvalidInputs { failures })
    }
}
