//! 에러 타입 정의 모듈
//!
//! geomerge에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// 개별 입력 파일의 처리 실패 정보
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    /// 실패한 파일 경로
    pub path: PathBuf,
    /// 실패 사유
    pub reason: String,
}

/// geomerge에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum GeoMergeError {
    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputNotFound { path: PathBuf },

    /// 입력이 폴더가 아님
    #[error("입력 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 폴더 목록 읽기 실패
    #[error("폴더를 읽을 수 없습니다 ({path}): {reason}")]
    ScanError { path: PathBuf, reason: String },

    /// 출력 파일이 이미 존재
    #[error("출력 파일이 이미 존재합니다: {path}")]
    OutputExists { path: PathBuf },

    /// 입력 파일 열기 실패
    #[error("파일을 열 수 없습니다 ({file}): {reason}")]
    FileOpenError { file: PathBuf, reason: String },

    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({file}): {reason}")]
    ParseError { file: PathBuf, reason: String },

    /// 필수 키 누락
    #[error("필수 키 \"{key}\" 누락 ({file}{})", feature_label(.feature))]
    MissingKey {
        file: PathBuf,
        key: &'static str,
        feature: Option<usize>,
    },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패 ({file}): {reason}")]
    SerializeError { file: PathBuf, reason: String },

    /// 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 하나 이상의 입력 파일 처리 실패
    #[error("{} 개의 입력 파일을 처리할 수 없습니다", .failures.len())]
    InvalidInputs { failures: Vec<FileFailure> },
}

fn feature_label(feature: &Option<usize>) -> String {
    match feature {
        Some(index) => format!(", feature #{}", index),
        None => String::new(),
    }
}

/// geomerge 결과 타입 별칭
pub type Result<T> = std::result::Result<T, GeoMergeError>;
