//! 출력 파일 작성 모듈
//!
//! 병합된 좌표를 MultiLineString Feature로 감싸 새 파일에 저장합니다.
//! 출력 파일은 항상 새로 생성되며, 같은 이름의 파일이 있으면 실패합니다.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{GeoMergeError, Result};
use crate::model::MultiLineStringFeature;

/// 출력 이름으로부터 `<NAME>.json` 경로 생성
pub fn output_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.json", name))
}

/// 출력 파일이 이미 존재하면 에러
///
/// 입력을 읽기 전에 빠르게 실패하기 위한 사전 검사입니다. 실제 생성 시에도 다시 확인합니다.
pub fn ensure_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(GeoMergeError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Feature를 새 파일로 저장하고 쓴 바이트 수를 반환
pub fn write_feature(path: &Path, feature: &MultiLineStringFeature, pretty: bool) -> Result<u64> {
    // 기본 출력은 구분자 뒤 공백 없는 한 줄 JSON (`{"type":"Feature",...}`)
    let bytes = if pretty {
        serde_json::to_vec_pretty(feature)
    } else {
        serde_json::to_vec(feature)
    }
    .map_err(|e| GeoMergeError::SerializeError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => GeoMergeError::OutputExists {
                path: path.to_path_buf(),
            },
            _ => GeoMergeError::WriteError {
                file: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

    if let Err(e) = file.write_all(&bytes).and_then(|_| file.sync_all()) {
        drop(file);
        // 이 실행에서 만든 파일이므로 불완전한 출력은 제거
        let _ = fs::remove_file(path);
        return Err(GeoMergeError::WriteError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        });
    }

    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("out"), PathBuf::from("out.json"));
        assert_eq!(output_path("a.b"), PathBuf::from("a.b.json"));
    }

    #[test]
    fn test_write_feature_single_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        let feature = MultiLineStringFeature::new(vec![json!([0, 0]), json!([1, 1])]);

        let written = write_feature(&path, &feature, false).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert_eq!(written, content.len() as u64);
        assert!(!content.contains('\n'));
        assert_eq!(
            content,
            r#"{"type":"Feature","geometry":{"type":"MultiLineString","coordinates":[[0,0],[1,1]]}}"#
        );
    }

    #[test]
    fn test_write_feature_pretty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        let feature = MultiLineStringFeature::new(vec![json!([0, 0])]);

        write_feature(&path, &feature, true).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains('\n'));
        let parsed: MultiLineStringFeature = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, feature);
    }

    #[test]
    fn test_write_feature_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::write(&path, "keep me").unwrap();

        let feature = MultiLineStringFeature::new(Vec::new());
        let result = write_feature(&path, &feature, false);

        assert!(matches!(result, Err(GeoMergeError::OutputExists { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
        assert!(ensure_absent(&path).is_err());
    }
}
