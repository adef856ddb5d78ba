//! 입력 폴더 탐색 모듈
//!
//! 입력 폴더 바로 아래의 일반 파일 목록을 수집합니다 (하위 폴더는 탐색하지 않음).

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GeoMergeError, Result};
use crate::pattern::PatternMatcher;

/// 입력 경로가 존재하는 폴더인지 확인
pub fn validate_input(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(GeoMergeError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    if !path.is_dir() {
        return Err(GeoMergeError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// 입력 파일 수집
///
/// 결과는 파일 이름 순으로 정렬되므로 같은 폴더에 대해 항상 같은 병합 순서를 보장합니다.
/// 폴더 항목을 읽는 도중 발생한 에러는 건너뛰지 않고 그대로 반환합니다.
pub fn scan_directory(path: &Path, matcher: &PatternMatcher) -> Result<Vec<PathBuf>> {
    validate_input(path)?;

    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| GeoMergeError::ScanError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // 심볼릭 링크는 대상이 일반 파일일 때만 포함
        if !entry.path().is_file() {
            continue;
        }

        // UTF-8이 아닌 이름도 패턴이 없으면 그대로 포함
        let matched =
            !matcher.has_pattern() || matcher.matches(&entry.file_name().to_string_lossy());

        if matched {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_skips_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        let sub = temp_dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.json"), "{}").unwrap();

        let files = scan_directory(temp_dir.path(), &PatternMatcher::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_scan_with_pattern() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("route.geojson"), "{}").unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "").unwrap();

        let matcher = PatternMatcher::new(Some("*.geojson".to_string())).unwrap();
        let files = scan_directory(temp_dir.path(), &matcher).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("route.geojson"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_keeps_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        let odd = temp_dir.path().join(OsStr::from_bytes(b"b\xff.json"));
        if fs::write(&odd, "{}").is_err() {
            // 파일 시스템이 UTF-8 이름만 허용하는 경우
            return;
        }

        let files = scan_directory(temp_dir.path(), &PatternMatcher::default()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1], odd);

        let matcher = PatternMatcher::new(Some("b*.json".to_string())).unwrap();
        let files = scan_directory(temp_dir.path(), &matcher).unwrap();
        assert_eq!(files, vec![odd]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = scan_directory(&missing, &PatternMatcher::default());
        assert!(matches!(result, Err(GeoMergeError::InputNotFound { .. })));
    }

    #[test]
    fn test_scan_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.json");
        fs::write(&file, "{}").unwrap();

        let result = scan_directory(&file, &PatternMatcher::default());
        assert!(matches!(result, Err(GeoMergeError::NotADirectory { .. })));
    }
}
