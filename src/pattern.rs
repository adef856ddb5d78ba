//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 입력 파일 이름 필터링을 담당합니다.

use glob::Pattern;

use crate::error::{GeoMergeError, Result};

/// 컴파일된 패턴 매처
#[derive(Debug, Default)]
pub struct PatternMatcher {
    pattern: Option<Pattern>,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// 패턴이 `None`이면 모든 파일과 일치합니다.
    ///
    /// # Examples
    /// ```
    /// use geomerge::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new(Some("*.geojson".to_string())).unwrap();
    /// assert!(matcher.matches("route.geojson"));
    /// assert!(!matcher.matches("notes.txt"));
    /// ```
    pub fn new(pattern: Option<String>) -> Result<Self> {
        let compiled = match pattern {
            Some(ref p) => Some(
                Pattern::new(p)
                    .map_err(|_| GeoMergeError::InvalidPattern { pattern: p.clone() })?,
            ),
            None => None,
        };

        Ok(Self { pattern: compiled })
    }

    /// 파일 이름이 패턴과 일치하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matcher_extension() {
        let matcher = PatternMatcher::new(Some("*.geojson".to_string())).unwrap();
        assert!(matcher.matches("a.geojson"));
        assert!(!matcher.matches("a.json"));
    }

    #[test]
    fn test_pattern_matcher_with_question_mark() {
        let matcher = PatternMatcher::new(Some("day?.json".to_string())).unwrap();
        assert!(matcher.matches("day1.json"));
        assert!(!matcher.matches("day.json"));
        assert!(!matcher.matches("day12.json"));
    }

    #[test]
    fn test_pattern_matcher_none() {
        let matcher = PatternMatcher::new(None).unwrap();
        assert!(matcher.matches("anything"));
        assert!(!matcher.has_pattern());
    }

    #[test]
    fn test_pattern_matcher_invalid() {
        let result = PatternMatcher::new(Some("[invalid".to_string()));
        assert!(matches!(
            result,
            Err(GeoMergeError::InvalidPattern { .. })
        ));
    }
}
