//! GeoJSON 입력/출력 구조 정의 모듈
//!
//! 병합에 필요한 `features → geometry → coordinates` 경로만 타입으로 표현하고,
//! 나머지 필드(`type`, `properties` 등)는 무시합니다.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 입력 FeatureCollection
///
/// 키 누락을 serde 에러 대신 파일/feature 위치가 포함된 에러로 보고하기 위해
/// 각 필드는 `Option`으로 받습니다.
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Option<Vec<Feature>>,
}

/// 입력 Feature
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
}

/// 입력 Geometry
///
/// 좌표의 중첩 구조는 검사하지 않고 그대로 전달합니다.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub coordinates: Option<Vec<Value>>,
}

/// 출력 MultiLineString Feature
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MultiLineStringFeature {
    #[serde(rename = "type")]
    kind: String,
    geometry: MultiLineString,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MultiLineString {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Value>,
}

impl MultiLineStringFeature {
    pub fn new(coordinates: Vec<Value>) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: MultiLineString {
                kind: "MultiLineString".to_string(),
                coordinates,
            },
        }
    }

    pub fn into_coordinates(self) -> Vec<Value> {
        self.geometry.coordinates
    }
}
