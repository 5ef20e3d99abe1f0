use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Search terms used when no keywords file is configured.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "노트북", "캠핑용품", "무선 이어폰", "게이밍 마우스", "에어프라이어",
    "로봇청소기", "캡슐커피머신", "전기 주전자", "토스터기", "믹서기",
    "제습기", "가습기", "선풍기", "온수매트", "블루투스 스피커",
    "태블릿", "스마트워치", "외장하드", "USB 메모리", "무선 충전기",
    "차량용 거치대", "블랙박스", "가정용 빔프로젝터", "사운드바", "모니터암",
    "키보드", "게이밍 헤드셋", "웹캠", "콘덴서 마이크", "LED 스탠드",
    "수납함", "침구세트", "베개", "프라이팬", "냄비",
    "식기건조대", "물걸레 청소기", "스팀다리미", "드라이기", "전동 칫솔",
    "구강세정기", "비타민", "유산균", "단백질 보충제", "요가매트",
    "덤벨", "자전거", "액션캠", "미러리스 카메라", "삼각대",
    "백팩", "캐리어", "목베개", "보조배터리", "등산화",
    "운동화", "선글라스", "선크림", "샴푸", "핸드크림",
    "공기청정기 필터", "정수기 필터", "자동차 와이퍼", "세차 용품", "보드게임",
    "유모차", "카시트", "기저귀", "물티슈", "체온계",
    "강아지 사료", "고양이 사료", "고양이 모래", "캣타워", "다이어리",
];

/// On-disk shape of a keywords file:
///
/// ```yaml
/// keywords:
///   - 노트북
///   - 캠핑용품
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsFile {
    pub keywords: Vec<String>,
}

/// The fixed set of search terms eligible for random selection in a run.
///
/// Entries are trimmed, non-empty, and unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPool {
    keywords: Vec<String>,
}

impl KeywordPool {
    /// Builds a validated pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an empty pool, a blank entry,
    /// or a duplicate entry.
    pub fn new<I, S>(keywords: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.into().trim().to_string())
            .collect();
        validate_keywords(&keywords)?;
        Ok(Self { keywords })
    }

    /// The built-in pool, [`DEFAULT_KEYWORDS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.keywords.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

/// Load and validate a keyword pool from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_keywords(path: &Path) -> Result<KeywordPool, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeywordsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: KeywordsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::KeywordsFileParse)?;

    KeywordPool::new(file.keywords)
}

fn validate_keywords(keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Validation(
            "keyword pool must contain at least one keyword".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for keyword in keywords {
        if keyword.is_empty() {
            return Err(ConfigError::Validation(
                "keywords must be non-empty".to_string(),
            ));
        }
        if !seen.insert(keyword.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate keyword: '{keyword}'"
            )));
        }
    }

    Ok(())
}
