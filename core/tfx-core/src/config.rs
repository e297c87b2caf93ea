//! Evaluator configuration
//!
//! Defaults, JSON file persistence, and `TFX_*` environment overrides.

use crate::error::{TfxError, TfxResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// 함수 이름 매칭 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Names must match byte for byte.
    #[default]
    Exact,
    /// ASCII case is ignored (`ABS`, `Abs` and `abs` resolve alike).
    CaseInsensitive,
}

impl NameMatching {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameMatching::Exact => "exact",
            NameMatching::CaseInsensitive => "case_insensitive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(NameMatching::Exact),
            "case_insensitive" => Some(NameMatching::CaseInsensitive),
            _ => None,
        }
    }

    /// Registry lookup key for `name` under this policy.
    pub fn normalize(&self, name: &str) -> String {
        match self {
            NameMatching::Exact => name.to_string(),
            NameMatching::CaseInsensitive => name.to_ascii_lowercase(),
        }
    }
}

/// 출력 버퍼 증가 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferGrowth {
    /// Grow to exactly the requested row count.
    #[default]
    Exact,
    /// Grow to the next power of two at or above the requested row count.
    PowerOfTwo,
}

impl BufferGrowth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BufferGrowth::Exact => "exact",
            BufferGrowth::PowerOfTwo => "power_of_two",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(BufferGrowth::Exact),
            "power_of_two" => Some(BufferGrowth::PowerOfTwo),
            _ => None,
        }
    }

    /// Capacity to allocate when `required` rows no longer fit.
    pub fn target_capacity(&self, required: usize, floor: usize) -> usize {
        let grown = match self {
            BufferGrowth::Exact => required,
            BufferGrowth::PowerOfTwo => required.checked_next_power_of_two().unwrap_or(required),
        };
        grown.max(floor)
    }
}

/// 평가기 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub name_matching: NameMatching,
    /// Lower bound for the first buffer allocation of each node.
    pub initial_buffer_capacity: usize,
    pub growth: BufferGrowth,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            name_matching: NameMatching::Exact,
            initial_buffer_capacity: 0,
            growth: BufferGrowth::Exact,
        }
    }
}

impl EvaluatorConfig {
    pub const ENV_NAME_MATCHING: &'static str = "TFX_NAME_MATCHING";
    pub const ENV_INITIAL_BUFFER_CAPACITY: &'static str = "TFX_INITIAL_BUFFER_CAPACITY";
    pub const ENV_BUFFER_GROWTH: &'static str = "TFX_BUFFER_GROWTH";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_matching(mut self, name_matching: NameMatching) -> Self {
        self.name_matching = name_matching;
        self
    }

    pub fn with_initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.initial_buffer_capacity = capacity;
        self
    }

    pub fn with_growth(mut self, growth: BufferGrowth) -> Self {
        self.growth = growth;
        self
    }

    /// 환경 변수에서 로드
    pub fn load_from_env(self) -> Self {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `TFX_*` overrides from an arbitrary lookup. Unparseable values are
    /// skipped with a warning and leave the current setting in place.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(Self::ENV_NAME_MATCHING) {
            match NameMatching::parse(&value) {
                Some(policy) => self.name_matching = policy,
                None => warn!(key = Self::ENV_NAME_MATCHING, %value, "ignoring invalid override"),
            }
        }

        if let Some(value) = lookup(Self::ENV_INITIAL_BUFFER_CAPACITY) {
            match value.trim().parse::<usize>() {
                Ok(capacity) => self.initial_buffer_capacity = capacity,
                Err(_) => warn!(
                    key = Self::ENV_INITIAL_BUFFER_CAPACITY,
                    %value,
                    "ignoring invalid override"
                ),
            }
        }

        if let Some(value) = lookup(Self::ENV_BUFFER_GROWTH) {
            match BufferGrowth::parse(&value) {
                Some(growth) => self.growth = growth,
                None => warn!(key = Self::ENV_BUFFER_GROWTH, %value, "ignoring invalid override"),
            }
        }

        self
    }

    /// 파일에서 로드
    pub fn from_json_file(path: &Path) -> TfxResult<Self> {
        if !path.exists() {
            return Err(TfxError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// 파일에 저장
    pub fn save_json_file(&self, path: &Path) -> TfxResult<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        Ok(())
    }
}
