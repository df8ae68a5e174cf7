use std::{env, fs, path::Path};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimilarityError};

/// Default capacity of the segmentation cache (distinct texts).
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default term pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// How the engine owns its TF-IDF model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelPolicy {
    /// One model reused across calls, fits serialized behind a mutex.
    #[default]
    Shared,
    /// A fresh model for every call; no contention between threads.
    PerCall,
}

/// Term extraction and weighting knobs of the TF-IDF model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerOptions {
    pub token_pattern: String,
    pub lowercase: bool,
    /// idf = ln((1 + n) / (1 + df)) + 1 when set, ln(n / df) + 1 otherwise
    pub smooth_idf: bool,
    /// tf = 1 + ln(count) instead of the raw count
    pub sublinear_tf: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

/// Engine configuration.
///
/// Loaded from an optional JSON file, then overridden by environment
/// variables:
/// - `SIMCHECK_CACHE_ENABLED` (`true` / `false`)
/// - `SIMCHECK_CACHE_CAPACITY` (positive integer)
/// - `SIMCHECK_MODEL_POLICY` (`shared` / `per_call`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub cache_enabled: bool,
    pub cache_capacity: usize,
    pub model_policy: ModelPolicy,
    pub vectorizer: VectorizerOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            model_policy: ModelPolicy::default(),
            vectorizer: VectorizerOptions::default(),
        }
    }
}

impl EngineOptions {
    /// Load options from `path` (if any) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut options = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        options.apply_env()?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| SimilarityError::io(path, e))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SimilarityError::Config(e.to_string()))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = env::var("SIMCHECK_CACHE_ENABLED") {
            self.cache_enabled = value.trim().parse().map_err(|_| {
                SimilarityError::Config(format!("SIMCHECK_CACHE_ENABLED: expected bool, got {value:?}"))
            })?;
        }
        if let Ok(value) = env::var("SIMCHECK_CACHE_CAPACITY") {
            self.cache_capacity = value.trim().parse().map_err(|_| {
                SimilarityError::Config(format!("SIMCHECK_CACHE_CAPACITY: expected integer, got {value:?}"))
            })?;
        }
        match env::var("SIMCHECK_MODEL_POLICY").as_deref() {
            Ok("shared") => self.model_policy = ModelPolicy::Shared,
            Ok("per_call") => self.model_policy = ModelPolicy::PerCall,
            Ok(other) => {
                return Err(SimilarityError::Config(format!(
                    "SIMCHECK_MODEL_POLICY: expected shared or per_call, got {other:?}"
                )))
            }
            Err(_) => {}
        }
        Ok(())
    }

    /// Reject combinations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(SimilarityError::Config(
                "cache_capacity must be positive when the cache is enabled".into(),
            ));
        }
        Regex::new(&self.vectorizer.token_pattern).map_err(|e| {
            SimilarityError::Config(format!("token_pattern: {e}"))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = EngineOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.cache_capacity, 1000);
        assert_eq!(options.model_policy, ModelPolicy::Shared);
        assert!(options.vectorizer.smooth_idf);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options = EngineOptions::from_json(r#"{"cache_capacity": 8, "model_policy": "per_call"}"#).unwrap();
        assert_eq!(options.cache_capacity, 8);
        assert_eq!(options.model_policy, ModelPolicy::PerCall);
        assert!(options.cache_enabled);
        assert_eq!(options.vectorizer.token_pattern, DEFAULT_TOKEN_PATTERN);
    }

    #[test]
    fn zero_capacity_rejected_only_when_cache_on() {
        let mut options = EngineOptions {
            cache_capacity: 0,
            ..EngineOptions::default()
        };
        assert!(matches!(options.validate(), Err(SimilarityError::Config(_))));
        options.cache_enabled = false;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn bad_pattern_rejected() {
        let mut options = EngineOptions::default();
        options.vectorizer.token_pattern = "(".into();
        assert!(matches!(options.validate(), Err(SimilarityError::Config(_))));
    }

    #[test]
    fn load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simcheck.json");
        fs::write(&path, r#"{"vectorizer": {"sublinear_tf": true}}"#).unwrap();
        let options = EngineOptions::from_file(&path).unwrap();
        assert!(options.vectorizer.sublinear_tf);
        assert!(options.vectorizer.lowercase);

        let missing = EngineOptions::load(Some(&dir.path().join("missing.json")));
        assert!(matches!(missing, Err(SimilarityError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            EngineOptions::from_json("{not json"),
            Err(SimilarityError::Config(_))
        ));
    }
}
