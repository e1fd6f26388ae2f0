use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{VibeError, VibeResult};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "vibe-test.yml";

/// Target used when neither the command line nor the config names one.
pub const DEFAULT_URL: &str = "http://localhost:5173";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct VibeConfig {
    /// Default URL to test; the positional argument overrides it.
    pub url: Option<String>,
    pub exclude: ExcludeConfig,
    pub thresholds: ThresholdsConfig,
    pub paths: PathsConfig,
    pub load_test: LoadTestConfig,
    pub lighthouse: LighthouseConfig,
    pub pa11y: Pa11yConfig,
}

impl VibeConfig {
    /// Resolve the target: explicit argument, then config `url`, then [`DEFAULT_URL`].
    pub fn resolve_target(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| DEFAULT_URL.to_string())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ExcludeConfig {
    /// Domains skipped by the link checker
    pub links: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            links: vec![
                "linkedin.com".to_string(),
                "twitter.com".to_string(),
                "facebook.com".to_string(),
            ],
        }
    }
}

/// Quality thresholds. Parsed so config files validate; the runner itself
/// does not enforce them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ThresholdsConfig {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub max_image_size: String,
    pub max_total_images: String,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            performance: 90,
            accessibility: 100,
            best_practices: 90,
            seo: 90,
            max_image_size: "500KB".to_string(),
            max_total_images: "5MB".to_string(),
        }
    }
}

/// Project paths, relative to the directory the runner is started from
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PathsConfig {
    pub images: String,
    pub css: String,
    pub dist: String,
    pub public: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: "public/images".to_string(),
            css: "src/style.css".to_string(),
            dist: "dist".to_string(),
            public: "public".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoadTestConfig {
    pub requests: u32,
    pub concurrency: u32,
    /// Per-request timeout in seconds, passed to `ab -s` when set
    pub timeout: Option<u32>,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            requests: 1000,
            concurrency: 10,
            timeout: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LighthouseConfig {
    pub chrome_flags: Vec<String>,
    pub only_categories: Vec<String>,
}

impl Default for LighthouseConfig {
    fn default() -> Self {
        Self {
            chrome_flags: vec!["--headless".to_string()],
            only_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Pa11yConfig {
    pub standard: Option<String>,
    pub level: Option<String>,
    pub ignore: Vec<String>,
}

pub fn parse_vibe_config(yaml_str: &str) -> VibeResult<VibeConfig> {
    // An empty file deserializes to unit, not to a mapping
    if yaml_str.trim().is_empty() {
        return Ok(VibeConfig::default());
    }
    let config: VibeConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is read
/// from `search_dir` if present, and defaults are used otherwise.
pub fn load_vibe_config(explicit: Option<&Path>, search_dir: &Path) -> VibeResult<VibeConfig> {
    let path: PathBuf = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(VibeError::Config(format!(
                    "Config file {} not found",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => {
            let candidate = search_dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(VibeConfig::default());
            }
            candidate
        }
    };

    tracing::debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| {
        VibeError::Config(format!("Failed to read config {}: {}", path.display(), e))
    })?;

    parse_vibe_config(&content).map_err(|e| {
        VibeError::Config(format!("Failed to parse config {}: {}", path.display(), e))
    })
}
