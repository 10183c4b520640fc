use crate::utils::errors::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "i18n.config.json";
pub const DEFAULT_BASE_URL: &str = "https://open.feishu.cn/open-apis";
pub const DEFAULT_KEY_FIELD: &str = "key";
pub const DEFAULT_MAX_PAGES: usize = 10_000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Contents of `i18n.config.json`. Field names follow the file format, which
/// predates this tool, hence the mixed casing.
#[derive(Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    pub app_id: String,
    pub app_secret: String,
    /// Identifier of the bitable app (the table container).
    pub app_token: String,
    pub table_id: String,
    pub langues: Vec<String>,
    #[serde(rename = "outputDir")]
    pub output_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(
        rename = "fieldFileNameMap",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_file_name_map: Option<HashMap<String, String>>,
    #[serde(rename = "baseUrl", default = "default_base_url")]
    pub base_url: String,
    #[serde(rename = "keyField", default = "default_key_field")]
    pub key_field: String,
    #[serde(rename = "maxPages", default = "default_max_pages")]
    pub max_pages: usize,
    #[serde(rename = "timeoutSeconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl fmt::Debug for I18nConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("app_token", &self.app_token)
            .field("table_id", &self.table_id)
            .field("langues", &self.langues)
            .field("output_dir", &self.output_dir)
            .field("suffix", &self.suffix)
            .field("field_file_name_map", &self.field_file_name_map)
            .field("base_url", &self.base_url)
            .field("key_field", &self.key_field)
            .field("max_pages", &self.max_pages)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl I18nConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            I18nError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| I18nError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| I18nError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("app_id", self.app_id.as_str()),
            ("app_secret", self.app_secret.as_str()),
            ("app_token", self.app_token.as_str()),
            ("table_id", self.table_id.as_str()),
            ("keyField", self.key_field.as_str()),
            ("baseUrl", self.base_url.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(I18nError::ConfigError(format!("`{}` must not be empty", name)));
            }
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(I18nError::ConfigError("`outputDir` must not be empty".to_string()));
        }

        if self.max_pages == 0 {
            return Err(I18nError::ConfigError("`maxPages` must be at least 1".to_string()));
        }

        for lang in &self.langues {
            if lang.trim().is_empty() {
                return Err(I18nError::ConfigError(
                    "`langues` must not contain empty language codes".to_string(),
                ));
            }
            if *lang == self.key_field {
                return Err(I18nError::ConfigError(format!(
                    "language `{}` collides with the key column",
                    lang
                )));
            }
        }

        Ok(())
    }

    /// Configured languages in order, first occurrence wins on duplicates.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::with_capacity(self.langues.len());
        for lang in &self.langues {
            if !languages.contains(lang) {
                languages.push(lang.clone());
            }
        }
        languages
    }
}
