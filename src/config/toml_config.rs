use crate::core::OfferLetterTemplate;
use crate::domain::model::{default_record, validate_record, OfferLetterRecord, PartialOfferLetter};
use crate::utils::error::{OfferLetterError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub template: TemplateSection,
    pub defaults: Option<PartialOfferLetter>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,
    pub description: Option<String>,
    pub document_type: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TemplateConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded template config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，${VAR} 取自環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// 從 TOML 字串解析配置，${VAR} 由 `lookup` 提供
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_vars(content, lookup)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換變數 (例如 ${SIGNATORY_NAME})；查無變數時保留原文
    fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OfferLetterError::ConfigError {
            field: "environment".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The `[defaults]` table plus the `[template]` overrides, as one partial record.
    pub fn overrides(&self) -> PartialOfferLetter {
        let mut partial = self.defaults.clone().unwrap_or_default();
        if let Some(document_type) = &self.template.document_type {
            partial.document_type = Some(document_type.clone());
        }
        if let Some(version) = &self.template.version {
            partial.version = Some(version.clone());
        }
        partial
    }

    /// The built-in defaults with this configuration laid over them.
    pub fn defaults_record(&self) -> OfferLetterRecord {
        default_record().merged_with(&self.overrides())
    }

    pub fn into_template(self) -> OfferLetterTemplate {
        OfferLetterTemplate::with_defaults(self.defaults_record())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("template.name", &self.template.name)?;

        if let Some(document_type) = &self.template.document_type {
            validate_non_empty_string("template.document_type", document_type)?;
        }
        if let Some(version) = &self.template.version {
            validate_non_empty_string("template.version", version)?;
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(OfferLetterError::InvalidValue {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        // 預設值本身必須能通過必填欄位檢查
        validate_record(&self.defaults_record()).map_err(|e| OfferLetterError::ConfigError {
            field: "defaults".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }
}

impl Validate for TemplateConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
