use crate::core::codec::Mode;
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkConfig {
    pub serde: Option<SerdeConfig>,
    pub export: Option<ExportConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerdeConfig {
    pub default_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl SdkConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SdkError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SdkError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLOW_EXPORT_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SdkError::Config {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(mode) = self.serde.as_ref().and_then(|s| s.default_mode.as_deref()) {
            mode.parse::<Mode>().map_err(|_| SdkError::InvalidConfigValue {
                field: "serde.default_mode".to_string(),
                value: mode.to_string(),
                reason: "Valid modes: json, yaml".to_string(),
            })?;
        }

        if let Some(dir) = self.export.as_ref().and_then(|e| e.directory.as_deref()) {
            validate_path("export.directory", dir)?;
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = logging.level.as_deref() {
                validate_choice("logging.level", level, &LOG_LEVELS)?;
            }
            if let Some(format) = logging.format.as_deref() {
                validate_choice("logging.format", format, &LOG_FORMATS)?;
            }
        }

        Ok(())
    }

    /// 預設序列化模式，未設定時為 json
    pub fn default_mode(&self) -> Result<Mode> {
        self.serde
            .as_ref()
            .and_then(|s| s.default_mode.as_deref())
            .map_or(Ok(Mode::Json), str::parse)
    }

    pub fn export_directory(&self) -> Option<PathBuf> {
        self.export
            .as_ref()
            .and_then(|e| e.directory.as_deref())
            .map(PathBuf::from)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref()?.level.as_deref()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f == "json")
    }
}

impl Validate for SdkConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SdkError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SdkError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

fn validate_choice(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(SdkError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}
