use crate::sql::copy::DEFAULT_REGION;
use crate::utils::error::{DwhError, Result};
use crate::utils::validation::{self, Validate};
use ini::{Ini, ParseOption};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// section -> key -> value，section 與 key 一律轉成大寫
type Sections = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Toml,
}

impl ConfigFormat {
    /// 只有 `.toml` 以 TOML 解析，其餘（例如 `dwh.cfg`）視為 ini
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Ini,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub log_data: String,
    pub song_data: String,
    pub log_jsonpath: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamRoleConfig {
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub s3: S3Config,
    pub iam_role: IamRoleConfig,
}

impl WarehouseConfig {
    /// 從檔案載入，依副檔名決定格式
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DwhError::IoError)?;
        Self::parse(&content, ConfigFormat::from_path(&path))
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Ini => Self::from_ini_str(content),
            ConfigFormat::Toml => Self::from_toml_str(content),
        }
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        // 不讓 rust-ini 解析引號與跳脫字元，引號只由 unquote 去掉一層
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&processed_content, options).map_err(|e| {
            DwhError::ConfigValidationError {
                field: "ini_parsing".to_string(),
                message: format!("INI parsing error: {}", e),
            }
        })?;

        let mut sections = Sections::new();
        for (section, properties) in ini.iter() {
            // 沒有 section 標頭的鍵不屬於任何設定區塊
            let Some(section) = section else {
                continue;
            };
            let entry = sections.entry(section.trim().to_ascii_uppercase()).or_default();
            for (key, value) in properties.iter() {
                entry.insert(key.trim().to_ascii_uppercase(), unquote(value.trim()).to_string());
            }
        }

        Self::from_sections(&sections)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let table: toml::Table =
            toml::from_str(&processed_content).map_err(|e| DwhError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        let mut sections = Sections::new();
        for (section, value) in table {
            let toml::Value::Table(properties) = value else {
                continue;
            };
            let entry = sections.entry(section.to_ascii_uppercase()).or_default();
            for (key, value) in properties {
                let value = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(_)
                    | toml::Value::Float(_)
                    | toml::Value::Boolean(_)
                    | toml::Value::Datetime(_) => value.to_string(),
                    toml::Value::Array(_) | toml::Value::Table(_) => continue,
                };
                entry.insert(key.to_ascii_uppercase(), value);
            }
        }

        Self::from_sections(&sections)
    }

    /// 替換環境變數 (例如 ${DWH_ROLE_ARN})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DwhError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn from_sections(sections: &Sections) -> Result<Self> {
        let required = |section: &str, key: &str| -> Result<String> {
            sections
                .get(section)
                .and_then(|props| props.get(key))
                .cloned()
                .ok_or_else(|| DwhError::MissingConfigError {
                    field: format!("{}.{}", section, key),
                })
        };

        let region = sections
            .get("S3")
            .and_then(|props| props.get("REGION"))
            .filter(|region| !region.trim().is_empty())
            .cloned();

        Ok(Self {
            s3: S3Config {
                log_data: required("S3", "LOG_DATA")?,
                song_data: required("S3", "SONG_DATA")?,
                log_jsonpath: required("S3", "LOG_JSONPATH")?,
                region,
            },
            iam_role: IamRoleConfig {
                arn: required("IAM_ROLE", "ARN")?,
            },
        })
    }

    /// COPY 使用的區域，未設定時為 us-west-2
    pub fn region(&self) -> &str {
        self.s3.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

/// 只去掉一層成對的 '…' 或 "…"，反斜線原樣保留
fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl Validate for WarehouseConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_s3_uri("S3.LOG_DATA", &self.s3.log_data)?;
        validation::validate_s3_uri("S3.SONG_DATA", &self.s3.song_data)?;
        validation::validate_jsonpaths("S3.LOG_JSONPATH", &self.s3.log_jsonpath)?;
        validation::validate_iam_role_arn("IAM_ROLE.ARN", &self.iam_role.arn)?;

        if let Some(region) = &self.s3.region {
            validation::validate_aws_region("S3.REGION", region)?;
        }

        tracing::debug!("✅ Warehouse configuration validation passed");
        Ok(())
    }
}
