pub mod local;
#[cfg(feature = "s3")]
pub mod s3;
pub mod warehouse;

#[cfg(feature = "cli")]
use crate::config::warehouse::WarehouseConfig;
#[cfg(feature = "cli")]
use crate::domain::model::{OutputFormat, Stage};
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{DwhError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sparkify-dwh")]
#[command(about = "Render the Sparkify warehouse DDL, COPY and INSERT scripts")]
pub struct CliConfig {
    /// Warehouse config file (ini, or TOML when the extension is .toml)
    #[arg(short, long, default_value = "dwh.cfg")]
    pub config: String,

    #[arg(long, default_value = "./sql")]
    pub output_path: String,

    /// Phases to emit
    #[arg(long, value_enum, default_value_t = Stage::All)]
    pub stage: Stage,

    #[arg(long, value_enum, value_delimiter = ',', default_value = "sql")]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Bundle all artifacts into a single zip archive")]
    pub bundle: bool,

    #[arg(long, help = "Skip validation of S3 locations and the IAM role ARN")]
    pub skip_validation: bool,

    #[arg(long, help = "Print the rendered script to stdout instead of writing files")]
    pub print: bool,

    #[arg(long, help = "Show what would be rendered without writing anything")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Upload artifacts to this S3 bucket instead of the local output path
    #[cfg(feature = "s3")]
    #[arg(long)]
    pub s3_bucket: Option<String>,

    #[cfg(feature = "s3")]
    #[arg(long, default_value = "sparkify-dwh")]
    pub s3_prefix: String,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// `--print` / `--dry-run` 用：讀取並驗證 (除非 --skip-validation) 倉儲設定
    pub fn load_warehouse(&self) -> Result<WarehouseConfig> {
        let warehouse = WarehouseConfig::from_file(&self.config)?;

        if self.skip_validation {
            tracing::warn!("⚠️ Skipping warehouse config validation");
        } else {
            warehouse.validate()?;
        }

        Ok(warehouse)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn config_path(&self) -> &str {
        &self.config
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn bundle(&self) -> bool {
        self.bundle
    }

    fn skip_validation(&self) -> bool {
        self.skip_validation
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("config", &self.config)?;
        validation::validate_path("output_path", &self.output_path)?;

        if self.formats.is_empty() {
            return Err(DwhError::InvalidConfigValueError {
                field: "formats".to_string(),
                value: String::new(),
                reason: "At least one output format is required (sql, json, csv)".to_string(),
            });
        }

        if self.print && self.dry_run {
            return Err(DwhError::ConfigError {
                message: "--print and --dry-run cannot be combined".to_string(),
            });
        }

        #[cfg(feature = "s3")]
        if let Some(bucket) = &self.s3_bucket {
            validation::validate_non_empty_string("s3_bucket", bucket)?;
            validation::validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        }

        Ok(())
    }
}
