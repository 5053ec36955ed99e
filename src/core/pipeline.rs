use crate::config::warehouse::{ConfigFormat, WarehouseConfig};
use crate::core::artifacts::{self, Artifact};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::OutputFormat;
use crate::sql::QueryCatalog;
use crate::utils::error::{DwhError, Result};
use crate::utils::validation::Validate;

/// 讀設定 → 產生語句 → 寫出腳本
pub struct ScriptPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ScriptPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render_artifacts(&self, catalog: &QueryCatalog) -> Result<Vec<Artifact>> {
        let stage = self.config.stage();
        let mut seen: Vec<OutputFormat> = Vec::new();
        let mut rendered = Vec::new();

        for format in self.config.output_formats() {
            // 重複指定的格式只輸出一次
            if seen.contains(format) {
                continue;
            }
            seen.push(*format);

            match format {
                OutputFormat::Sql => rendered.extend(artifacts::phase_scripts(catalog, stage)),
                OutputFormat::Json => rendered.push(artifacts::manifest(catalog, stage)?),
                OutputFormat::Csv => rendered.push(artifacts::index(catalog, stage)?),
            }
        }

        if rendered.is_empty() {
            return Err(DwhError::ProcessingError {
                message: "no output formats selected".to_string(),
            });
        }

        Ok(rendered)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScriptPipeline<S, C> {
    async fn extract(&self) -> Result<WarehouseConfig> {
        let path = self.config.config_path();
        tracing::debug!("Reading warehouse config from: {}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let warehouse = WarehouseConfig::parse(&content, ConfigFormat::from_path(path))?;

        if self.config.skip_validation() {
            tracing::warn!("⚠️ Skipping warehouse config validation");
        } else {
            warehouse.validate()?;
        }

        Ok(warehouse)
    }

    async fn transform(&self, config: WarehouseConfig) -> Result<QueryCatalog> {
        let catalog = QueryCatalog::build(&config);
        tracing::debug!(
            "Rendered {} statements for stage {:?}",
            catalog.len(self.config.stage()),
            self.config.stage()
        );
        Ok(catalog)
    }

    async fn load(&self, catalog: QueryCatalog) -> Result<String> {
        let rendered = self.render_artifacts(&catalog)?;

        if self.config.bundle() {
            tracing::debug!("Creating ZIP bundle with {} files", rendered.len());
            let bundle = artifacts::bundle(&rendered)?;
            self.storage.write_file(&bundle.name, &bundle.data).await?;
            return Ok(self.storage.location(&bundle.name));
        }

        for artifact in &rendered {
            tracing::debug!("Writing {} ({} bytes)", artifact.name, artifact.data.len());
            self.storage.write_file(&artifact.name, &artifact.data).await?;
        }

        Ok(self.storage.location(""))
    }
}
