use crate::core::Pipeline;
use crate::domain::model::Phase;
use crate::utils::error::Result;
use std::time::Instant;

pub struct RenderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RenderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting warehouse SQL rendering");

        // Extract
        tracing::info!("📥 Loading warehouse configuration...");
        let config = self.pipeline.extract().await?;
        tracing::info!("✅ Configuration loaded (region: {})", config.region());

        // Transform
        tracing::info!("🧱 Rendering statements...");
        let catalog = self.pipeline.transform(config).await?;
        for phase in Phase::ALL {
            tracing::info!("  {:<6} {} statements", phase.label(), catalog.phase(phase).len());
        }

        // Load
        tracing::info!("💾 Writing artifacts...");
        let output_path = self.pipeline.load(catalog).await?;
        tracing::info!("📁 Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::warehouse::{IamRoleConfig, S3Config, WarehouseConfig};
    use crate::sql::QueryCatalog;
    use crate::utils::error::DwhError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPipeline {
        loads: AtomicUsize,
        fail_extract: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self) -> Result<WarehouseConfig> {
            if self.fail_extract {
                return Err(DwhError::MissingConfigError {
                    field: "IAM_ROLE.ARN".to_string(),
                });
            }
            Ok(WarehouseConfig {
                s3: S3Config {
                    log_data: "s3://bucket/log_data".to_string(),
                    song_data: "s3://bucket/song_data".to_string(),
                    log_jsonpath: "auto".to_string(),
                    region: None,
                },
                iam_role: IamRoleConfig {
                    arn: "arn:aws:iam::123456789012:role/dwhRole".to_string(),
                },
            })
        }

        async fn transform(&self, config: WarehouseConfig) -> Result<QueryCatalog> {
            Ok(QueryCatalog::build(&config))
        }

        async fn load(&self, _catalog: QueryCatalog) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok("/tmp/sql".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_load_output() {
        let engine = RenderEngine::new(CountingPipeline {
            loads: AtomicUsize::new(0),
            fail_extract: false,
        });

        assert_eq!(engine.run().await.unwrap(), "/tmp/sql");
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_extract_error() {
        let engine = RenderEngine::new(CountingPipeline {
            loads: AtomicUsize::new(0),
            fail_extract: true,
        });

        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
