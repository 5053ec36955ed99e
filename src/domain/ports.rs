use crate::config::warehouse::WarehouseConfig;
use crate::domain::model::{OutputFormat, Stage};
use crate::sql::QueryCatalog;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// 用於回報輸出位置，空字串代表輸出目錄本身
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn config_path(&self) -> &str;
    fn stage(&self) -> Stage;
    fn output_formats(&self) -> &[OutputFormat];
    fn bundle(&self) -> bool;
    fn skip_validation(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<WarehouseConfig>;
    async fn transform(&self, config: WarehouseConfig) -> Result<QueryCatalog>;
    async fn load(&self, catalog: QueryCatalog) -> Result<String>;
}
