pub mod config;
pub mod core;
pub mod domain;
pub mod sql;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "s3")]
pub use config::s3::S3Storage;

pub use config::local::LocalStorage;
pub use config::warehouse::WarehouseConfig;
pub use core::{engine::RenderEngine, pipeline::ScriptPipeline};
pub use domain::model::{OutputFormat, Phase, Stage, Statement, Table};
pub use sql::{
    copy_table_queries, create_table_queries, drop_table_queries, insert_table_queries,
    QueryCatalog,
};
pub use utils::error::{DwhError, Result};
