//! Warehouse statements: DDL, staging COPY and star-schema INSERT…SELECT.

pub mod catalog;
pub mod copy;
pub mod ddl;
pub mod insert;

pub use catalog::QueryCatalog;
pub use copy::copy_table_queries;
pub use ddl::{create_table_queries, drop_table_queries};
pub use insert::insert_table_queries;
