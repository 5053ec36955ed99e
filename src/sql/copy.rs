use crate::config::warehouse::WarehouseConfig;
use crate::domain::model::{Phase, Statement, Table};

pub const DEFAULT_REGION: &str = "us-west-2";

/// 以 SQL 字串常值輸出，單引號加倍
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn credentials(config: &WarehouseConfig) -> String {
    quote_literal(&format!("aws_iam_role={}", config.iam_role.arn))
}

/// 事件日誌：時間戳為 epoch 毫秒，欄位對應由 jsonpaths 檔案決定
pub fn staging_events_copy(config: &WarehouseConfig) -> String {
    format!(
        "COPY {table} FROM {source}
    CREDENTIALS {credentials}
    TIMEFORMAT AS 'epochmillisecs'
    BLANKSASNULL EMPTYASNULL
    COMPUPDATE OFF REGION {region}
    FORMAT AS JSON {jsonpaths};",
        table = Table::StagingEvents.name(),
        source = quote_literal(&config.s3.log_data),
        credentials = credentials(config),
        region = quote_literal(config.region()),
        jsonpaths = quote_literal(&config.s3.log_jsonpath),
    )
}

pub fn staging_songs_copy(config: &WarehouseConfig) -> String {
    format!(
        "COPY {table} FROM {source}
    CREDENTIALS {credentials}
    BLANKSASNULL EMPTYASNULL
    COMPUPDATE OFF REGION {region}
    FORMAT AS JSON 'auto';",
        table = Table::StagingSongs.name(),
        source = quote_literal(&config.s3.song_data),
        credentials = credentials(config),
        region = quote_literal(config.region()),
    )
}

pub fn copy_table_queries(config: &WarehouseConfig) -> Vec<Statement> {
    vec![
        Statement::new(
            "staging_events_copy",
            Phase::Copy,
            Table::StagingEvents,
            staging_events_copy(config),
        ),
        Statement::new(
            "staging_songs_copy",
            Phase::Copy,
            Table::StagingSongs,
            staging_songs_copy(config),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::warehouse::{IamRoleConfig, S3Config};

    fn config() -> WarehouseConfig {
        WarehouseConfig {
            s3: S3Config {
                log_data: "s3://udacity-dend/log_data".to_string(),
                song_data: "s3://udacity-dend/song_data".to_string(),
                log_jsonpath: "s3://udacity-dend/log_json_path.json".to_string(),
                region: None,
            },
            iam_role: IamRoleConfig {
                arn: "arn:aws:iam::123456789012:role/dwhRole".to_string(),
            },
        }
    }

    #[test]
    fn test_staging_events_copy() {
        let sql = staging_events_copy(&config());

        assert!(sql.starts_with("COPY staging_events FROM 's3://udacity-dend/log_data'"));
        assert!(sql.contains("CREDENTIALS 'aws_iam_role=arn:aws:iam::123456789012:role/dwhRole'"));
        assert!(sql.contains("TIMEFORMAT AS 'epochmillisecs'"));
        assert!(sql.contains("BLANKSASNULL EMPTYASNULL"));
        assert!(sql.contains("COMPUPDATE OFF REGION 'us-west-2'"));
        assert!(sql.ends_with("FORMAT AS JSON 's3://udacity-dend/log_json_path.json';"));
    }

    #[test]
    fn test_staging_songs_copy() {
        let sql = staging_songs_copy(&config());

        assert!(sql.starts_with("COPY staging_songs FROM 's3://udacity-dend/song_data'"));
        assert!(sql.contains("aws_iam_role=arn:aws:iam::123456789012:role/dwhRole"));
        assert!(!sql.contains("TIMEFORMAT"));
        assert!(!sql.contains("log_json_path"));
        assert!(sql.ends_with("FORMAT AS JSON 'auto';"));
    }

    #[test]
    fn test_region_override() {
        let mut config = config();
        config.s3.region = Some("eu-west-1".to_string());
        assert!(staging_songs_copy(&config).contains("REGION 'eu-west-1'"));
    }

    #[test]
    fn test_quote_literal_doubles_single_quotes() {
        assert_eq!(quote_literal("s3://bucket/o'brien"), "'s3://bucket/o''brien'");

        let mut config = config();
        config.s3.song_data = "s3://bucket/it's".to_string();
        assert!(staging_songs_copy(&config).contains("FROM 's3://bucket/it''s'"));
    }
}
