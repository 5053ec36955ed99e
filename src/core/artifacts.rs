use crate::domain::model::{Phase, Stage, Statement, Table};
use crate::sql::QueryCatalog;
use crate::utils::error::{DwhError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const MANIFEST_FILE: &str = "catalog.json";
pub const INDEX_FILE: &str = "catalog.csv";
pub const BUNDLE_FILE: &str = "dwh_sql.zip";

/// 要寫出的單一檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub data: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[derive(Serialize)]
struct CatalogManifest<'a> {
    generated_at: DateTime<Utc>,
    stage: Stage,
    statement_count: usize,
    statements: Vec<&'a Statement>,
}

#[derive(Serialize)]
struct IndexRow<'a> {
    phase: Phase,
    position: usize,
    name: &'a str,
    table: Table,
}

pub fn phase_scripts(catalog: &QueryCatalog, stage: Stage) -> Vec<Artifact> {
    stage
        .phases()
        .iter()
        .map(|phase| {
            Artifact::new(
                phase.script_file_name(),
                catalog.phase_script(*phase).into_bytes(),
            )
        })
        .collect()
}

pub fn manifest(catalog: &QueryCatalog, stage: Stage) -> Result<Artifact> {
    let manifest = CatalogManifest {
        generated_at: Utc::now(),
        stage,
        statement_count: catalog.len(stage),
        statements: catalog.statements(stage).collect(),
    };
    let json = serde_json::to_vec_pretty(&manifest)?;
    Ok(Artifact::new(MANIFEST_FILE, json))
}

/// 每個語句一列：phase、在該階段內的位置（從 1 起算）、名稱、資料表
pub fn index(catalog: &QueryCatalog, stage: Stage) -> Result<Artifact> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for phase in stage.phases() {
        for (i, statement) in catalog.phase(*phase).iter().enumerate() {
            writer.serialize(IndexRow {
                phase: *phase,
                position: i + 1,
                name: &statement.name,
                table: statement.table,
            })?;
        }
    }

    let data = writer.into_inner().map_err(|e| DwhError::ProcessingError {
        message: format!("failed to flush CSV index: {}", e),
    })?;
    Ok(Artifact::new(INDEX_FILE, data))
}

pub fn bundle(artifacts: &[Artifact]) -> Result<Artifact> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for artifact in artifacts {
        zip.start_file(artifact.name.as_str(), SimpleFileOptions::default())?;
        zip.write_all(&artifact.data)?;
    }

    // 完成並取回底層 Vec<u8>
    let cursor = zip.finish()?;
    Ok(Artifact::new(BUNDLE_FILE, cursor.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::warehouse::{IamRoleConfig, S3Config, WarehouseConfig};
    use std::io::Read;

    fn catalog() -> QueryCatalog {
        QueryCatalog::build(&WarehouseConfig {
            s3: S3Config {
                log_data: "s3://bucket/log_data".to_string(),
                song_data: "s3://bucket/song_data".to_string(),
                log_jsonpath: "s3://bucket/log_json_path.json".to_string(),
                region: None,
            },
            iam_role: IamRoleConfig {
                arn: "arn:aws:iam::123456789012:role/dwhRole".to_string(),
            },
        })
    }

    #[test]
    fn test_phase_scripts_for_reset() {
        let scripts = phase_scripts(&catalog(), Stage::Reset);
        let names: Vec<&str> = scripts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["01_drop_tables.sql", "02_create_tables.sql"]);
    }

    #[test]
    fn test_manifest_lists_statements_in_order() {
        let artifact = manifest(&catalog(), Stage::Load).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&artifact.data).unwrap();

        assert_eq!(json["stage"], "load");
        assert_eq!(json["statement_count"], 7);
        let statements = json["statements"].as_array().unwrap();
        assert_eq!(statements[0]["name"], "staging_events_copy");
        assert_eq!(statements[0]["phase"], "copy");
        assert_eq!(statements[0]["table"], "staging_events");
        assert_eq!(statements[6]["name"], "time_table_insert");
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_index_rows() {
        let artifact = index(&catalog(), Stage::All).unwrap();
        let content = String::from_utf8(artifact.data).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 22); // header + 21 statements
        assert_eq!(lines[0], "phase,position,name,table");
        assert_eq!(lines[1], "drop,1,staging_events_table_drop,staging_events");
        assert_eq!(lines[21], "insert,5,time_table_insert,time");
    }

    #[test]
    fn test_bundle_contains_every_artifact() {
        let artifacts = phase_scripts(&catalog(), Stage::All);
        let bundle = bundle(&artifacts).unwrap();
        assert_eq!(bundle.name, BUNDLE_FILE);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bundle.data)).unwrap();
        assert_eq!(archive.len(), 4);

        let mut content = String::new();
        archive
            .by_name("03_copy_staging_tables.sql")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.contains("COPY staging_songs FROM 's3://bucket/song_data'"));
    }
}
