use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_path.clone();
        }
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("scripts/01_drop_tables.sql", b"DROP TABLE IF EXISTS users;").await.unwrap();

        let written = std::fs::read_to_string(base.join("scripts/01_drop_tables.sql")).unwrap();
        assert_eq!(written, "DROP TABLE IF EXISTS users;");
        assert!(storage.location("catalog.json").ends_with("catalog.json"));
    }

    #[test]
    fn test_location_of_output_directory_is_base_path() {
        let storage = LocalStorage::new("./sql".to_string());
        assert_eq!(storage.location(""), "./sql");
        assert_eq!(
            storage.location("dwh_sql.zip"),
            Path::new("./sql").join("dwh_sql.zip").display().to_string()
        );
    }
}
