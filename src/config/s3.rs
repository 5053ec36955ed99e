use crate::domain::ports::Storage;
use crate::utils::error::{DwhError, Result};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

/// 將輸出上傳到 `s3://bucket/prefix/`，讓排程器直接讀取
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    /// 空的 path 對應到 prefix 目錄本身 (`prefix/`)
    fn key(&self, path: &str) -> String {
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", prefix, path)
        }
    }
}

impl Storage for S3Storage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let key = self.key(path);
        tracing::debug!("Uploading {} bytes to s3://{}/{}", data.len(), self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| DwhError::StorageError {
                message: format!(
                    "put s3://{}/{} failed: {} ({})",
                    self.bucket,
                    key,
                    e.message().unwrap_or("unknown error"),
                    e.code().unwrap_or("no code")
                ),
            })?;

        Ok(())
    }

    fn location(&self, path: &str) -> String {
        format!("s3://{}/{}", self.bucket, self.key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Region};

    fn storage(prefix: &str) -> S3Storage {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-west-2"))
            .build();
        S3Storage::new(
            S3Client::from_conf(config),
            "dwh-artifacts".to_string(),
            prefix.to_string(),
        )
    }

    #[test]
    fn test_location_of_prefix_directory() {
        assert_eq!(storage("sparkify-dwh").location(""), "s3://dwh-artifacts/sparkify-dwh/");
        assert_eq!(storage("/sparkify-dwh/").location(""), "s3://dwh-artifacts/sparkify-dwh/");
        assert_eq!(storage("").location(""), "s3://dwh-artifacts/");
        assert_eq!(
            storage("sparkify-dwh").location("dwh_sql.zip"),
            "s3://dwh-artifacts/sparkify-dwh/dwh_sql.zip"
        );
    }
}
