use crate::utils::error::{DwhError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> DwhError {
    DwhError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| DwhError::ProcessingError {
        message: format!("invalid validation pattern: {}", e),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// `s3://bucket/key` 形式，bucket 不可為空
pub fn validate_s3_uri(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let url = Url::parse(value)
        .map_err(|e| invalid(field_name, value, format!("Invalid S3 URI: {}", e)))?;

    if url.scheme() != "s3" {
        return Err(invalid(
            field_name,
            value,
            format!("Unsupported URI scheme: {} (expected s3)", url.scheme()),
        ));
    }

    match url.host_str() {
        Some(bucket) if !bucket.is_empty() => Ok(()),
        _ => Err(invalid(field_name, value, "S3 URI has no bucket")),
    }
}

/// COPY 的 JSON 格式參數：`auto` 或 jsonpaths 檔案的 S3 位置
pub fn validate_jsonpaths(field_name: &str, value: &str) -> Result<()> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(());
    }
    validate_s3_uri(field_name, value)
}

pub fn validate_iam_role_arn(field_name: &str, value: &str) -> Result<()> {
    let re = compile(r"^arn:aws(-[a-z]+)*:iam::\d{12}:role/[\w+=,.@/-]+$")?;
    if !re.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Expected an IAM role ARN like arn:aws:iam::123456789012:role/dwhRole",
        ));
    }
    Ok(())
}

pub fn validate_aws_region(field_name: &str, value: &str) -> Result<()> {
    let re = compile(r"^[a-z]{2}(-gov)?-[a-z]+-\d+$")?;
    if !re.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Expected an AWS region like us-west-2",
        ));
    }
    Ok(())
}
