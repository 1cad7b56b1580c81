//! Bulk product import from CSV.
//!
//! # Usage
//!
//! ```bash
//! # Preview the request body
//! mb-cli import products.csv --dry-run
//!
//! # Upload to a running server as a vendor
//! mb-cli import products.csv --url http://127.0.0.1:3000 --token "$MARKETBOARD_TOKEN"
//! ```
//!
//! One product per line, no header:
//!
//! ```text
//! name,image,whatsapp,instagram,category1|category2
//! ```

use std::path::Path;

use marketboard_core::import::{BulkRow, ImportError, parse_csv};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors that can occur during an import.
#[derive(Debug, Error)]
pub enum ImportCommandError {
    /// The CSV file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be parsed.
    #[error("Invalid CSV: {0}")]
    Parse(#[from] ImportError),

    /// The file holds no rows.
    #[error("No products found in file")]
    Empty,

    /// `--url` or `--token` is missing for a real upload.
    #[error("Missing {0} (required unless --dry-run)")]
    MissingArg(&'static str),

    /// The request could not be sent.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the upload.
    #[error("Server returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for [`run`].
#[derive(Debug)]
pub struct ImportOptions<'a> {
    pub file: &'a Path,
    pub url: Option<&'a str>,
    pub token: Option<&'a str>,
    pub dry_run: bool,
}

/// Request body for `POST /products/bulk`.
#[must_use]
pub fn bulk_body(rows: &[BulkRow]) -> Value {
    json!({ "products": rows })
}

fn bulk_endpoint(base: &str) -> String {
    format!("{}/products/bulk", base.trim_end_matches('/'))
}

/// Read, parse and (unless dry-running) upload a CSV file.
///
/// Returns the text to print: the request body for a dry run, otherwise a
/// summary of what the server created.
///
/// # Errors
///
/// Returns `ImportCommandError` if reading, parsing or uploading fails.
pub async fn run(options: ImportOptions<'_>) -> Result<String, ImportCommandError> {
    let text = tokio::fs::read_to_string(options.file)
        .await
        .map_err(|source| ImportCommandError::Read {
            path: options.file.display().to_string(),
            source,
        })?;

    let rows = parse_csv(&text)?;
    if rows.is_empty() {
        return Err(ImportCommandError::Empty);
    }
    tracing::info!(rows = rows.len(), "Parsed CSV");

    let body = bulk_body(&rows);
    if options.dry_run {
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let url = options.url.ok_or(ImportCommandError::MissingArg("--url"))?;
    let token = options.token.ok_or(ImportCommandError::MissingArg("--token"))?;

    let endpoint = bulk_endpoint(url);
    tracing::info!(endpoint = %endpoint, "Uploading products");

    let response = reqwest::Client::new()
        .post(&endpoint)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    let payload: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_owned();
        return Err(ImportCommandError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let created = payload
        .get("products")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    Ok(format!("Created {created} products"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_bulk_endpoint_joins_cleanly() {
        assert_eq!(
            bulk_endpoint("http://localhost:3000/"),
            "http://localhost:3000/products/bulk"
        );
        assert_eq!(
            bulk_endpoint("http://localhost:3000"),
            "http://localhost:3000/products/bulk"
        );
    }

    #[tokio::test]
    async fn test_dry_run_prints_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Lamp,https://img.example/lamp.jpg,https://wa.me/123,,Home & Decor|Lighting"
        )
        .unwrap();
        writeln!(file, "Mug,https://img.example/mug.jpg").unwrap();

        let output = run(ImportOptions {
            file: file.path(),
            url: None,
            token: None,
            dry_run: true,
        })
        .await
        .unwrap();

        let body: Value = serde_json::from_str(&output).unwrap();
        let products = body["products"].as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(
            products[0]["categories"],
            json!(["Home & Decor", "Lighting"])
        );
        assert_eq!(products[0]["whatsappLink"], "https://wa.me/123");
        assert!(products[1].get("categories").is_none());
    }

    #[tokio::test]
    async fn test_upload_requires_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Mug,https://img.example/mug.jpg").unwrap();

        let err = run(ImportOptions {
            file: file.path(),
            url: None,
            token: Some("t"),
            dry_run: false,
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ImportCommandError::MissingArg("--url")));
    }

    #[tokio::test]
    async fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = run(ImportOptions {
            file: file.path(),
            url: None,
            token: None,
            dry_run: true,
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ImportCommandError::Empty));
    }
}
