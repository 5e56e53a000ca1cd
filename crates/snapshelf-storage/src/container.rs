//! Container-level Blob REST calls
//!
//! `object_store` only works inside an existing container and cannot cap a
//! listing below one service page, so two operations go through the Blob REST
//! API directly:
//! - "Create Container": `PUT {account_url}/{container}?restype=container`
//! - "List Blobs" capped at one result:
//!   `GET {account_url}/{container}?comp=list&maxresults=1&restype=container`

use crate::credentials::{AzureAuth, AzureCredentials};
use crate::traits::{StorageError, StorageResult};
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use sha2::Sha256;
use snapshelf_core::models::ObjectEntry;
use std::time::Duration;

const API_VERSION: &str = "2021-08-06";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CREATE_PARAMS: &[(&str, &str)] = &[("restype", "container")];
const LIST_ONE_PARAMS: &[(&str, &str)] = &[
    ("comp", "list"),
    ("maxresults", "1"),
    ("restype", "container"),
];

/// What `ensure` found or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    AlreadyExists,
    /// Anonymous access cannot create containers
    Skipped,
}

/// Signed REST access to the bound container.
#[derive(Debug, Clone)]
pub struct ContainerClient {
    client: reqwest::Client,
    credentials: AzureCredentials,
    container: String,
}

impl ContainerClient {
    pub fn new(credentials: AzureCredentials, container: impl Into<String>) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            container: container.into(),
        })
    }

    /// Create the container if needed. `201 Created` and `409 Conflict` both
    /// mean the container is usable afterwards.
    pub async fn ensure(&self) -> StorageResult<ContainerStatus> {
        if self.credentials.auth == AzureAuth::Anonymous {
            tracing::debug!(
                container = %self.container,
                "Anonymous credentials; skipping container creation"
            );
            return Ok(ContainerStatus::Skipped);
        }

        let request = self
            .request(Method::PUT, CREATE_PARAMS)?
            .header(reqwest::header::CONTENT_LENGTH, 0);
        let response = self
            .send(request, "Create container")
            .await
            .map_err(StorageError::ContainerFailed)?;

        match response.status() {
            StatusCode::CREATED => {
                tracing::info!(container = %self.container, "Container created");
                Ok(ContainerStatus::Created)
            }
            StatusCode::CONFLICT => {
                tracing::debug!(container = %self.container, "Container already exists");
                Ok(ContainerStatus::AlreadyExists)
            }
            _ => Err(StorageError::ContainerFailed(
                rejection(response, &self.container, "Create container").await,
            )),
        }
    }

    /// One listing entry at most, fetched with `maxresults=1`.
    pub async fn first_blob(&self) -> StorageResult<Option<ObjectEntry>> {
        let request = self.request(Method::GET, LIST_ONE_PARAMS)?;
        let response = self
            .send(request, "List blobs")
            .await
            .map_err(StorageError::ListFailed)?;

        if response.status() != StatusCode::OK {
            return Err(StorageError::ListFailed(
                rejection(response, &self.container, "List blobs").await,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?;
        Ok(parse_first_blob(&body))
    }

    fn request(&self, method: Method, params: &[(&str, &str)]) -> StorageResult<RequestBuilder> {
        let container_url = self.credentials.container_url(&self.container);
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let builder = match &self.credentials.auth {
            AzureAuth::Anonymous => self
                .client
                .request(method, format!("{}?{}", container_url, query)),
            AzureAuth::Sas(token) => self
                .client
                .request(method, format!("{}?{}&{}", container_url, query, token)),
            AzureAuth::AccessKey(key) => {
                let date = http_date(Utc::now());
                let string_to_sign = string_to_sign(
                    method.as_str(),
                    &self.credentials.account,
                    &container_path(&container_url)?,
                    &date,
                    params,
                );
                let authorization =
                    shared_key_authorization(&self.credentials.account, key, &string_to_sign)?;
                self.client
                    .request(method, format!("{}?{}", container_url, query))
                    .header("x-ms-date", date)
                    .header("Authorization", authorization)
            }
        };

        Ok(builder.header("x-ms-version", API_VERSION))
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, String> {
        let start = std::time::Instant::now();
        request.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                container = %self.container,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "{} request failed",
                operation
            );
            e.to_string()
        })
    }
}

/// `{status}: {x-ms-error-code or body}` for a non-success response.
async fn rejection(response: Response, container: &str, operation: &str) -> String {
    let status = response.status();
    let code = response
        .headers()
        .get("x-ms-error-code")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    let detail = code.unwrap_or(body);
    tracing::error!(
        container = %container,
        status = %status,
        error = %detail,
        "{} rejected",
        operation
    );
    format!("{}: {}", status, detail)
}

/// RFC 1123 date as required by `x-ms-date`.
fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn container_path(container_url: &str) -> StorageResult<String> {
    reqwest::Url::parse(container_url)
        .map(|url| url.path().to_string())
        .map_err(|e| StorageError::ConfigError(format!("Invalid container URL: {}", e)))
}

/// `SharedKey {account}:{signature}` over a prepared string-to-sign.
fn shared_key_authorization(account: &str, key: &str, string_to_sign: &str) -> StorageResult<String> {
    let key_bytes = base64::engine::general_purpose::STANDARD
        .decode(key)
        .map_err(|_| StorageError::ConfigError("AccountKey is not valid base64".to_string()))?;

    let mut mac = Hmac::<Sha256>::new_from_slice(&key_bytes)
        .map_err(|e| StorageError::ConfigError(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature =
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!("SharedKey {}:{}", account, signature))
}

/// String-to-sign for a bodiless request carrying only `x-ms-*` headers.
fn string_to_sign(
    verb: &str,
    account: &str,
    url_path: &str,
    date: &str,
    params: &[(&str, &str)],
) -> String {
    // VERB, then the eleven standard headers, all empty for these requests
    let mut s = format!("{}\n", verb);
    s.push_str(&"\n".repeat(11));
    s.push_str(&format!("x-ms-date:{}\nx-ms-version:{}\n", date, API_VERSION));
    s.push_str(&format!("/{}{}", account, url_path));

    let mut sorted: Vec<(String, &str)> = params
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), *v))
        .collect();
    sorted.sort();
    for (k, v) in sorted {
        s.push_str(&format!("\n{}:{}", k, v));
    }
    s
}

/// First `<Blob>` of a List Blobs `EnumerationResults` document.
fn parse_first_blob(xml: &str) -> Option<ObjectEntry> {
    let blob = element(xml, "Blob")?;
    let name = unescape(element(blob, "Name")?);
    let size_bytes = element(blob, "Content-Length")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let last_modified = element(blob, "Last-Modified")
        .and_then(|s| DateTime::parse_from_rfc2822(s.trim()).ok())
        .map(|d| d.with_timezone(&Utc));

    Some(ObjectEntry {
        last_modified,
        ..ObjectEntry::new(name, size_bytes)
    })
}

fn element<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = xml.find(&open)? + open.len();
    let len = xml[start..].find(&close)?;
    Some(&xml[start..start + len])
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
