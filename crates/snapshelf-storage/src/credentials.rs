//! Azure credential resolution
//!
//! Turns the configured [`CredentialSource`] into an account name, an account
//! endpoint and one authentication mode. Connection strings use the standard
//! `Key=Value;Key=Value` layout; keys are matched case-insensitively.

use crate::traits::{StorageError, StorageResult};
use percent_encoding::percent_decode_str;
use snapshelf_core::CredentialSource;
use std::fmt;
use std::net::IpAddr;

/// Account used by Azurite and the legacy storage emulator.
pub const EMULATOR_ACCOUNT: &str = "devstoreaccount1";
/// Well-known, publicly documented emulator key.
pub const EMULATOR_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const EMULATOR_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// How requests to the account are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum AzureAuth {
    /// Base64 account key, used for SharedKey signing
    AccessKey(String),
    /// SAS token query string, without the leading `?`
    Sas(String),
    /// Unsigned requests against publicly readable containers
    Anonymous,
}

impl fmt::Debug for AzureAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AzureAuth::AccessKey(_) => f.write_str("AccessKey(<redacted>)"),
            AzureAuth::Sas(_) => f.write_str("Sas(<redacted>)"),
            AzureAuth::Anonymous => f.write_str("Anonymous"),
        }
    }
}

impl AzureAuth {
    /// SAS token split into decoded query pairs.
    pub fn sas_pairs(token: &str) -> Vec<(String, String)> {
        token
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect()
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// Resolved account details for one storage account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureCredentials {
    pub account: String,
    /// Blob service endpoint, without a trailing slash
    pub account_url: String,
    pub auth: AzureAuth,
    /// Talking to a local Azurite instance
    pub emulator: bool,
}

impl AzureCredentials {
    pub fn from_source(source: &CredentialSource) -> StorageResult<Self> {
        match source {
            CredentialSource::ConnectionString(conn) => Self::from_connection_string(conn),
            CredentialSource::AccountUrl { url, sas_token } => {
                Self::from_account_url(url, sas_token.as_deref())
            }
        }
    }

    pub fn from_connection_string(conn: &str) -> StorageResult<Self> {
        let mut account = None;
        let mut key = None;
        let mut blob_endpoint = None;
        let mut protocol = None;
        let mut suffix = None;
        let mut sas = None;
        let mut dev_storage = false;

        for part in conn.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = part.split_once('=').ok_or_else(|| {
                StorageError::ConfigError(
                    "Malformed connection string: expected Key=Value segments".to_string(),
                )
            })?;
            let value = value.trim().to_string();

            match name.trim().to_ascii_lowercase().as_str() {
                "accountname" => account = Some(value),
                "accountkey" => key = Some(value),
                "blobendpoint" => blob_endpoint = Some(value),
                "defaultendpointsprotocol" => protocol = Some(value),
                "endpointsuffix" => suffix = Some(value),
                "sharedaccesssignature" => sas = Some(value),
                "usedevelopmentstorage" => dev_storage = value.eq_ignore_ascii_case("true"),
                // Queue/Table/File endpoints and unknown keys are irrelevant here
                _ => {}
            }
        }

        if dev_storage {
            return Ok(Self {
                account: EMULATOR_ACCOUNT.to_string(),
                account_url: EMULATOR_BLOB_ENDPOINT.to_string(),
                auth: AzureAuth::AccessKey(EMULATOR_ACCOUNT_KEY.to_string()),
                emulator: true,
            });
        }

        let auth = match (key, sas) {
            (Some(key), _) => AzureAuth::AccessKey(key),
            (None, Some(sas)) => AzureAuth::Sas(sas.trim_start_matches('?').to_string()),
            (None, None) => AzureAuth::Anonymous,
        };

        let (account, account_url) = match (account, blob_endpoint) {
            (Some(account), Some(endpoint)) => {
                (account, endpoint.trim_end_matches('/').to_string())
            }
            (Some(account), None) => {
                let url = format!(
                    "{}://{}.blob.{}",
                    protocol.as_deref().unwrap_or("https"),
                    account,
                    suffix.as_deref().unwrap_or("core.windows.net")
                );
                (account, url)
            }
            (None, Some(endpoint)) => {
                let endpoint = endpoint.trim_end_matches('/').to_string();
                (account_from_url(&endpoint)?, endpoint)
            }
            (None, None) => {
                return Err(StorageError::ConfigError(
                    "Connection string needs AccountName or BlobEndpoint".to_string(),
                ))
            }
        };

        if account.is_empty() {
            return Err(StorageError::ConfigError(
                "Connection string has an empty AccountName".to_string(),
            ));
        }

        Ok(Self {
            account,
            account_url,
            auth,
            emulator: false,
        })
    }

    pub fn from_account_url(url: &str, sas_token: Option<&str>) -> StorageResult<Self> {
        let account_url = url.trim().trim_end_matches('/').to_string();
        let account = account_from_url(&account_url)?;

        let auth = match sas_token.map(|t| t.trim().trim_start_matches('?')) {
            Some(token) if !token.is_empty() => AzureAuth::Sas(token.to_string()),
            _ => AzureAuth::Anonymous,
        };

        Ok(Self {
            account,
            account_url,
            auth,
            emulator: false,
        })
    }

    /// `{account_url}/{container}`
    pub fn container_url(&self, container: &str) -> String {
        format!("{}/{}", self.account_url, container)
    }

    pub fn allow_http(&self) -> bool {
        self.account_url.starts_with("http://")
    }
}

/// Account name from `https://{account}.blob.core.windows.net` or, for IP and
/// `localhost` hosts, the path-style `http://127.0.0.1:10000/{account}`.
fn account_from_url(raw: &str) -> StorageResult<String> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| StorageError::ConfigError(format!("Invalid account URL '{}': {}", raw, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| StorageError::ConfigError(format!("Account URL '{}' has no host", raw)))?;

    let path_style =
        host == "localhost" || host.trim_matches(['[', ']']).parse::<IpAddr>().is_ok();

    let account = if path_style {
        url.path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default()
    } else {
        host.split('.').next().unwrap_or_default()
    };

    if account.is_empty() {
        return Err(StorageError::ConfigError(format!(
            "Cannot determine storage account from '{}'",
            raw
        )));
    }

    Ok(account.to_string())
}
